//! Dump ingestion: parse, intern every text field, attach lookbacks.

use std::fs;
use std::path::Path;

use palaver_core::{Lookback, OriginKind, StringPool};

use crate::records::{
    Actor, Conversation, DialogueEntry, RawDump, Variable, VariableValue, flag, int, number, text,
};

/// Ingestion failure.
///
/// Core phase contract violations panic; these are data and I/O problems
/// and stay recoverable.
#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed dump: {0}")]
    Json(#[from] serde_json::Error),
}

/// All typed collections from one dump, with every text field pooled.
#[derive(Debug, Default)]
pub struct Dataset {
    pub actors: Vec<Actor>,
    pub variables: Vec<Variable>,
    pub conversations: Vec<Conversation>,
    pub entries: Vec<DialogueEntry>,
}

impl Dataset {
    /// Read and parse a dump file, then intern it into `pool`.
    pub fn from_path(path: impl AsRef<Path>, pool: &mut StringPool) -> Result<Self, IngestError> {
        let bytes = fs::read(path)?;
        let dump: RawDump = serde_json::from_slice(&bytes)?;
        Ok(Self::ingest(dump, pool))
    }

    /// Intern every text field of `dump` and attach lookbacks once each
    /// entity's collection index is known.
    ///
    /// The pool must still be in its building phase; the caller finalizes
    /// afterwards.
    pub fn ingest(dump: RawDump, pool: &mut StringPool) -> Self {
        let mut dataset = Self::default();

        for raw in &dump.actors {
            let actor = Actor {
                id: raw.id,
                is_player: flag(&raw.fields, "isPlayer"),
                is_npc: flag(&raw.fields, "isNpc"),
                name: pool.intern(text(&raw.fields, "name")),
                short_name: pool.intern(text(&raw.fields, "characterShortName")),
                description: pool.intern(text(&raw.fields, "description")),
            };
            let index = dataset.actors.len() as u32;
            for handle in actor.handles() {
                pool.set_lookback(handle, Lookback::new(OriginKind::Actor, index));
            }
            dataset.actors.push(actor);
        }

        for raw in &dump.variables {
            let variable = Variable {
                id: raw.id,
                initial_value: initial_value(raw),
                name: pool.intern(text(&raw.fields, "name")),
                description: pool.intern(text(&raw.fields, "description")),
            };
            let index = dataset.variables.len() as u32;
            for handle in variable.handles() {
                pool.set_lookback(handle, Lookback::new(OriginKind::Variable, index));
            }
            dataset.variables.push(variable);
        }

        for raw in &dump.conversations {
            let conversation_index = dataset.conversations.len() as u32;
            let mut conversation = Conversation {
                id: raw.entity.id,
                title: pool.intern(text(&raw.entity.fields, "title")),
                entries: Vec::with_capacity(raw.dialogue_entries.len()),
            };
            for handle in conversation.handles() {
                pool.set_lookback(
                    handle,
                    Lookback::new(OriginKind::Conversation, conversation_index),
                );
            }

            for raw_entry in &raw.dialogue_entries {
                let entry = DialogueEntry {
                    id: raw_entry.id,
                    conversation_id: raw_entry.conversation_id,
                    title: pool.intern(text(&raw_entry.fields, "title")),
                    text: pool.intern(text(&raw_entry.fields, "dialogText")),
                    sequence: pool.intern(text(&raw_entry.fields, "sequence")),
                    conditions: pool.intern(text(&raw_entry.fields, "conditionsString")),
                    actor: int(&raw_entry.fields, "actor").unwrap_or(0),
                    conversant: int(&raw_entry.fields, "conversant").unwrap_or(0),
                    is_root: raw_entry.is_root,
                    is_group: raw_entry.is_group,
                };
                let entry_index = dataset.entries.len() as u32;
                for handle in entry.handles() {
                    pool.set_lookback(handle, Lookback::new(OriginKind::DialogueEntry, entry_index));
                }
                conversation.entries.push(entry_index);
                dataset.entries.push(entry);
            }

            dataset.conversations.push(conversation);
        }

        dataset
    }
}

/// Coerce a variable's `Initial Value` field: booleans and numbers share
/// one column in the dump.
fn initial_value(raw: &crate::records::RawEntity) -> VariableValue {
    let fields = &raw.fields;
    match crate::records::field(fields, "Initial Value") {
        Some(serde_json::Value::Bool(b)) => VariableValue::Bool(*b),
        Some(serde_json::Value::String(s)) if s.eq_ignore_ascii_case("true") => {
            VariableValue::Bool(true)
        }
        Some(serde_json::Value::String(s)) if s.eq_ignore_ascii_case("false") => {
            VariableValue::Bool(false)
        }
        Some(_) => match number(fields, "Initial Value") {
            Some(n) => VariableValue::Number(n),
            None => VariableValue::Missing,
        },
        None => VariableValue::Missing,
    }
}
