//! Dataset records and the dump format they are parsed from.
//!
//! The dump is a single JSON object with `actors`, `variables`, and
//! `conversations` arrays. Each entity carries an `id` and a `fields` array
//! of `{ title, value }` pairs; conversations additionally carry their
//! `dialogueEntries`. Field values usually arrive as strings regardless of
//! their logical type ("True", "42"), so the accessors coerce.

use palaver_core::PoolHandle;
use serde::Deserialize;
use serde_json::Value;

// ============================================================================
// Raw layer: 1:1 mapping of the dump
// ============================================================================

/// Root of a dialogue database dump.
#[derive(Debug, Default, Deserialize)]
pub struct RawDump {
    #[serde(default)]
    pub actors: Vec<RawEntity>,
    #[serde(default)]
    pub variables: Vec<RawEntity>,
    #[serde(default)]
    pub conversations: Vec<RawConversation>,
}

/// An entity with an id and a flat field list.
#[derive(Debug, Default, Deserialize)]
pub struct RawEntity {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub fields: Vec<RawField>,
}

/// One `{ title, value }` pair from a `fields` array.
#[derive(Debug, Default, Deserialize)]
pub struct RawField {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub value: Value,
}

/// A conversation: an entity plus its dialogue entries.
#[derive(Debug, Default, Deserialize)]
pub struct RawConversation {
    #[serde(flatten)]
    pub entity: RawEntity,
    #[serde(default, rename = "dialogueEntries")]
    pub dialogue_entries: Vec<RawDialogueEntry>,
}

/// A dialogue entry. Identity and flags sit on the object itself; the text
/// fields sit in the `fields` array like everywhere else.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawDialogueEntry {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub conversation_id: i64,
    #[serde(default)]
    pub is_root: bool,
    #[serde(default)]
    pub is_group: bool,
    #[serde(default)]
    pub fields: Vec<RawField>,
}

/// The raw value of a named field, if present.
pub(crate) fn field<'a>(fields: &'a [RawField], title: &str) -> Option<&'a Value> {
    fields.iter().find(|f| f.title == title).map(|f| &f.value)
}

/// A text field, defaulting to empty.
pub(crate) fn text<'a>(fields: &'a [RawField], title: &str) -> &'a str {
    field(fields, title).and_then(Value::as_str).unwrap_or("")
}

/// A boolean field. Accepts JSON booleans and the dump's `"True"`/`"False"`
/// strings.
pub(crate) fn flag(fields: &[RawField], title: &str) -> bool {
    match field(fields, title) {
        Some(Value::Bool(b)) => *b,
        Some(Value::String(s)) => s.eq_ignore_ascii_case("true"),
        _ => false,
    }
}

/// An integer field. Accepts JSON numbers and numeric strings.
pub(crate) fn int(fields: &[RawField], title: &str) -> Option<i64> {
    match field(fields, title)? {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// A numeric field, as above but tolerating decimals.
pub(crate) fn number(fields: &[RawField], title: &str) -> Option<f64> {
    match field(fields, title)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

// ============================================================================
// Typed layer: pooled records
// ============================================================================

/// A speaking character.
#[derive(Debug, Clone, Copy)]
pub struct Actor {
    pub id: i64,
    pub is_player: bool,
    pub is_npc: bool,
    pub name: PoolHandle,
    pub short_name: PoolHandle,
    pub description: PoolHandle,
}

impl Actor {
    /// Every pooled text field, for lookback initialization.
    pub fn handles(&self) -> [PoolHandle; 3] {
        [self.name, self.short_name, self.description]
    }
}

/// Initial value of a dataset variable. The dump stores these as strings;
/// booleans and numbers are coerced apart at parse time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum VariableValue {
    Bool(bool),
    Number(f64),
    Missing,
}

/// A global dataset variable.
#[derive(Debug, Clone, Copy)]
pub struct Variable {
    pub id: i64,
    pub initial_value: VariableValue,
    pub name: PoolHandle,
    pub description: PoolHandle,
}

impl Variable {
    pub fn handles(&self) -> [PoolHandle; 2] {
        [self.name, self.description]
    }
}

/// A conversation and the global indices of its dialogue entries.
#[derive(Debug, Clone)]
pub struct Conversation {
    pub id: i64,
    pub title: PoolHandle,
    /// Indices into [`Dataset::entries`](crate::Dataset::entries).
    pub entries: Vec<u32>,
}

impl Conversation {
    pub fn handles(&self) -> [PoolHandle; 1] {
        [self.title]
    }
}

/// One node of dialogue.
#[derive(Debug, Clone, Copy)]
pub struct DialogueEntry {
    pub id: i64,
    pub conversation_id: i64,
    pub title: PoolHandle,
    pub text: PoolHandle,
    pub sequence: PoolHandle,
    pub conditions: PoolHandle,
    pub actor: i64,
    pub conversant: i64,
    pub is_root: bool,
    pub is_group: bool,
}

impl DialogueEntry {
    pub fn handles(&self) -> [PoolHandle; 4] {
        [self.title, self.text, self.sequence, self.conditions]
    }
}
