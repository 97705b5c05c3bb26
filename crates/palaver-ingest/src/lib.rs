//! Dataset records and dump ingestion.
//!
//! Two layers:
//! - **Raw layer** (`records`): 1:1 serde mapping of the JSON dump format
//! - **Typed layer** (`records` + `ingest`): records holding pool handles
//!   for every text field, with lookbacks attached during ingestion

mod ingest;
mod records;

#[cfg(test)]
mod ingest_tests;
#[cfg(test)]
mod records_tests;

pub use ingest::{Dataset, IngestError};
pub use records::{
    Actor, Conversation, DialogueEntry, RawConversation, RawDialogueEntry, RawDump, RawEntity,
    RawField, Variable, VariableValue,
};
