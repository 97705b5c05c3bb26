//! Core data structures for Palaver: the interned string pool and its
//! binary record layout.
//!
//! The pool has two phases:
//! - **Building**: `intern` deduplicates strings and predicts the byte
//!   offset each record will occupy; `set_lookback` attaches origin metadata
//! - **Sealed**: `finalize` serializes everything into one immutable blob,
//!   resolved directly by byte offset
//!
//! Phase order is a caller contract, not a recoverable condition: mutating a
//! sealed pool or resolving a handle that was never interned panics.

mod layout;
mod origin;
mod pool;


pub use layout::{RECORD_HEADER_SIZE, Record, RecordIter};
pub use origin::{Lookback, OriginKind};
pub use pool::{Blob, PoolHandle, StringPool};
