//! Word-indexed search over a finalized string pool.
//!
//! Two pieces:
//! - **Tokenizer** (`tokenize`): byte-level UTF-8 decoding with a
//!   deterministic fallback for invalid sequences, and word splitting on
//!   whitespace/punctuation
//! - **Index** (`index`): word-hash → handle buckets compiled in one pass
//!   over the blob, queried with a two-phase search (bucket union, then
//!   case-insensitive substring verification)

mod index;
mod tokenize;


pub use index::{SearchHit, WordIndex};
pub use tokenize::{Words, contains_fold, decode_codepoint, fold_lower, is_separator, words};
