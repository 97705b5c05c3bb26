//! Inverted word index over a finalized string pool.
//!
//! The index is a coarse prefilter: it maps word hashes to the handles of
//! every string containing that word. Hash collisions and out-of-order
//! token matches are weeded out by the substring verification in
//! [`WordIndex::search`], so a bucket hit is a candidate, never an answer.

use std::collections::BTreeSet;

use indexmap::IndexMap;
use palaver_core::{Lookback, PoolHandle, StringPool};

use crate::tokenize::{contains_fold, fold_lower, words};

/// Hash a word, folded to lowercase first.
///
/// Fixed and deterministic. Folding before hashing makes the bucket lookup
/// itself case-insensitive; verification folds the same way, so the policy
/// is uniform end to end.
#[inline]
fn word_hash(word: &[u8]) -> u32 {
    crc32fast::hash(fold_lower(word).as_bytes())
}

/// A verified search result, resolved against the pool it was found in.
#[derive(Clone, Copy, Debug)]
pub struct SearchHit<'p> {
    pub handle: PoolHandle,
    pub text: &'p str,
    pub lookback: Lookback,
}

/// Word-hash → handles of strings containing that word.
#[derive(Debug, Default)]
pub struct WordIndex {
    buckets: IndexMap<u32, Vec<PoolHandle>>,
    entries: u32,
}

impl WordIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the index from a finalized pool, one entry per word occurrence.
    ///
    /// Walks the blob once, record by record, following NUL terminators.
    /// Returns the number of index entries created; an unsealed or empty
    /// pool yields 0 and leaves the index empty.
    ///
    /// # Panics
    /// Panics if the index was already compiled.
    pub fn compile(&mut self, pool: &StringPool) -> u32 {
        assert!(
            self.buckets.is_empty() && self.entries == 0,
            "word index already compiled"
        );

        let Some(blob) = pool.blob() else {
            return 0;
        };

        for (handle, record) in blob.records() {
            for word in words(record.text.as_bytes()) {
                self.buckets.entry(word_hash(word)).or_default().push(handle);
                self.entries += 1;
            }
        }

        self.entries
    }

    /// Number of distinct word hashes.
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Total entries inserted by `compile`.
    pub fn entry_count(&self) -> u32 {
        self.entries
    }

    /// Handles whose text contained a word with this exact hash.
    fn lookup_word(&self, word: &[u8]) -> &[PoolHandle] {
        self.buckets
            .get(&word_hash(word))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Two-phase search.
    ///
    /// Tokenizes `query` with the same tokenizer used at compile time,
    /// unions the hash bucket of every query word into a candidate set (a
    /// handle matching several tokens contributes once), then keeps only
    /// candidates whose full text contains `query` as a literal,
    /// case-insensitive, contiguous substring.
    ///
    /// Result order is unspecified. A query with no indexed tokens returns
    /// an empty vec, even when a full corpus scan would have found a
    /// substring match; query cost is bounded by the index, not the
    /// corpus.
    pub fn search<'p>(&self, pool: &'p StringPool, query: &str) -> Vec<SearchHit<'p>> {
        let mut candidates = BTreeSet::new();
        for word in words(query.as_bytes()) {
            candidates.extend(self.lookup_word(word).iter().copied());
        }

        let mut hits = Vec::new();
        for handle in candidates {
            let Some((text, lookback)) = pool.try_resolve(handle) else {
                continue;
            };
            if contains_fold(text.as_bytes(), query.as_bytes()) {
                hits.push(SearchHit {
                    handle,
                    text,
                    lookback,
                });
            }
        }
        hits
    }
}
