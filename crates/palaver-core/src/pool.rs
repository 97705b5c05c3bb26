//! Two-phase interned string pool.
//!
//! Phase 1 (building): `intern` deduplicates strings and predicts the byte
//! offset each record will occupy in the final blob. The builder is
//! append-only, so a predicted offset can never move.
//!
//! Phase 2 (sealed): `finalize` serializes every record at its predicted
//! offset into one immutable blob and discards builder-only state.
//!
//! The pool is an explicit value: the driver constructs one and passes it to
//! collaborators. There is no global instance.

use std::collections::HashMap;

use crate::layout::{self, BlobWriter, Record, RecordIter, record_size};
use crate::origin::{Lookback, OriginKind};

/// A lightweight handle to a pooled string.
///
/// The raw value is the byte offset of the string's record in the finalized
/// blob: predicted at intern time, asserted during finalize. Comparing two
/// handles is O(1); they order by insertion, not lexicographically.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct PoolHandle(u32);

impl PoolHandle {
    /// Raw byte offset, for serialization/debugging.
    #[inline]
    pub fn as_u32(self) -> u32 {
        self.0
    }

    /// Create a handle from a raw offset. Use only for values that came out
    /// of `as_u32`.
    #[inline]
    pub fn from_raw(offset: u32) -> Self {
        Self(offset)
    }
}

impl PartialOrd for PoolHandle {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for PoolHandle {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.0.cmp(&other.0)
    }
}

/// A provisional record awaiting finalization.
#[derive(Debug)]
struct Pending {
    /// Predicted blob offset; must equal the write cursor at finalize.
    offset: u32,
    lookback: Lookback,
    text: String,
}

/// Build-phase state, discarded wholesale by `finalize`.
#[derive(Debug, Default)]
struct Builder {
    /// Provisional records in insertion order.
    pending: Vec<Pending>,
    /// Content → first handle, for deduplication.
    dedup: HashMap<String, PoolHandle>,
    /// Handle offset → index into `pending`.
    by_offset: HashMap<u32, usize>,
    /// Total blob size so far; the next record's offset.
    running_size: u32,
}

/// The finalized, immutable string blob.
#[derive(Debug)]
pub struct Blob {
    bytes: Vec<u8>,
    checksum: u32,
    record_count: u32,
}

impl Blob {
    /// Total size in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// CRC32 of the record bytes, computed once at finalize.
    pub fn checksum(&self) -> u32 {
        self.checksum
    }

    /// Number of deduplicated records.
    pub fn record_count(&self) -> u32 {
        self.record_count
    }

    /// The raw record bytes.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Decode the record at `handle`.
    ///
    /// Returns `None` if the handle does not point at a well-formed record.
    /// Offsets that fall inside a record rather than at its start decode
    /// whatever bytes happen to be there; only handles produced by `intern`
    /// are meaningful.
    pub fn get(&self, handle: PoolHandle) -> Option<Record<'_>> {
        layout::record_at(&self.bytes, handle.as_u32() as usize).map(|(record, _)| record)
    }

    /// Walk all records in insertion order by following NUL terminators.
    pub fn records(&self) -> RecordIter<'_> {
        RecordIter::new(&self.bytes)
    }
}

#[derive(Debug)]
enum Phase {
    Building(Builder),
    Sealed(Blob),
}

/// Two-phase interned string pool. See the module docs for the phase
/// contract.
#[derive(Debug)]
pub struct StringPool {
    phase: Phase,
}

impl Default for StringPool {
    fn default() -> Self {
        Self::new()
    }
}

impl StringPool {
    pub fn new() -> Self {
        Self {
            phase: Phase::Building(Builder::default()),
        }
    }

    fn builder_mut(&mut self, op: &str) -> &mut Builder {
        match &mut self.phase {
            Phase::Building(builder) => builder,
            Phase::Sealed(_) => panic!("string pool is sealed: cannot {op}"),
        }
    }

    /// Intern a string, returning its handle.
    ///
    /// Identical strings intern to the same handle; the record is created
    /// once. The handle's value is the byte offset the record will occupy
    /// after `finalize`. O(1) amortized.
    ///
    /// # Panics
    /// Panics if the pool is sealed, or if `text` contains a NUL byte
    /// (records are NUL-terminated).
    pub fn intern(&mut self, text: &str) -> PoolHandle {
        let builder = self.builder_mut("intern");
        assert!(
            !text.as_bytes().contains(&0),
            "interned text must not contain NUL"
        );

        if let Some(&handle) = builder.dedup.get(text) {
            return handle;
        }

        let handle = PoolHandle(builder.running_size);
        builder.by_offset.insert(handle.0, builder.pending.len());
        builder.pending.push(Pending {
            offset: handle.0,
            lookback: Lookback::default(),
            text: text.to_owned(),
        });
        builder.dedup.insert(text.to_owned(), handle);
        builder.running_size += record_size(text.len()) as u32;
        handle
    }

    /// Attach origin metadata to a handle's provisional record.
    ///
    /// The first assignment wins: a string deduplicated across entities
    /// keeps the origin of its first owner, and later assignments are
    /// ignored.
    ///
    /// # Panics
    /// Panics if the pool is sealed or `handle` was never interned.
    pub fn set_lookback(&mut self, handle: PoolHandle, lookback: Lookback) {
        let builder = self.builder_mut("set a lookback");
        let &index = builder
            .by_offset
            .get(&handle.as_u32())
            .unwrap_or_else(|| panic!("lookback for unknown handle {}", handle.as_u32()));

        let pending = &mut builder.pending[index];
        if pending.lookback.kind == OriginKind::Unknown {
            pending.lookback = lookback;
        }
    }

    /// Seal the pool: serialize every record at its predicted offset and
    /// discard builder state. Returns the number of pooled records.
    ///
    /// # Panics
    /// Panics on double finalize, or if any record fails to land at the
    /// offset predicted for it at intern time.
    pub fn finalize(&mut self) -> u32 {
        let builder = match &mut self.phase {
            Phase::Building(builder) => std::mem::take(builder),
            Phase::Sealed(_) => panic!("string pool is sealed: cannot finalize twice"),
        };

        let record_count = builder.pending.len() as u32;
        let mut writer = BlobWriter::with_capacity(builder.running_size as usize);
        for pending in &builder.pending {
            assert_eq!(
                writer.position(),
                pending.offset as usize,
                "record offset drifted during finalize"
            );
            writer.write_record(pending.lookback, &pending.text);
        }
        assert_eq!(
            writer.position(),
            builder.running_size as usize,
            "blob size drifted during finalize"
        );

        let bytes = writer.finish();
        let checksum = crc32fast::hash(&bytes);
        self.phase = Phase::Sealed(Blob {
            bytes,
            checksum,
            record_count,
        });
        record_count
    }

    /// Resolve a handle to its text and lookback.
    ///
    /// Identical contract in both phases: builder storage before `finalize`,
    /// a bounds-checked blob decode after.
    ///
    /// # Panics
    /// Panics if the handle was not produced by this pool.
    pub fn resolve(&self, handle: PoolHandle) -> (&str, Lookback) {
        self.try_resolve(handle)
            .unwrap_or_else(|| panic!("unknown pool handle {}", handle.as_u32()))
    }

    /// Try to resolve a handle, returning `None` if invalid.
    pub fn try_resolve(&self, handle: PoolHandle) -> Option<(&str, Lookback)> {
        match &self.phase {
            Phase::Building(builder) => {
                let &index = builder.by_offset.get(&handle.as_u32())?;
                let pending = &builder.pending[index];
                Some((pending.text.as_str(), pending.lookback))
            }
            Phase::Sealed(blob) => blob.get(handle).map(|record| (record.text, record.lookback)),
        }
    }

    /// The finalized blob, or `None` while still building.
    pub fn blob(&self) -> Option<&Blob> {
        match &self.phase {
            Phase::Building(_) => None,
            Phase::Sealed(blob) => Some(blob),
        }
    }

    pub fn is_sealed(&self) -> bool {
        matches!(self.phase, Phase::Sealed(_))
    }

    /// Number of deduplicated strings interned so far.
    pub fn len(&self) -> usize {
        match &self.phase {
            Phase::Building(builder) => builder.pending.len(),
            Phase::Sealed(blob) => blob.record_count() as usize,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
