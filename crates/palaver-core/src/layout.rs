//! Binary record layout for the string blob.
//!
//! Each record is `{ kind: u8, origin index: u32 LE, text: UTF-8 bytes,
//! NUL }`, laid out contiguously in insertion order with no padding.
//! Records are self-delimiting: traversal follows the NUL terminator, so no
//! separate length table is needed.

use crate::origin::{Lookback, OriginKind};
use crate::pool::PoolHandle;

/// Bytes of origin metadata preceding the text in every record.
pub const RECORD_HEADER_SIZE: usize = 5;

/// Total encoded size of a record with `text_len` bytes of text.
#[inline]
pub(crate) fn record_size(text_len: usize) -> usize {
    RECORD_HEADER_SIZE + text_len + 1
}

/// Append-only cursor for serializing records into the blob.
///
/// The buffer only ever grows, so an offset handed out before a write can
/// never move.
#[derive(Debug, Default)]
pub(crate) struct BlobWriter {
    buf: Vec<u8>,
}

impl BlobWriter {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: Vec::with_capacity(capacity),
        }
    }

    /// Current write cursor, equal to the offset of the next record.
    #[inline]
    pub(crate) fn position(&self) -> usize {
        self.buf.len()
    }

    pub(crate) fn write_record(&mut self, lookback: Lookback, text: &str) {
        self.buf.push(lookback.kind.as_u8());
        self.buf.extend_from_slice(&lookback.index.to_le_bytes());
        self.buf.extend_from_slice(text.as_bytes());
        self.buf.push(0);
    }

    pub(crate) fn finish(self) -> Vec<u8> {
        self.buf
    }
}

/// One decoded record.
#[derive(Clone, Copy, Debug)]
pub struct Record<'a> {
    pub lookback: Lookback,
    pub text: &'a str,
}

/// Decode the record starting at `offset`.
///
/// Returns the record and the offset one past its terminator, or `None` if
/// `offset` does not point at a well-formed record.
pub(crate) fn record_at(blob: &[u8], offset: usize) -> Option<(Record<'_>, usize)> {
    let header = blob.get(offset..offset + RECORD_HEADER_SIZE)?;
    let kind = OriginKind::from_u8(header[0]);
    let index = u32::from_le_bytes([header[1], header[2], header[3], header[4]]);

    let text_start = offset + RECORD_HEADER_SIZE;
    let rest = blob.get(text_start..)?;
    let len = rest.iter().position(|&b| b == 0)?;
    let text = std::str::from_utf8(&rest[..len]).ok()?;

    Some((
        Record {
            lookback: Lookback { kind, index },
            text,
        },
        text_start + len + 1,
    ))
}

/// Iterator over all records in a finalized blob, in insertion order.
pub struct RecordIter<'a> {
    blob: &'a [u8],
    offset: usize,
}

impl<'a> RecordIter<'a> {
    pub(crate) fn new(blob: &'a [u8]) -> Self {
        Self { blob, offset: 0 }
    }
}

impl<'a> Iterator for RecordIter<'a> {
    /// The handle doubles as the record's byte offset.
    type Item = (PoolHandle, Record<'a>);

    fn next(&mut self) -> Option<Self::Item> {
        if self.offset >= self.blob.len() {
            return None;
        }
        let handle = PoolHandle::from_raw(self.offset as u32);
        let (record, next) = record_at(self.blob, self.offset)
            .expect("string blob corrupt: record truncated or unterminated");
        self.offset = next;
        Some((handle, record))
    }
}
