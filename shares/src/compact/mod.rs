//! Pack length-delimited units contiguously into shares of a reserved namespace.
//!
//! Units (transactions) are prefixed with their length as a [varint](commonware_codec::varint)
//! and written back to back, spanning share boundaries as needed. Every share of the sequence
//! records in its reserved bytes where the first unit starting in it begins, and the first share
//! records the total number of payload bytes in the sequence.

use crate::{CONTINUATION_COMPACT_SHARE_CONTENT_SIZE, FIRST_COMPACT_SHARE_CONTENT_SIZE};
use commonware_codec::{varint, EncodeSize, Write};

mod counter;
pub use counter::Counter;
mod parse;
pub use parse::parse;
mod splitter;
pub use splitter::Splitter;

/// Returns the number of compact shares needed to hold `sequence_len` payload bytes.
pub fn shares_needed(sequence_len: usize) -> usize {
    if sequence_len == 0 {
        return 0;
    }
    if sequence_len <= FIRST_COMPACT_SHARE_CONTENT_SIZE {
        return 1;
    }
    1 + (sequence_len - FIRST_COMPACT_SHARE_CONTENT_SIZE)
        .div_ceil(CONTINUATION_COMPACT_SHARE_CONTENT_SIZE)
}

/// Returns the number of bytes used by the length prefix of a unit of `len` bytes.
pub fn delimiter_len(len: usize) -> usize {
    varint::UInt(len as u64).encode_size()
}

/// Prefixes `unit` with its length.
pub fn marshal_delimited(unit: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(delimiter_len(unit.len()) + unit.len());
    varint::UInt(unit.len() as u64).write(&mut out);
    out.extend_from_slice(unit);
    out
}

/// Returns the unit length whose delimited encoding occupies `desired` bytes.
pub fn raw_unit_size(desired: usize) -> usize {
    desired - delimiter_len(desired)
}
