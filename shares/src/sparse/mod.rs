//! Encode each blob as its own sequence of shares.
//!
//! The first share of a blob declares the blob length, the remaining shares carry the rest of
//! its data, and the last share is zero-padded.

use crate::{CONTINUATION_SPARSE_SHARE_CONTENT_SIZE, FIRST_SPARSE_SHARE_CONTENT_SIZE};

mod parse;
pub use parse::parse;
mod splitter;
pub use splitter::Splitter;

/// Returns the number of sparse shares needed to hold `sequence_len` bytes.
pub fn shares_needed(sequence_len: usize) -> usize {
    if sequence_len == 0 {
        return 0;
    }
    if sequence_len <= FIRST_SPARSE_SHARE_CONTENT_SIZE {
        return 1;
    }
    1 + (sequence_len - FIRST_SPARSE_SHARE_CONTENT_SIZE)
        .div_ceil(CONTINUATION_SPARSE_SHARE_CONTENT_SIZE)
}
