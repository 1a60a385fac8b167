use super::delimiter_len;
use crate::{CONTINUATION_COMPACT_SHARE_CONTENT_SIZE, FIRST_COMPACT_SHARE_CONTENT_SIZE};

/// Counts the compact shares a sequence of units occupies without materializing them.
///
/// After every [Counter::add], [Counter::size] equals the [count](super::Splitter::count) of a
/// splitter that wrote units of the same lengths.
#[derive(Clone, Debug, Default)]
pub struct Counter {
    shares: usize,
    remainder: usize,

    last_shares: usize,
    last_remainder: usize,
}

impl Counter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a unit of `len` bytes, returning the number of shares added.
    pub fn add(&mut self, len: usize) -> usize {
        let mut len = len + delimiter_len(len);
        self.last_shares = self.shares;
        self.last_remainder = self.remainder;

        // Fits in the space left in the last share.
        if len <= self.remainder {
            self.remainder -= len;
            return 0;
        }
        len -= self.remainder;

        // The first share holds less than the others.
        if self.shares == 0 {
            self.shares += 1;
            if len <= FIRST_COMPACT_SHARE_CONTENT_SIZE {
                self.remainder = FIRST_COMPACT_SHARE_CONTENT_SIZE - len;
                return self.shares - self.last_shares;
            }
            len -= FIRST_COMPACT_SHARE_CONTENT_SIZE;
        }

        self.shares += len / CONTINUATION_COMPACT_SHARE_CONTENT_SIZE;
        let partial = len % CONTINUATION_COMPACT_SHARE_CONTENT_SIZE;
        if partial > 0 {
            self.shares += 1;
            self.remainder = CONTINUATION_COMPACT_SHARE_CONTENT_SIZE - partial;
        } else {
            self.remainder = 0;
        }
        self.shares - self.last_shares
    }

    /// Undoes the most recent [Counter::add].
    pub fn revert(&mut self) {
        self.shares = self.last_shares;
        self.remainder = self.last_remainder;
    }

    /// Returns the number of shares used so far.
    pub fn size(&self) -> usize {
        self.shares
    }

    /// Returns the number of bytes left in the last share.
    pub fn remainder(&self) -> usize {
        self.remainder
    }
}
