//! The info byte that follows the namespace in every share.

use crate::Error;

/// The largest share version that fits in the info byte.
pub const MAX_SHARE_VERSION: u8 = 127;

/// The first (and currently only) share version.
pub const SHARE_VERSION_ZERO: u8 = 0;

const SEQUENCE_START_MASK: u8 = 0x01;

/// Encodes the share version (upper 7 bits) and whether the share starts a sequence (lowest bit).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct InfoByte(u8);

impl InfoByte {
    /// Creates an info byte, rejecting versions larger than [MAX_SHARE_VERSION].
    pub fn new(version: u8, is_sequence_start: bool) -> Result<Self, Error> {
        if version > MAX_SHARE_VERSION {
            return Err(Error::ShareVersionTooLarge(version));
        }
        let prefix = version << 1;
        if is_sequence_start {
            return Ok(Self(prefix | SEQUENCE_START_MASK));
        }
        Ok(Self(prefix))
    }

    /// Returns the share version.
    pub fn version(&self) -> u8 {
        self.0 >> 1
    }

    /// Returns true if this share is the first share of a sequence.
    pub fn is_sequence_start(&self) -> bool {
        self.0 & SEQUENCE_START_MASK == SEQUENCE_START_MASK
    }
}

impl From<u8> for InfoByte {
    fn from(value: u8) -> Self {
        Self(value)
    }
}

impl From<InfoByte> for u8 {
    fn from(value: InfoByte) -> Self {
        value.0
    }
}
