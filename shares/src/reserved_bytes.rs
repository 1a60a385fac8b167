//! Encoding of the offset of the first unit that starts in a compact share.
//!
//! Every compact share carries [COMPACT_SHARE_RESERVED_BYTES] bytes after its info byte (and
//! sequence length, if it is the first share). They hold the big-endian byte offset, from the
//! start of the share, of the first unit that begins in the share. A value of zero means no unit
//! begins in the share.

use crate::{Error, COMPACT_SHARE_RESERVED_BYTES, SHARE_SIZE};

/// Encodes `offset` as reserved bytes.
pub fn encode(offset: u32) -> Result<[u8; COMPACT_SHARE_RESERVED_BYTES], Error> {
    if offset as usize >= SHARE_SIZE {
        return Err(Error::ReservedBytesOutOfRange(offset));
    }
    Ok((offset as u16).to_be_bytes())
}

/// Decodes the offset held in reserved bytes.
pub fn parse(reserved: &[u8]) -> Result<u32, Error> {
    let reserved: [u8; COMPACT_SHARE_RESERVED_BYTES] = reserved
        .try_into()
        .map_err(|_| Error::EndOfBuffer)?;
    let offset = u32::from(u16::from_be_bytes(reserved));
    if offset as usize >= SHARE_SIZE {
        return Err(Error::ReservedBytesOutOfRange(offset));
    }
    Ok(offset)
}
