//! Assemble a single share byte by byte.

use crate::{
    reserved_bytes,
    share::{content_index, reserved_bytes_index, SEQUENCE_LEN_INDEX},
    Error, InfoByte, Namespace, Share, COMPACT_SHARE_RESERVED_BYTES, SEQUENCE_LEN_BYTES,
    SHARE_SIZE,
};
use bytes::BufMut;

/// Lays out the fixed prefix of a share and appends payload until the share is full.
///
/// A builder owns the buffer of the share being assembled until [Builder::build] hands the
/// finished [Share] to the caller.
#[derive(Clone, Debug)]
pub struct Builder {
    namespace: Namespace,
    share_version: u8,
    is_first_share: bool,
    is_compact_share: bool,
    raw: Vec<u8>,
}

impl Builder {
    /// Creates a builder and writes the share prefix.
    ///
    /// The sequence length (first shares only) and the reserved bytes (compact shares only) are
    /// written as zeroed placeholders.
    pub fn new(
        namespace: Namespace,
        share_version: u8,
        is_first_share: bool,
    ) -> Result<Self, Error> {
        let info = InfoByte::new(share_version, is_first_share)?;
        let is_compact_share = namespace.is_compact();

        let mut raw = Vec::with_capacity(SHARE_SIZE);
        raw.put_slice(&namespace.to_bytes());
        raw.put_u8(info.into());
        if is_first_share {
            raw.put_bytes(0, SEQUENCE_LEN_BYTES);
        }
        if is_compact_share {
            raw.put_bytes(0, COMPACT_SHARE_RESERVED_BYTES);
        }
        Ok(Self {
            namespace,
            share_version,
            is_first_share,
            is_compact_share,
            raw,
        })
    }

    /// Creates a builder around an existing share so its prefix can be rewritten.
    pub fn import(share: &Share) -> Self {
        Self {
            namespace: share.namespace(),
            share_version: share.version(),
            is_first_share: share.is_sequence_start(),
            is_compact_share: share.is_compact_share(),
            raw: share.as_ref().to_vec(),
        }
    }

    pub fn namespace(&self) -> Namespace {
        self.namespace
    }

    pub fn share_version(&self) -> u8 {
        self.share_version
    }

    /// Returns the number of bytes that can still be appended.
    pub fn available_bytes(&self) -> usize {
        SHARE_SIZE - self.raw.len()
    }

    /// Returns true if nothing beyond the fixed prefix has been written.
    pub fn is_empty_share(&self) -> bool {
        self.raw.len() == content_index(self.is_first_share, self.is_compact_share)
    }

    /// Appends as much of `data` as fits, returning the bytes that did not.
    pub fn add_data<'a>(&mut self, data: &'a [u8]) -> Option<&'a [u8]> {
        let available = self.available_bytes();
        if data.len() <= available {
            self.raw.extend_from_slice(data);
            return None;
        }
        let (fits, leftover) = data.split_at(available);
        self.raw.extend_from_slice(fits);
        Some(leftover)
    }

    /// Overwrites the sequence length placeholder of a first share.
    pub fn write_sequence_len(&mut self, len: u32) -> Result<(), Error> {
        if !self.is_first_share {
            return Err(Error::NotFirstShare);
        }
        self.raw[SEQUENCE_LEN_INDEX..SEQUENCE_LEN_INDEX + SEQUENCE_LEN_BYTES]
            .copy_from_slice(&len.to_be_bytes());
        Ok(())
    }

    /// Records the current write position as the offset of the first unit in this share.
    ///
    /// Does nothing if an offset was already recorded.
    pub fn maybe_write_reserved_bytes(&mut self) -> Result<(), Error> {
        if !self.is_compact_share {
            return Err(Error::NotCompactShare);
        }
        let index = reserved_bytes_index(self.is_first_share);
        let end = index + COMPACT_SHARE_RESERVED_BYTES;
        let current = reserved_bytes::parse(&self.raw[index..end])?;
        if current != 0 {
            return Ok(());
        }
        let offset = u32::try_from(self.raw.len())
            .map_err(|_| Error::ReservedBytesOutOfRange(u32::MAX))?;
        let encoded = reserved_bytes::encode(offset)?;
        self.raw[index..end].copy_from_slice(&encoded);
        Ok(())
    }

    /// Pads the share with zeros to [SHARE_SIZE], returning the number of bytes added.
    pub fn zero_pad_if_necessary(&mut self) -> usize {
        let padding = self.available_bytes();
        self.raw.resize(SHARE_SIZE, 0);
        padding
    }

    /// Finishes the share.
    pub fn build(self) -> Result<Share, Error> {
        if self.raw.len() != SHARE_SIZE {
            return Err(Error::InvalidShareSize(self.raw.len()));
        }
        Share::new(self.raw)
    }
}
