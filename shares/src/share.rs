//! A fixed-size share and the accessors used to interpret its prefix.

use crate::{reserved_bytes, Error, InfoByte, Namespace, NAMESPACE_SIZE};
use bytes::Bytes;
use std::fmt::Debug;

/// The size of a share in bytes.
pub const SHARE_SIZE: usize = 512;

/// The size of the info byte in bytes.
pub const SHARE_INFO_BYTES: usize = 1;

/// The size of the sequence length carried by the first share of a sequence.
pub const SEQUENCE_LEN_BYTES: usize = 4;

/// The size of the reserved bytes carried by every compact share.
pub const COMPACT_SHARE_RESERVED_BYTES: usize = 2;

/// Payload capacity of the first share of a compact sequence.
pub const FIRST_COMPACT_SHARE_CONTENT_SIZE: usize = SHARE_SIZE
    - NAMESPACE_SIZE
    - SHARE_INFO_BYTES
    - SEQUENCE_LEN_BYTES
    - COMPACT_SHARE_RESERVED_BYTES;

/// Payload capacity of every other share of a compact sequence.
pub const CONTINUATION_COMPACT_SHARE_CONTENT_SIZE: usize =
    SHARE_SIZE - NAMESPACE_SIZE - SHARE_INFO_BYTES - COMPACT_SHARE_RESERVED_BYTES;

/// Payload capacity of the first share of a sparse sequence.
pub const FIRST_SPARSE_SHARE_CONTENT_SIZE: usize =
    SHARE_SIZE - NAMESPACE_SIZE - SHARE_INFO_BYTES - SEQUENCE_LEN_BYTES;

/// Payload capacity of every other share of a sparse sequence.
pub const CONTINUATION_SPARSE_SHARE_CONTENT_SIZE: usize =
    SHARE_SIZE - NAMESPACE_SIZE - SHARE_INFO_BYTES;

pub(crate) const INFO_BYTE_INDEX: usize = NAMESPACE_SIZE;
pub(crate) const SEQUENCE_LEN_INDEX: usize = INFO_BYTE_INDEX + SHARE_INFO_BYTES;

/// Returns the index of the reserved bytes in a compact share.
pub(crate) fn reserved_bytes_index(is_sequence_start: bool) -> usize {
    if is_sequence_start {
        SEQUENCE_LEN_INDEX + SEQUENCE_LEN_BYTES
    } else {
        SEQUENCE_LEN_INDEX
    }
}

/// Returns the index of the first payload byte.
pub(crate) fn content_index(is_sequence_start: bool, is_compact: bool) -> usize {
    let mut index = SEQUENCE_LEN_INDEX;
    if is_sequence_start {
        index += SEQUENCE_LEN_BYTES;
    }
    if is_compact {
        index += COMPACT_SHARE_RESERVED_BYTES;
    }
    index
}

/// An immutable share of exactly [SHARE_SIZE] bytes with a valid namespace.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Share {
    namespace: Namespace,
    data: Bytes,
}

impl Share {
    /// Wraps `data` as a share, validating its length and namespace.
    pub fn new(data: impl Into<Bytes>) -> Result<Self, Error> {
        let data = data.into();
        if data.len() != SHARE_SIZE {
            return Err(Error::InvalidShareSize(data.len()));
        }
        let namespace = Namespace::from_bytes(&data[..NAMESPACE_SIZE])?;
        Ok(Self { namespace, data })
    }

    pub fn namespace(&self) -> Namespace {
        self.namespace
    }

    pub fn info_byte(&self) -> InfoByte {
        InfoByte::from(self.data[INFO_BYTE_INDEX])
    }

    /// Returns the share version encoded in the info byte.
    pub fn version(&self) -> u8 {
        self.info_byte().version()
    }

    pub fn is_sequence_start(&self) -> bool {
        self.info_byte().is_sequence_start()
    }

    /// Returns true if the share uses the compact encoding.
    pub fn is_compact_share(&self) -> bool {
        self.namespace.is_compact()
    }

    /// Returns the sequence length declared by the share.
    ///
    /// Continuation shares do not carry a sequence length and return 0.
    pub fn sequence_len(&self) -> u32 {
        if !self.is_sequence_start() {
            return 0;
        }
        let mut raw = [0u8; SEQUENCE_LEN_BYTES];
        let end = SEQUENCE_LEN_INDEX + SEQUENCE_LEN_BYTES;
        raw.copy_from_slice(&self.data[SEQUENCE_LEN_INDEX..end]);
        u32::from_be_bytes(raw)
    }

    /// Returns the offset of the first unit that starts in a compact share.
    pub fn reserved_bytes(&self) -> Result<u32, Error> {
        if !self.is_compact_share() {
            return Err(Error::NotCompactShare);
        }
        let index = reserved_bytes_index(self.is_sequence_start());
        reserved_bytes::parse(&self.data[index..index + COMPACT_SHARE_RESERVED_BYTES])
    }

    /// Returns the payload that follows the fixed prefix.
    pub fn raw_data(&self) -> &[u8] {
        &self.data[content_index(self.is_sequence_start(), self.is_compact_share())..]
    }

    /// Returns the payload of a compact share starting at the first unit that begins in it.
    ///
    /// If no unit begins in the share, the result is empty.
    pub fn raw_data_using_reserved(&self) -> Result<&[u8], Error> {
        let offset = self.reserved_bytes()? as usize;
        if offset == 0 {
            return Ok(&[]);
        }
        let start = content_index(self.is_sequence_start(), true);
        if offset < start {
            return Err(Error::ReservedBytesOutOfRange(offset as u32));
        }
        Ok(&self.data[offset..])
    }

    /// Returns true if the share pads a namespace (a sequence start that declares no data).
    pub fn is_namespace_padding(&self) -> bool {
        self.is_sequence_start() && self.sequence_len() == 0
    }

    pub fn is_tail_padding(&self) -> bool {
        self.namespace.is_tail_padding()
    }

    pub fn is_reserved_padding(&self) -> bool {
        self.namespace.is_primary_reserved_padding()
    }

    /// Returns true if the share carries no data.
    pub fn is_padding(&self) -> bool {
        self.is_namespace_padding() || self.is_tail_padding() || self.is_reserved_padding()
    }

    /// Ensures the share version is one of `supported`.
    pub fn supports_versions(&self, supported: &[u8]) -> Result<(), Error> {
        let version = self.version();
        if !supported.contains(&version) {
            return Err(Error::UnsupportedShareVersion(version));
        }
        Ok(())
    }

    /// Returns the raw share.
    pub fn as_bytes(&self) -> &Bytes {
        &self.data
    }
}

impl AsRef<[u8]> for Share {
    fn as_ref(&self) -> &[u8] {
        &self.data
    }
}

impl TryFrom<&[u8]> for Share {
    type Error = Error;

    fn try_from(value: &[u8]) -> Result<Self, Self::Error> {
        Self::new(Bytes::copy_from_slice(value))
    }
}

impl From<Share> for Bytes {
    fn from(value: Share) -> Self {
        value.data
    }
}

impl Debug for Share {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Share")
            .field("namespace", &self.namespace)
            .field("version", &self.version())
            .field("is_sequence_start", &self.is_sequence_start())
            .field("sequence_len", &self.sequence_len())
            .finish()
    }
}
