//! Error types for share encoding and decoding.

use crate::Namespace;
use thiserror::Error;

/// Errors returned while building, splitting, or parsing shares.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    // Format errors
    #[error("invalid share size: {0} (expected {expected})", expected = crate::SHARE_SIZE)]
    InvalidShareSize(usize),
    #[error("share version {0} exceeds the maximum share version")]
    ShareVersionTooLarge(u8),
    #[error("unsupported share version: {0}")]
    UnsupportedShareVersion(u8),
    #[error("invalid namespace size: {0}")]
    InvalidNamespaceSize(usize),
    #[error("unsupported namespace version: {0}")]
    UnsupportedNamespaceVersion(u8),
    #[error("version 0 namespace id does not start with the required zero prefix")]
    InvalidNamespacePrefix,
    #[error("namespace sub-id too large: {0} bytes")]
    SubIdTooLarge(usize),
    #[error("reserved bytes out of range: {0}")]
    ReservedBytesOutOfRange(u32),
    #[error("unexpected end of buffer")]
    EndOfBuffer,
    #[error("invalid varint")]
    InvalidVarint,
    #[error("codec error: {0}")]
    Codec(String),

    // Structural errors
    #[error("sequence does not begin with a sequence start share")]
    MissingSequenceStart,
    #[error("unexpected sequence start at share {0}")]
    UnexpectedSequenceStart(usize),
    #[error("continuation share in {found} does not match open sequence in {expected}")]
    NamespaceMismatch { expected: Namespace, found: Namespace },
    #[error("continuation share at {0} without an open sequence")]
    OrphanContinuation(usize),
    #[error("sequence has {found} shares but its length requires {expected}")]
    SequenceLenMismatch { expected: usize, found: usize },
    #[error("sequence declares {declared} bytes but only {available} are present")]
    TruncatedSequence { declared: usize, available: usize },
    #[error("unit declares {declared} bytes but only {available} remain in the sequence")]
    TruncatedUnit { declared: u64, available: usize },
    #[error("first unit offset {found} does not match content start {expected}")]
    InvalidFirstUnitOffset { expected: usize, found: usize },

    // Invariant errors
    #[error("sequence length can only be written to the first share of a sequence")]
    NotFirstShare,
    #[error("reserved bytes can only be written to a compact share")]
    NotCompactShare,
    #[error("namespace {0} is not a compact namespace")]
    NotCompactNamespace(Namespace),
    #[error("blob namespace {0} is reserved")]
    ReservedBlobNamespace(Namespace),
    #[error("blob data is empty")]
    EmptyBlob,
    #[error("blob too large: {0} bytes")]
    BlobTooLarge(usize),
    #[error("sequence too large: {0} bytes")]
    SequenceTooLarge(usize),
    #[error("cannot write padding shares to an empty splitter")]
    EmptySplitter,
    #[error("no blob starts at share index {0}")]
    NoBlobAtIndex(usize),

    // Layout errors
    #[error("invalid square size: {0}")]
    InvalidSquareSize(usize),
    #[error("invalid number of shares for a square: {0}")]
    InvalidShareCount(usize),
    #[error("square of size {square_size} cannot fit {needed} shares")]
    SquareTooSmall { square_size: usize, needed: usize },
    #[error("non-reserved start {start} precedes end of compact shares {end}")]
    NonReservedStartTooSmall { start: usize, end: usize },
    #[error("share index {index} precedes cursor {cursor}")]
    UnexpectedShareIndex { index: usize, cursor: usize },
    #[error("namespace {0} is not contiguous")]
    NonContiguousNamespace(Namespace),
}

impl From<commonware_codec::Error> for Error {
    fn from(value: commonware_codec::Error) -> Self {
        match value {
            commonware_codec::Error::EndOfBuffer => Self::EndOfBuffer,
            commonware_codec::Error::InvalidVarint(_) => Self::InvalidVarint,
            other => Self::Codec(other.to_string()),
        }
    }
}
