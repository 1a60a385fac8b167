//! Shares that carry no data.
//!
//! All padding shares are sequence starts that declare a sequence length of zero. Namespace
//! padding fills the gap after a blob up to the index of the next one, reserved padding fills the
//! gap between the compact shares and the first blob, and tail padding fills the square after the
//! last blob.

use crate::{
    Builder, Error, Namespace, Share, PRIMARY_RESERVED_PADDING_NAMESPACE, SHARE_VERSION_ZERO,
    TAIL_PADDING_NAMESPACE,
};

/// Returns a padding share in `namespace`.
pub fn namespace_padding_share(namespace: Namespace, share_version: u8) -> Result<Share, Error> {
    let mut builder = Builder::new(namespace, share_version, true)?;
    builder.write_sequence_len(0)?;
    builder.zero_pad_if_necessary();
    builder.build()
}

/// Returns `count` padding shares in `namespace`.
pub fn namespace_padding_shares(
    namespace: Namespace,
    share_version: u8,
    count: usize,
) -> Result<Vec<Share>, Error> {
    if count == 0 {
        return Ok(Vec::new());
    }
    let share = namespace_padding_share(namespace, share_version)?;
    Ok(vec![share; count])
}

/// Returns a share that pads the reserved namespaces.
pub fn reserved_padding_share() -> Result<Share, Error> {
    namespace_padding_share(PRIMARY_RESERVED_PADDING_NAMESPACE, SHARE_VERSION_ZERO)
}

/// Returns `count` reserved padding shares.
pub fn reserved_padding_shares(count: usize) -> Result<Vec<Share>, Error> {
    namespace_padding_shares(PRIMARY_RESERVED_PADDING_NAMESPACE, SHARE_VERSION_ZERO, count)
}

/// Returns a share that pads the end of a square.
pub fn tail_padding_share() -> Result<Share, Error> {
    namespace_padding_share(TAIL_PADDING_NAMESPACE, SHARE_VERSION_ZERO)
}

/// Returns `count` tail padding shares.
pub fn tail_padding_shares(count: usize) -> Result<Vec<Share>, Error> {
    namespace_padding_shares(TAIL_PADDING_NAMESPACE, SHARE_VERSION_ZERO, count)
}
