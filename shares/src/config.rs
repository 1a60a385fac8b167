//! Protocol parameters consumed by the splitters, parsers, and placement rules.

use crate::{Error, SHARE_VERSION_ZERO};
use std::num::NonZeroUsize;

/// The default number of subtree roots a blob's share commitment is bounded by.
pub const DEFAULT_SUBTREE_ROOT_THRESHOLD: NonZeroUsize = match NonZeroUsize::new(64) {
    Some(threshold) => threshold,
    None => unreachable!(),
};

/// Configuration for encoding and decoding shares.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// The share versions that may be written and that are accepted when parsing.
    pub supported_share_versions: Vec<u8>,

    /// Bounds the number of subtree roots in a blob's share commitment.
    ///
    /// Used by the non-interactive default rules to derive the width of the subtrees a blob is
    /// aligned to.
    pub subtree_root_threshold: NonZeroUsize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            supported_share_versions: vec![SHARE_VERSION_ZERO],
            subtree_root_threshold: DEFAULT_SUBTREE_ROOT_THRESHOLD,
        }
    }
}

impl Config {
    /// Returns the version written to compact shares.
    ///
    /// Version zero is preferred when supported, otherwise the first supported version is used.
    pub fn compact_share_version(&self) -> Result<u8, Error> {
        if self.supported_share_versions.contains(&SHARE_VERSION_ZERO) {
            return Ok(SHARE_VERSION_ZERO);
        }
        self.supported_share_versions
            .first()
            .copied()
            .ok_or(Error::UnsupportedShareVersion(SHARE_VERSION_ZERO))
    }
}
