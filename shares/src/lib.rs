//! Encode block data into namespaced shares and recover it from a data square.
//!
//! # Overview
//!
//! Block data (ordinary transactions, pay-for-blob transactions, and user-submitted blobs) is
//! split into fixed-size [Share]s of [SHARE_SIZE] bytes. Every share begins with a [Namespace]
//! and an [InfoByte]; shares are then arranged, sorted by namespace, into a square whose width
//! is a power of two.
//!
//! Two encodings are used:
//! - _Compact_ shares pack many length-delimited units (transactions) contiguously into a single
//!   sequence under a reserved namespace. See [compact].
//! - _Sparse_ shares carry exactly one [Blob] per sequence. See [sparse].
//!
//! Blobs are placed in the square according to the non-interactive default rules (see
//! [placement]) so that every node computes the same layout without coordination. Gaps are
//! filled with padding shares (see [padding]).
//!
//! On the receiving side, [merge] buckets the shares of a (possibly erasure-decoded) square by
//! namespace and hands them to the [compact] and [sparse] parsers, while [parse_shares] segments
//! arbitrary shares into validated [ShareSequence]s.
//!
//! # Share Layout
//!
//! ```text
//! +-----------+-----------+-------------------+------------------+----------------------+
//! | namespace | info byte | sequence length   | reserved bytes   | payload (zero-padded)|
//! | 29 bytes  | 1 byte    | 4 bytes, if first | 2 bytes, compact |                      |
//! +-----------+-----------+-------------------+------------------+----------------------+
//! ```
//!
//! # Example
//!
//! ```
//! use commonware_shares::{merge, Blob, Config, Namespace, Square};
//!
//! let config = Config::default();
//! let namespace = Namespace::new_v0(&[1, 2, 3]).unwrap();
//! let blob = Blob::new(namespace, vec![7u8; 1_000], 0).unwrap();
//! let txs = vec![b"transfer".to_vec()];
//!
//! // Lay out a square with the smallest width that fits.
//! let square = Square::build_smallest(&txs, &[], vec![blob.clone()], 64, &config).unwrap();
//!
//! // Recover the block data from the square.
//! let data = merge(square.shares(), &config).unwrap();
//! assert_eq!(data.txs, txs);
//! assert_eq!(data.blobs, vec![blob]);
//! ```

#![doc(
    html_logo_url = "https://commonware.xyz/imgs/rustdoc_logo.svg",
    html_favicon_url = "https://commonware.xyz/favicon.ico"
)]

mod blob;
pub use blob::Blob;
mod builder;
pub use builder::Builder;
pub mod compact;
mod config;
pub use config::{Config, DEFAULT_SUBTREE_ROOT_THRESHOLD};
mod error;
pub use error::Error;
mod info_byte;
pub use info_byte::{InfoByte, MAX_SHARE_VERSION, SHARE_VERSION_ZERO};
mod namespace;
pub use namespace::{
    Namespace, INTERMEDIATE_STATE_ROOTS_NAMESPACE, MAX_PRIMARY_RESERVED_NAMESPACE,
    MIN_SECONDARY_RESERVED_NAMESPACE, NAMESPACE_ID_SIZE, NAMESPACE_SIZE, NAMESPACE_VERSION_MAX,
    NAMESPACE_VERSION_SIZE, NAMESPACE_VERSION_ZERO, NAMESPACE_VERSION_ZERO_ID_SIZE,
    NAMESPACE_VERSION_ZERO_PREFIX_SIZE, PARITY_SHARES_NAMESPACE, PAY_FOR_BLOB_NAMESPACE,
    PRIMARY_RESERVED_PADDING_NAMESPACE, TAIL_PADDING_NAMESPACE, TX_NAMESPACE,
};
pub mod padding;
mod parse;
pub use parse::{parse_shares, ShareSequence};
pub mod placement;
pub mod reserved_bytes;
mod share;
pub use share::{
    Share, COMPACT_SHARE_RESERVED_BYTES, CONTINUATION_COMPACT_SHARE_CONTENT_SIZE,
    CONTINUATION_SPARSE_SHARE_CONTENT_SIZE, FIRST_COMPACT_SHARE_CONTENT_SIZE,
    FIRST_SPARSE_SHARE_CONTENT_SIZE, SEQUENCE_LEN_BYTES, SHARE_INFO_BYTES, SHARE_SIZE,
};
pub mod sparse;
mod split;
pub use split::{split_txs, SplitTxs};
mod square;
pub use square::{
    merge, merge_extended, share_range_for_namespace, BlockData, Square, MIN_SQUARE_SIZE,
};
