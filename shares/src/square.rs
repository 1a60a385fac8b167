//! Arrange shares into a data square and recover block data from one.

use crate::{
    compact::{self, Counter},
    padding,
    placement::{
        blob_min_square_size, blob_shares_used_non_interactive_defaults, fits_in_square,
        next_share_index,
    },
    sparse, split_txs, Blob, Config, Error, Namespace, Share,
};
use bytes::Bytes;
use std::{num::NonZeroUsize, ops::Range};
use tracing::{debug, warn};

/// The width of the smallest square.
pub const MIN_SQUARE_SIZE: usize = 1;

/// The data recovered from a square.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BlockData {
    pub txs: Vec<Bytes>,
    pub pfb_txs: Vec<Bytes>,
    pub blobs: Vec<Blob>,
    pub square_size: usize,
}

/// Shares of a block in row-major order, sorted by namespace.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Square(Vec<Share>);

impl Square {
    /// Returns the square of a block without data: a single tail padding share.
    pub fn empty() -> Result<Self, Error> {
        Ok(Self(padding::tail_padding_shares(MIN_SQUARE_SIZE)?))
    }

    /// Lays out a square of width `square_size`.
    ///
    /// Ordinary transaction shares come first, followed by pay-for-blob transaction shares and
    /// reserved padding up to `non_reserved_start`. Blob shares start at `non_reserved_start` and
    /// the rest of the square is filled with tail padding.
    pub fn write(
        tx_shares: Vec<Share>,
        pfb_shares: Vec<Share>,
        blob_shares: Vec<Share>,
        non_reserved_start: usize,
        square_size: usize,
    ) -> Result<Self, Error> {
        validate_square_size(square_size)?;
        let compact_end = tx_shares.len() + pfb_shares.len();
        if non_reserved_start < compact_end {
            return Err(Error::NonReservedStartTooSmall {
                start: non_reserved_start,
                end: compact_end,
            });
        }
        let capacity = square_size * square_size;
        let count = non_reserved_start + blob_shares.len();
        if count > capacity {
            return Err(Error::SquareTooSmall {
                square_size,
                needed: count,
            });
        }

        let mut shares = Vec::with_capacity(capacity);
        shares.extend(tx_shares);
        shares.extend(pfb_shares);
        shares.extend(padding::reserved_padding_shares(
            non_reserved_start - compact_end,
        )?);
        shares.extend(blob_shares);
        shares.extend(padding::tail_padding_shares(capacity - count)?);
        Ok(Self(shares))
    }

    /// Builds a square of width `square_size` from block data.
    ///
    /// Blobs are sorted by namespace (keeping the given order within a namespace) and placed
    /// according to the non-interactive default rules, with namespace padding between them.
    pub fn build(
        txs: &[Vec<u8>],
        pfb_txs: &[Vec<u8>],
        mut blobs: Vec<Blob>,
        square_size: usize,
        config: &Config,
    ) -> Result<Self, Error> {
        validate_square_size(square_size)?;
        let split = split_txs(txs, pfb_txs, config)?;
        let compact_end = split.tx_shares.len() + split.pfb_shares.len();

        blobs.sort_by_key(Blob::namespace);
        let lens: Vec<usize> = blobs.iter().map(Blob::shares_needed).collect();
        let threshold = config.subtree_root_threshold;
        let non_reserved_start = match lens.first() {
            Some(first) => next_share_index(compact_end, *first, square_size, threshold),
            None => compact_end,
        };
        let (_, indexes) = blob_shares_used_non_interactive_defaults(
            non_reserved_start,
            square_size,
            threshold,
            &lens,
        );

        let mut splitter = sparse::Splitter::new(&config.supported_share_versions);
        for (blob, index) in blobs.iter().zip(indexes) {
            let cursor = non_reserved_start + splitter.count();
            if index < cursor {
                return Err(Error::UnexpectedShareIndex { index, cursor });
            }
            splitter.write_namespace_padding_shares(index - cursor)?;
            splitter.write(blob)?;
        }

        let square = Self::write(
            split.tx_shares,
            split.pfb_shares,
            splitter.export(),
            non_reserved_start,
            square_size,
        )?;
        debug!(
            square_size,
            txs = txs.len(),
            pfb_txs = pfb_txs.len(),
            blobs = blobs.len(),
            non_reserved_start,
            "built square"
        );
        Ok(square)
    }

    /// Builds the smallest square, no wider than `max_square_size`, that holds the block data.
    pub fn build_smallest(
        txs: &[Vec<u8>],
        pfb_txs: &[Vec<u8>],
        mut blobs: Vec<Blob>,
        max_square_size: usize,
        config: &Config,
    ) -> Result<Self, Error> {
        validate_square_size(max_square_size)?;
        let compact_end = compact_shares_used(txs) + compact_shares_used(pfb_txs);
        blobs.sort_by_key(Blob::namespace);
        let lens: Vec<usize> = blobs.iter().map(Blob::shares_needed).collect();
        let threshold = config.subtree_root_threshold;

        let mut square_size = MIN_SQUARE_SIZE;
        while square_size <= max_square_size {
            let (fits, _) = fits_in_square(compact_end, square_size, threshold, &lens);
            if fits {
                return Self::build(txs, pfb_txs, blobs, square_size, config);
            }
            square_size <<= 1;
        }
        let needed = shares_used(compact_end, max_square_size, threshold, &lens);
        warn!(max_square_size, needed, "block data does not fit in square");
        Err(Error::SquareTooSmall {
            square_size: max_square_size,
            needed,
        })
    }

    /// Returns the width of the square.
    pub fn size(&self) -> usize {
        blob_min_square_size(self.0.len())
    }

    pub fn shares(&self) -> &[Share] {
        &self.0
    }

    pub fn into_shares(self) -> Vec<Share> {
        self.0
    }

    /// Returns true if the square holds no block data.
    pub fn is_empty(&self) -> bool {
        matches!(self.0.as_slice(), [share] if share.is_tail_padding())
    }
}

fn validate_square_size(square_size: usize) -> Result<(), Error> {
    if square_size < MIN_SQUARE_SIZE || !square_size.is_power_of_two() {
        return Err(Error::InvalidSquareSize(square_size));
    }
    Ok(())
}

/// Returns the number of compact shares that hold `units`.
fn compact_shares_used(units: &[Vec<u8>]) -> usize {
    let mut counter = Counter::new();
    for unit in units {
        counter.add(unit.len());
    }
    counter.size()
}

/// Returns the index after the last share used by blobs placed after `compact_end`.
fn shares_used(
    compact_end: usize,
    square_size: usize,
    threshold: NonZeroUsize,
    lens: &[usize],
) -> usize {
    let Some(first) = lens.first() else {
        return compact_end;
    };
    let start = next_share_index(compact_end, *first, square_size, threshold);
    let (used, _) = blob_shares_used_non_interactive_defaults(start, square_size, threshold, lens);
    start + used
}

/// Recovers block data from the shares of a square in row-major order.
///
/// Shares of reserved namespaces other than the transaction namespaces (including padding) are
/// ignored.
pub fn merge(shares: &[Share], config: &Config) -> Result<BlockData, Error> {
    let count = shares.len();
    let square_size = blob_min_square_size(count);
    if square_size * square_size != count {
        warn!(count, "share count is not a square");
        return Err(Error::InvalidShareCount(count));
    }

    let mut tx_shares = Vec::new();
    let mut pfb_shares = Vec::new();
    let mut blob_shares = Vec::new();
    for share in shares {
        let namespace = share.namespace();
        if namespace.is_tx() {
            tx_shares.push(share.clone());
        } else if namespace.is_pay_for_blob() {
            pfb_shares.push(share.clone());
        } else if !namespace.is_reserved() {
            blob_shares.push(share.clone());
        }
    }

    let versions = &config.supported_share_versions;
    let data = BlockData {
        txs: compact::parse(&tx_shares, versions)?,
        pfb_txs: compact::parse(&pfb_shares, versions)?,
        blobs: sparse::parse(&blob_shares, versions)?,
        square_size,
    };
    debug!(
        square_size,
        txs = data.txs.len(),
        pfb_txs = data.pfb_txs.len(),
        blobs = data.blobs.len(),
        "merged square"
    );
    Ok(data)
}

/// Recovers block data from the row-major shares of an extended square.
///
/// Only the original (top-left) quadrant is read, so the parity shares may hold arbitrary bytes.
pub fn merge_extended<B: AsRef<[u8]>>(shares: &[B], config: &Config) -> Result<BlockData, Error> {
    let count = shares.len();
    let extended_size = blob_min_square_size(count);
    if extended_size < 2 || extended_size * extended_size != count {
        warn!(count, "share count is not an extended square");
        return Err(Error::InvalidShareCount(count));
    }
    let square_size = extended_size / 2;
    let original = shares
        .chunks(extended_size)
        .take(square_size)
        .flat_map(|row| &row[..square_size])
        .map(|raw| Share::try_from(raw.as_ref()))
        .collect::<Result<Vec<_>, _>>()?;
    merge(&original, config)
}

/// Returns the range of `shares` in `namespace`.
///
/// `shares` must be sorted by namespace. If no share is in `namespace`, the range is empty.
pub fn share_range_for_namespace(
    shares: &[Share],
    namespace: Namespace,
) -> Result<Range<usize>, Error> {
    let Some(start) = shares.iter().position(|s| s.namespace() == namespace) else {
        return Ok(0..0);
    };
    let end = shares[start..]
        .iter()
        .position(|s| s.namespace() != namespace)
        .map_or(shares.len(), |offset| start + offset);
    if shares[end..].iter().any(|s| s.namespace() == namespace) {
        return Err(Error::NonContiguousNamespace(namespace));
    }
    Ok(start..end)
}
