use crate::{compact::Splitter, Config, Error, Share, PAY_FOR_BLOB_NAMESPACE, TX_NAMESPACE};
use std::ops::Range;

/// The compact shares of a block's transactions.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SplitTxs {
    pub tx_shares: Vec<Share>,
    pub pfb_shares: Vec<Share>,

    /// Shares occupied by each ordinary transaction.
    pub tx_ranges: Vec<Range<usize>>,

    /// Shares occupied by each pay-for-blob transaction, counted from the first tx share.
    pub pfb_ranges: Vec<Range<usize>>,
}

/// Splits ordinary and pay-for-blob transactions into compact shares.
///
/// The shares are written with [Config::compact_share_version], so they can be parsed with the
/// same `config`.
pub fn split_txs(txs: &[Vec<u8>], pfb_txs: &[Vec<u8>], config: &Config) -> Result<SplitTxs, Error> {
    let version = config.compact_share_version()?;
    let mut tx_splitter = Splitter::new(TX_NAMESPACE, version)?;
    for tx in txs {
        tx_splitter.write(tx)?;
    }
    let mut pfb_splitter = Splitter::new(PAY_FOR_BLOB_NAMESPACE, version)?;
    for tx in pfb_txs {
        pfb_splitter.write(tx)?;
    }

    let tx_shares = tx_splitter.export()?;
    let offset = tx_shares.len();
    let pfb_ranges = pfb_splitter
        .ranges()
        .iter()
        .map(|range| range.start + offset..range.end + offset)
        .collect();
    Ok(SplitTxs {
        tx_ranges: tx_splitter.ranges().to_vec(),
        tx_shares,
        pfb_shares: pfb_splitter.export()?,
        pfb_ranges,
    })
}
