use super::marshal_delimited;
use crate::{
    Builder, Error, Namespace, Share, CONTINUATION_COMPACT_SHARE_CONTENT_SIZE,
    FIRST_COMPACT_SHARE_CONTENT_SIZE,
};
use std::ops::Range;

/// Writes delimited units into a single compact sequence.
///
/// The sequence length of the first share is only known once all units are written, so it is
/// patched in by [Splitter::export].
#[derive(Clone, Debug)]
pub struct Splitter {
    namespace: Namespace,
    share_version: u8,
    shares: Vec<Share>,
    pending: Builder,
    ranges: Vec<Range<usize>>,
}

impl Splitter {
    /// Creates a splitter for a compact namespace.
    pub fn new(namespace: Namespace, share_version: u8) -> Result<Self, Error> {
        if !namespace.is_compact() {
            return Err(Error::NotCompactNamespace(namespace));
        }
        Ok(Self {
            namespace,
            share_version,
            shares: Vec::new(),
            pending: Builder::new(namespace, share_version, true)?,
            ranges: Vec::new(),
        })
    }

    /// Writes `unit` and returns the range of shares it occupies.
    pub fn write(&mut self, unit: &[u8]) -> Result<Range<usize>, Error> {
        let start = self.shares.len();
        self.write_raw(&marshal_delimited(unit))?;
        let range = start..self.count();
        self.ranges.push(range.clone());
        Ok(range)
    }

    fn write_raw(&mut self, mut raw: &[u8]) -> Result<(), Error> {
        self.pending.maybe_write_reserved_bytes()?;
        while let Some(leftover) = self.pending.add_data(raw) {
            self.stack_pending()?;
            raw = leftover;
        }
        if self.pending.available_bytes() == 0 {
            self.stack_pending()?;
        }
        Ok(())
    }

    fn stack_pending(&mut self) -> Result<(), Error> {
        let next = Builder::new(self.namespace, self.share_version, false)?;
        let full = std::mem::replace(&mut self.pending, next);
        self.shares.push(full.build()?);
        Ok(())
    }

    /// Returns the ranges of shares occupied by each unit, in write order.
    pub fn ranges(&self) -> &[Range<usize>] {
        &self.ranges
    }

    /// Returns the number of shares [Splitter::export] would return.
    pub fn count(&self) -> usize {
        if self.pending.is_empty_share() {
            return self.shares.len();
        }
        self.shares.len() + 1
    }

    /// Returns true if no unit has been written.
    pub fn is_empty(&self) -> bool {
        self.count() == 0
    }

    /// Returns the shares of the sequence written so far.
    ///
    /// The splitter is left untouched, so more units may be written afterwards.
    pub fn export(&self) -> Result<Vec<Share>, Error> {
        let mut shares = self.shares.clone();
        let mut padding = 0;
        if !self.pending.is_empty_share() {
            let mut pending = self.pending.clone();
            padding = pending.zero_pad_if_necessary();
            shares.push(pending.build()?);
        }
        let Some(first) = shares.first() else {
            return Ok(shares);
        };

        let sequence_len = FIRST_COMPACT_SHARE_CONTENT_SIZE
            + (shares.len() - 1) * CONTINUATION_COMPACT_SHARE_CONTENT_SIZE
            - padding;
        let sequence_len =
            u32::try_from(sequence_len).map_err(|_| Error::SequenceTooLarge(sequence_len))?;
        let mut builder = Builder::import(first);
        builder.write_sequence_len(sequence_len)?;
        shares[0] = builder.build()?;
        Ok(shares)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        compact::{parse, raw_unit_size},
        PAY_FOR_BLOB_NAMESPACE, SHARE_SIZE, SHARE_VERSION_ZERO, TX_NAMESPACE,
    };

    fn splitter() -> Splitter {
        Splitter::new(TX_NAMESPACE, SHARE_VERSION_ZERO).unwrap()
    }

    #[test]
    fn test_new_rejects_sparse_namespace() {
        let namespace = Namespace::new_v0(&[1, 1]).unwrap();
        assert_eq!(
            Splitter::new(namespace, SHARE_VERSION_ZERO).unwrap_err(),
            Error::NotCompactNamespace(namespace)
        );
    }

    #[test]
    fn test_empty() {
        let splitter = splitter();
        assert!(splitter.is_empty());
        assert_eq!(splitter.count(), 0);
        assert!(splitter.export().unwrap().is_empty());
    }

    #[test]
    fn test_round_trip_boundary_sizes() {
        let one_share = raw_unit_size(FIRST_COMPACT_SHARE_CONTENT_SIZE);
        let two_shares = raw_unit_size(
            FIRST_COMPACT_SHARE_CONTENT_SIZE + CONTINUATION_COMPACT_SHARE_CONTENT_SIZE,
        );
        let units = vec![vec![1u8; 10], vec![2u8; one_share], vec![3u8; two_shares]];

        let mut splitter = splitter();
        for unit in &units {
            splitter.write(unit).unwrap();
        }
        let shares = splitter.export().unwrap();
        assert_eq!(shares.len(), splitter.count());
        assert_eq!(parse(&shares, &[SHARE_VERSION_ZERO]).unwrap(), units);
    }

    #[test]
    fn test_unit_filling_first_share() {
        let unit = vec![7u8; raw_unit_size(FIRST_COMPACT_SHARE_CONTENT_SIZE)];
        let mut splitter = splitter();
        assert_eq!(splitter.write(&unit).unwrap(), 0..1);
        assert_eq!(splitter.count(), 1);

        let shares = splitter.export().unwrap();
        assert_eq!(shares.len(), 1);
        assert_eq!(shares[0].sequence_len() as usize, FIRST_COMPACT_SHARE_CONTENT_SIZE);

        // The next unit starts a new share.
        assert_eq!(splitter.write(&[1]).unwrap(), 1..2);
    }

    #[test]
    fn test_empty_unit() {
        let mut splitter = splitter();
        splitter.write(&[]).unwrap();
        let shares = splitter.export().unwrap();
        assert_eq!(shares.len(), 1);
        assert_eq!(shares[0].sequence_len(), 1);
        assert_eq!(
            parse(&shares, &[SHARE_VERSION_ZERO]).unwrap(),
            vec![Vec::<u8>::new()]
        );
    }

    #[test]
    fn test_ranges() {
        let mut splitter = Splitter::new(PAY_FOR_BLOB_NAMESPACE, SHARE_VERSION_ZERO).unwrap();
        splitter.write(&[1u8; 100]).unwrap();
        splitter.write(&[2u8; 1_000]).unwrap();
        splitter.write(&[3u8; 10]).unwrap();
        assert_eq!(splitter.ranges(), &[0..1, 0..3, 2..3]);
        assert_eq!(splitter.count(), 3);
    }

    #[test]
    fn test_reserved_bytes() {
        let mut splitter = splitter();
        splitter.write(&[1u8; 600]).unwrap();
        splitter.write(&[2u8; 10]).unwrap();
        let shares = splitter.export().unwrap();
        assert_eq!(shares.len(), 2);

        // First unit begins right after the prefix of the first share.
        assert_eq!(
            shares[0].reserved_bytes().unwrap() as usize,
            SHARE_SIZE - FIRST_COMPACT_SHARE_CONTENT_SIZE
        );

        // Second unit begins after the 602 - 476 = 126 bytes spilled into the second share.
        let prefix = SHARE_SIZE - CONTINUATION_COMPACT_SHARE_CONTENT_SIZE;
        assert_eq!(shares[1].reserved_bytes().unwrap() as usize, prefix + 126);
        assert_eq!(shares[1].raw_data_using_reserved().unwrap()[0], 10);
    }

    #[test]
    fn test_export_is_repeatable() {
        let mut splitter = splitter();
        splitter.write(&[1u8; 50]).unwrap();
        let first = splitter.export().unwrap();
        assert_eq!(splitter.export().unwrap(), first);

        splitter.write(&[2u8; 50]).unwrap();
        let second = splitter.export().unwrap();
        assert_eq!(second.len(), 1);
        assert_eq!(second[0].sequence_len(), 102);
        assert_eq!(
            parse(&second, &[SHARE_VERSION_ZERO]).unwrap(),
            vec![vec![1u8; 50], vec![2u8; 50]]
        );
    }
}
