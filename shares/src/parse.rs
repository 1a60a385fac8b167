use crate::{compact, sparse, Error, Namespace, Share};
use bytes::{Bytes, BytesMut};

/// A contiguous run of shares that make up one sequence.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ShareSequence {
    pub namespace: Namespace,
    pub shares: Vec<Share>,
}

impl ShareSequence {
    /// Returns the sequence length declared by the first share.
    pub fn sequence_len(&self) -> Result<u32, Error> {
        let first = self.shares.first().ok_or(Error::MissingSequenceStart)?;
        Ok(first.sequence_len())
    }

    /// Returns true if the sequence is a single padding share.
    pub fn is_padding(&self) -> bool {
        matches!(self.shares.as_slice(), [share] if share.is_padding())
    }

    /// Ensures the number of shares matches the declared sequence length.
    pub fn validate_sequence_len(&self) -> Result<(), Error> {
        let first = self.shares.first().ok_or(Error::MissingSequenceStart)?;
        if self.is_padding() {
            return Ok(());
        }
        let sequence_len = first.sequence_len() as usize;
        let expected = if first.is_compact_share() {
            compact::shares_needed(sequence_len)
        } else {
            sparse::shares_needed(sequence_len)
        };
        if self.shares.len() != expected {
            return Err(Error::SequenceLenMismatch {
                expected,
                found: self.shares.len(),
            });
        }
        Ok(())
    }

    /// Returns the payload of the sequence without the padding of its last share.
    pub fn raw_data(&self) -> Result<Bytes, Error> {
        let sequence_len = self.sequence_len()? as usize;
        let mut data = BytesMut::with_capacity(sequence_len);
        for share in &self.shares {
            data.extend_from_slice(share.raw_data());
        }
        if data.len() < sequence_len {
            return Err(Error::TruncatedSequence {
                declared: sequence_len,
                available: data.len(),
            });
        }
        data.truncate(sequence_len);
        Ok(data.freeze())
    }
}

/// Segments `shares` into sequences and validates the length of each.
///
/// A sequence starts at every share with the sequence start bit set and extends over the
/// continuation shares that follow it, which must share its namespace. If `ignore_padding` is
/// set, sequences made of a single padding share are dropped.
pub fn parse_shares(shares: &[Share], ignore_padding: bool) -> Result<Vec<ShareSequence>, Error> {
    let mut sequences: Vec<ShareSequence> = Vec::new();
    for (index, share) in shares.iter().enumerate() {
        let namespace = share.namespace();
        if share.is_sequence_start() {
            sequences.push(ShareSequence {
                namespace,
                shares: vec![share.clone()],
            });
            continue;
        }
        let Some(current) = sequences.last_mut() else {
            return Err(Error::OrphanContinuation(index));
        };
        if current.namespace != namespace {
            return Err(Error::NamespaceMismatch {
                expected: current.namespace,
                found: namespace,
            });
        }
        current.shares.push(share.clone());
    }

    for sequence in &sequences {
        sequence.validate_sequence_len()?;
    }
    if ignore_padding {
        sequences.retain(|sequence| !sequence.is_padding());
    }
    Ok(sequences)
}
