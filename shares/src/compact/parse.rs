use super::shares_needed;
use crate::{share::content_index, Error, Share};
use bytes::{Buf, Bytes, BytesMut};
use commonware_codec::{varint, Read};

/// Recovers the units written to a single compact sequence.
///
/// The payload is bounded by the sequence length declared in the first share, so the zero padding
/// of the last share is never mistaken for units.
pub fn parse(shares: &[Share], supported_versions: &[u8]) -> Result<Vec<Bytes>, Error> {
    let Some(first) = shares.first() else {
        return Ok(Vec::new());
    };
    if !first.is_compact_share() {
        return Err(Error::NotCompactNamespace(first.namespace()));
    }
    if !first.is_sequence_start() {
        return Err(Error::MissingSequenceStart);
    }
    for (index, share) in shares.iter().enumerate() {
        share.supports_versions(supported_versions)?;
        if index == 0 {
            continue;
        }
        if share.is_sequence_start() {
            return Err(Error::UnexpectedSequenceStart(index));
        }
        if share.namespace() != first.namespace() {
            return Err(Error::NamespaceMismatch {
                expected: first.namespace(),
                found: share.namespace(),
            });
        }
        let offset = share.reserved_bytes()?;
        if offset != 0 && (offset as usize) < content_index(false, true) {
            return Err(Error::ReservedBytesOutOfRange(offset));
        }
    }

    let sequence_len = first.sequence_len() as usize;
    let expected = shares_needed(sequence_len);
    if expected != shares.len() {
        return Err(Error::SequenceLenMismatch {
            expected,
            found: shares.len(),
        });
    }
    let content_start = content_index(true, true);
    let first_unit = first.reserved_bytes()? as usize;
    if first_unit != content_start {
        return Err(Error::InvalidFirstUnitOffset {
            expected: content_start,
            found: first_unit,
        });
    }

    let mut raw = BytesMut::with_capacity(sequence_len);
    for share in shares {
        raw.extend_from_slice(share.raw_data());
    }
    if raw.len() < sequence_len {
        return Err(Error::TruncatedSequence {
            declared: sequence_len,
            available: raw.len(),
        });
    }
    raw.truncate(sequence_len);
    let mut raw = raw.freeze();

    let mut units = Vec::new();
    while raw.has_remaining() {
        let len: u64 = varint::UInt::<u64>::read_cfg(&mut raw, &())?.0;
        if len > raw.len() as u64 {
            return Err(Error::TruncatedUnit {
                declared: len,
                available: raw.len(),
            });
        }
        units.push(raw.split_to(len as usize));
    }
    Ok(units)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        compact::Splitter, Builder, Namespace, NAMESPACE_SIZE, PAY_FOR_BLOB_NAMESPACE,
        SHARE_INFO_BYTES, SHARE_VERSION_ZERO, TX_NAMESPACE,
    };

    fn split(namespace: Namespace, units: &[Vec<u8>]) -> Vec<Share> {
        let mut splitter = Splitter::new(namespace, SHARE_VERSION_ZERO).unwrap();
        for unit in units {
            splitter.write(unit).unwrap();
        }
        splitter.export().unwrap()
    }

    #[test]
    fn test_empty() {
        assert!(parse(&[], &[SHARE_VERSION_ZERO]).unwrap().is_empty());
    }

    #[test]
    fn test_many_shares() {
        let units: Vec<Vec<u8>> = (0..40).map(|i| vec![i as u8; 97 * i + 3]).collect();
        let shares = split(TX_NAMESPACE, &units);
        assert!(shares.len() > 10);
        assert_eq!(parse(&shares, &[SHARE_VERSION_ZERO]).unwrap(), units);
    }

    #[test]
    fn test_missing_sequence_start() {
        let shares = split(TX_NAMESPACE, &[vec![1u8; 1_000]]);
        assert_eq!(
            parse(&shares[1..], &[SHARE_VERSION_ZERO]),
            Err(Error::MissingSequenceStart)
        );
    }

    #[test]
    fn test_unexpected_sequence_start() {
        let mut shares = split(TX_NAMESPACE, &[vec![1u8; 10]]);
        shares.push(shares[0].clone());
        assert_eq!(
            parse(&shares, &[SHARE_VERSION_ZERO]),
            Err(Error::UnexpectedSequenceStart(1))
        );
    }

    #[test]
    fn test_namespace_mismatch() {
        let mut shares = split(TX_NAMESPACE, &[vec![1u8; 1_000]]);
        let other = split(PAY_FOR_BLOB_NAMESPACE, &[vec![1u8; 1_000]]);
        shares[1] = other[1].clone();
        assert_eq!(
            parse(&shares, &[SHARE_VERSION_ZERO]),
            Err(Error::NamespaceMismatch {
                expected: TX_NAMESPACE,
                found: PAY_FOR_BLOB_NAMESPACE,
            })
        );
    }

    #[test]
    fn test_missing_share() {
        let shares = split(TX_NAMESPACE, &[vec![1u8; 1_000]]);
        assert_eq!(shares.len(), 3);
        assert_eq!(
            parse(&shares[..2], &[SHARE_VERSION_ZERO]),
            Err(Error::SequenceLenMismatch {
                expected: 3,
                found: 2,
            })
        );
    }

    #[test]
    fn test_unsupported_version() {
        let mut splitter = Splitter::new(TX_NAMESPACE, 1).unwrap();
        splitter.write(&[1, 2, 3]).unwrap();
        let shares = splitter.export().unwrap();
        assert_eq!(
            parse(&shares, &[SHARE_VERSION_ZERO]),
            Err(Error::UnsupportedShareVersion(1))
        );
        assert_eq!(parse(&shares, &[0, 1]).unwrap(), vec![vec![1u8, 2, 3]]);
    }

    #[test]
    fn test_truncated_unit() {
        // Declares a 100 byte unit in a sequence of 10 bytes.
        let mut builder = Builder::new(TX_NAMESPACE, SHARE_VERSION_ZERO, true).unwrap();
        builder.maybe_write_reserved_bytes().unwrap();
        builder.add_data(&[100]);
        builder.add_data(&[0xFF; 9]);
        builder.write_sequence_len(10).unwrap();
        builder.zero_pad_if_necessary();
        let share = builder.build().unwrap();
        assert_eq!(
            parse(&[share], &[SHARE_VERSION_ZERO]),
            Err(Error::TruncatedUnit {
                declared: 100,
                available: 9,
            })
        );
    }

    #[test]
    fn test_invalid_first_unit_offset() {
        let mut builder = Builder::new(TX_NAMESPACE, SHARE_VERSION_ZERO, true).unwrap();
        builder.add_data(&[0xFF; 4]);
        builder.maybe_write_reserved_bytes().unwrap();
        builder.add_data(&[1, 0]);
        builder.write_sequence_len(6).unwrap();
        builder.zero_pad_if_necessary();
        let share = builder.build().unwrap();
        assert_eq!(
            parse(&[share], &[SHARE_VERSION_ZERO]),
            Err(Error::InvalidFirstUnitOffset {
                expected: 36,
                found: 40,
            })
        );
    }

    fn with_continuation_reserved_bytes(shares: &[Share], reserved: [u8; 2]) -> Vec<Share> {
        let index = NAMESPACE_SIZE + SHARE_INFO_BYTES;
        let mut raw = shares[1].as_ref().to_vec();
        raw[index..index + 2].copy_from_slice(&reserved);
        let mut tampered = shares.to_vec();
        tampered[1] = Share::new(raw).unwrap();
        tampered
    }

    #[test]
    fn test_continuation_reserved_bytes_out_of_range() {
        let shares = split(TX_NAMESPACE, &[vec![1u8; 1_000]]);
        let tampered = with_continuation_reserved_bytes(&shares, [0xFF, 0xFF]);
        assert_eq!(
            parse(&tampered, &[SHARE_VERSION_ZERO]),
            Err(Error::ReservedBytesOutOfRange(0xFFFF))
        );

        // Points into the prefix of the share.
        let tampered = with_continuation_reserved_bytes(&shares, [0x00, 0x05]);
        assert_eq!(
            parse(&tampered, &[SHARE_VERSION_ZERO]),
            Err(Error::ReservedBytesOutOfRange(5))
        );

        // Untouched shares still parse.
        assert_eq!(
            parse(&shares, &[SHARE_VERSION_ZERO]).unwrap(),
            vec![vec![1u8; 1_000]]
        );
    }

    #[test]
    fn test_truncated_delimiter() {
        // A one byte sequence holding an unfinished varint.
        let mut builder = Builder::new(TX_NAMESPACE, SHARE_VERSION_ZERO, true).unwrap();
        builder.maybe_write_reserved_bytes().unwrap();
        builder.add_data(&[0x80]);
        builder.write_sequence_len(1).unwrap();
        builder.zero_pad_if_necessary();
        let share = builder.build().unwrap();
        assert_eq!(
            parse(&[share], &[SHARE_VERSION_ZERO]),
            Err(Error::EndOfBuffer)
        );
    }
}
