use crate::{Blob, Error, Namespace, Share};
use bytes::BytesMut;

/// A blob whose shares are still being collected.
struct Pending {
    namespace: Namespace,
    share_version: u8,
    sequence_len: usize,
    data: BytesMut,
}

impl Pending {
    fn new(share: &Share) -> Self {
        let sequence_len = share.sequence_len() as usize;
        let mut data = BytesMut::with_capacity(sequence_len);
        data.extend_from_slice(share.raw_data());
        Self {
            namespace: share.namespace(),
            share_version: share.version(),
            sequence_len,
            data,
        }
    }

    fn is_complete(&self) -> bool {
        self.data.len() >= self.sequence_len
    }

    fn finish(mut self) -> Result<Blob, Error> {
        if !self.is_complete() {
            return Err(Error::TruncatedSequence {
                declared: self.sequence_len,
                available: self.data.len(),
            });
        }
        self.data.truncate(self.sequence_len);
        Blob::new(self.namespace, self.data.freeze(), self.share_version)
    }
}

/// Recovers the blobs written to sparse shares.
///
/// Padding shares are skipped. Every blob must be complete: a sequence that ends before its
/// declared length is an error, as is a continuation share that does not extend an incomplete
/// blob of the same namespace.
pub fn parse(shares: &[Share], supported_versions: &[u8]) -> Result<Vec<Blob>, Error> {
    let mut blobs = Vec::new();
    let mut pending: Option<Pending> = None;
    for (index, share) in shares.iter().enumerate() {
        share.supports_versions(supported_versions)?;

        if share.is_sequence_start() {
            if let Some(blob) = pending.take() {
                blobs.push(blob.finish()?);
            }
            if !share.is_padding() {
                pending = Some(Pending::new(share));
            }
            continue;
        }

        let Some(open) = pending.as_mut().filter(|open| !open.is_complete()) else {
            return Err(Error::OrphanContinuation(index));
        };
        if share.namespace() != open.namespace {
            return Err(Error::NamespaceMismatch {
                expected: open.namespace,
                found: share.namespace(),
            });
        }
        open.data.extend_from_slice(share.raw_data());
    }
    if let Some(blob) = pending {
        blobs.push(blob.finish()?);
    }
    Ok(blobs)
}
