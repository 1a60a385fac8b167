use super::shares_needed;
use crate::{padding, Blob, Builder, Error, Share};
use tracing::trace;

/// Writes blobs, each as its own sequence of sparse shares.
#[derive(Clone, Debug)]
pub struct Splitter {
    supported_versions: Vec<u8>,
    shares: Vec<Share>,
}

impl Splitter {
    /// Creates a splitter that accepts blobs with any of `supported_versions`.
    pub fn new(supported_versions: &[u8]) -> Self {
        Self {
            supported_versions: supported_versions.to_vec(),
            shares: Vec::new(),
        }
    }

    /// Writes the shares of `blob`.
    pub fn write(&mut self, blob: &Blob) -> Result<(), Error> {
        let version = blob.share_version();
        if !self.supported_versions.contains(&version) {
            return Err(Error::UnsupportedShareVersion(version));
        }
        let namespace = blob.namespace();
        let len = blob.data().len();
        let sequence_len = u32::try_from(len).map_err(|_| Error::BlobTooLarge(len))?;

        let mut builder = Builder::new(namespace, version, true)?;
        builder.write_sequence_len(sequence_len)?;
        let mut data = blob.data().as_ref();
        while let Some(leftover) = builder.add_data(data) {
            self.shares.push(builder.build()?);
            builder = Builder::new(namespace, version, false)?;
            data = leftover;
        }
        builder.zero_pad_if_necessary();
        self.shares.push(builder.build()?);
        Ok(())
    }

    /// Removes the blob whose first share is at `index`, along with the namespace padding that
    /// directly follows it. Returns the number of shares removed.
    pub fn remove_blob(&mut self, index: usize) -> Result<usize, Error> {
        let Some(first) = self.shares.get(index) else {
            return Err(Error::NoBlobAtIndex(index));
        };
        if !first.is_sequence_start() || first.is_namespace_padding() {
            return Err(Error::NoBlobAtIndex(index));
        }
        let namespace = first.namespace();
        let mut end = index + shares_needed(first.sequence_len() as usize);
        if end > self.shares.len() {
            return Err(Error::NoBlobAtIndex(index));
        }
        while end < self.shares.len()
            && self.shares[end].is_namespace_padding()
            && self.shares[end].namespace() == namespace
        {
            end += 1;
        }
        self.shares.drain(index..end);
        let removed = end - index;
        trace!(index, removed, %namespace, "removed blob");
        Ok(removed)
    }

    /// Appends `count` padding shares in the namespace of the last written share.
    pub fn write_namespace_padding_shares(&mut self, count: usize) -> Result<(), Error> {
        if count == 0 {
            return Ok(());
        }
        let Some(last) = self.shares.last() else {
            return Err(Error::EmptySplitter);
        };
        let padding = padding::namespace_padding_shares(last.namespace(), last.version(), count)?;
        self.shares.extend(padding);
        Ok(())
    }

    /// Returns the number of shares written.
    pub fn count(&self) -> usize {
        self.shares.len()
    }

    /// Returns the shares written so far.
    pub fn export(&self) -> Vec<Share> {
        self.shares.clone()
    }
}
