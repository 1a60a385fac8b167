use crate::{Error, Namespace, MAX_SHARE_VERSION};
use bytes::Bytes;

/// Data submitted by a user under its own namespace.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Blob {
    namespace: Namespace,
    data: Bytes,
    share_version: u8,
}

impl Blob {
    /// Creates a blob, rejecting reserved namespaces, empty data, and invalid share versions.
    pub fn new(
        namespace: Namespace,
        data: impl Into<Bytes>,
        share_version: u8,
    ) -> Result<Self, Error> {
        if !namespace.is_usable_for_blob() {
            return Err(Error::ReservedBlobNamespace(namespace));
        }
        let data = data.into();
        if data.is_empty() {
            return Err(Error::EmptyBlob);
        }
        if u32::try_from(data.len()).is_err() {
            return Err(Error::BlobTooLarge(data.len()));
        }
        if share_version > MAX_SHARE_VERSION {
            return Err(Error::ShareVersionTooLarge(share_version));
        }
        Ok(Self {
            namespace,
            data,
            share_version,
        })
    }

    pub fn namespace(&self) -> Namespace {
        self.namespace
    }

    pub fn data(&self) -> &Bytes {
        &self.data
    }

    pub fn share_version(&self) -> u8 {
        self.share_version
    }

    /// Returns the number of sparse shares the blob occupies.
    pub fn shares_needed(&self) -> usize {
        crate::sparse::shares_needed(self.data.len())
    }
}
