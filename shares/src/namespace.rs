//! Namespaces partition shares into ordered, independent streams.

use crate::Error;
use commonware_utils::hex;
use std::fmt::{Debug, Display};

/// The size of the namespace version in bytes.
pub const NAMESPACE_VERSION_SIZE: usize = 1;

/// The size of the namespace ID in bytes.
pub const NAMESPACE_ID_SIZE: usize = 28;

/// The size of a namespace (version and ID) in bytes.
pub const NAMESPACE_SIZE: usize = NAMESPACE_VERSION_SIZE + NAMESPACE_ID_SIZE;

/// The namespace version used by users and by the primary reserved namespaces.
pub const NAMESPACE_VERSION_ZERO: u8 = 0;

/// The namespace version used by the secondary reserved namespaces.
pub const NAMESPACE_VERSION_MAX: u8 = u8::MAX;

/// The number of leading zero bytes in every version 0 namespace ID.
pub const NAMESPACE_VERSION_ZERO_PREFIX_SIZE: usize = 18;

/// The number of user-settable bytes in a version 0 namespace ID.
pub const NAMESPACE_VERSION_ZERO_ID_SIZE: usize =
    NAMESPACE_ID_SIZE - NAMESPACE_VERSION_ZERO_PREFIX_SIZE;

/// Namespace of ordinary transactions.
pub const TX_NAMESPACE: Namespace = Namespace::primary_reserved(1);

/// Namespace reserved for intermediate state roots.
pub const INTERMEDIATE_STATE_ROOTS_NAMESPACE: Namespace = Namespace::primary_reserved(2);

/// Namespace of pay-for-blob transactions.
pub const PAY_FOR_BLOB_NAMESPACE: Namespace = Namespace::primary_reserved(4);

/// Namespace of the padding between the compact shares and the first blob.
pub const PRIMARY_RESERVED_PADDING_NAMESPACE: Namespace = Namespace::primary_reserved(0xFF);

/// The largest primary reserved namespace.
pub const MAX_PRIMARY_RESERVED_NAMESPACE: Namespace = Namespace::primary_reserved(0xFF);

/// The smallest secondary reserved namespace.
pub const MIN_SECONDARY_RESERVED_NAMESPACE: Namespace = Namespace {
    version: NAMESPACE_VERSION_MAX,
    id: [0; NAMESPACE_ID_SIZE],
};

/// Namespace of the padding after the last blob in a square.
pub const TAIL_PADDING_NAMESPACE: Namespace = Namespace::secondary_reserved(0xFE);

/// Namespace of erasure coded parity shares.
pub const PARITY_SHARES_NAMESPACE: Namespace = Namespace::secondary_reserved(0xFF);

/// An ordered identifier of a stream of shares.
///
/// Namespaces are ordered by their raw bytes: the version first, then the ID. Reserved
/// namespaces occupy the lowest and highest ranges, user namespaces sit in between.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Namespace {
    version: u8,
    id: [u8; NAMESPACE_ID_SIZE],
}

impl Namespace {
    /// Creates a namespace from a version and ID, validating the pair.
    pub fn new(version: u8, id: &[u8]) -> Result<Self, Error> {
        let id: [u8; NAMESPACE_ID_SIZE] = id
            .try_into()
            .map_err(|_| Error::InvalidNamespaceSize(NAMESPACE_VERSION_SIZE + id.len()))?;
        let namespace = Self { version, id };
        namespace.validate()?;
        Ok(namespace)
    }

    /// Creates a version 0 namespace, left-padding `sub_id` with zeros.
    pub fn new_v0(sub_id: &[u8]) -> Result<Self, Error> {
        if sub_id.len() > NAMESPACE_VERSION_ZERO_ID_SIZE {
            return Err(Error::SubIdTooLarge(sub_id.len()));
        }
        let mut id = [0u8; NAMESPACE_ID_SIZE];
        id[NAMESPACE_ID_SIZE - sub_id.len()..].copy_from_slice(sub_id);
        Ok(Self {
            version: NAMESPACE_VERSION_ZERO,
            id,
        })
    }

    /// Parses a namespace from its serialized form.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, Error> {
        if bytes.len() != NAMESPACE_SIZE {
            return Err(Error::InvalidNamespaceSize(bytes.len()));
        }
        Self::new(bytes[0], &bytes[NAMESPACE_VERSION_SIZE..])
    }

    const fn primary_reserved(last: u8) -> Self {
        let mut id = [0u8; NAMESPACE_ID_SIZE];
        id[NAMESPACE_ID_SIZE - 1] = last;
        Self {
            version: NAMESPACE_VERSION_ZERO,
            id,
        }
    }

    const fn secondary_reserved(last: u8) -> Self {
        let mut id = [0xFF; NAMESPACE_ID_SIZE];
        id[NAMESPACE_ID_SIZE - 1] = last;
        Self {
            version: NAMESPACE_VERSION_MAX,
            id,
        }
    }

    fn validate(&self) -> Result<(), Error> {
        match self.version {
            NAMESPACE_VERSION_ZERO => {
                if self.id[..NAMESPACE_VERSION_ZERO_PREFIX_SIZE]
                    .iter()
                    .any(|b| *b != 0)
                {
                    return Err(Error::InvalidNamespacePrefix);
                }
                Ok(())
            }
            NAMESPACE_VERSION_MAX => Ok(()),
            version => Err(Error::UnsupportedNamespaceVersion(version)),
        }
    }

    /// Returns the namespace version.
    pub fn version(&self) -> u8 {
        self.version
    }

    /// Returns the namespace ID.
    pub fn id(&self) -> &[u8; NAMESPACE_ID_SIZE] {
        &self.id
    }

    /// Returns the serialized namespace (version followed by ID).
    pub fn to_bytes(&self) -> [u8; NAMESPACE_SIZE] {
        let mut out = [0u8; NAMESPACE_SIZE];
        out[0] = self.version;
        out[NAMESPACE_VERSION_SIZE..].copy_from_slice(&self.id);
        out
    }

    pub fn is_tx(&self) -> bool {
        *self == TX_NAMESPACE
    }

    pub fn is_pay_for_blob(&self) -> bool {
        *self == PAY_FOR_BLOB_NAMESPACE
    }

    pub fn is_primary_reserved_padding(&self) -> bool {
        *self == PRIMARY_RESERVED_PADDING_NAMESPACE
    }

    pub fn is_tail_padding(&self) -> bool {
        *self == TAIL_PADDING_NAMESPACE
    }

    pub fn is_parity_shares(&self) -> bool {
        *self == PARITY_SHARES_NAMESPACE
    }

    /// Returns true if shares in this namespace use the compact encoding.
    pub fn is_compact(&self) -> bool {
        self.is_tx() || self.is_pay_for_blob()
    }

    pub fn is_primary_reserved(&self) -> bool {
        self.version == NAMESPACE_VERSION_ZERO && *self <= MAX_PRIMARY_RESERVED_NAMESPACE
    }

    pub fn is_secondary_reserved(&self) -> bool {
        *self >= MIN_SECONDARY_RESERVED_NAMESPACE
    }

    /// Returns true if the namespace is reserved for protocol use.
    pub fn is_reserved(&self) -> bool {
        self.is_primary_reserved() || self.is_secondary_reserved()
    }

    /// Returns true if users may submit blobs under this namespace.
    pub fn is_usable_for_blob(&self) -> bool {
        self.version == NAMESPACE_VERSION_ZERO && !self.is_reserved()
    }
}

impl TryFrom<&[u8]> for Namespace {
    type Error = Error;

    fn try_from(value: &[u8]) -> Result<Self, Self::Error> {
        Self::from_bytes(value)
    }
}

impl Display for Namespace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", hex(&self.to_bytes()))
    }
}

impl Debug for Namespace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Namespace({self})")
    }
}
