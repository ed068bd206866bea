//! Port for durable storage of the cached identity.

use crate::domain::Identity;

/// Errors raised by identity store adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdentityStoreError {
    /// Reading or decoding the stored identity failed.
    #[error("identity store read failed: {message}")]
    Read {
        /// Adapter-provided failure description.
        message: String,
    },
    /// Writing or removing the stored identity failed.
    #[error("identity store write failed: {message}")]
    Write {
        /// Adapter-provided failure description.
        message: String,
    },
}

impl IdentityStoreError {
    /// Construct a [`IdentityStoreError::Read`].
    pub fn read(message: impl Into<String>) -> Self {
        Self::Read {
            message: message.into(),
        }
    }

    /// Construct a [`IdentityStoreError::Write`].
    pub fn write(message: impl Into<String>) -> Self {
        Self::Write {
            message: message.into(),
        }
    }
}

/// Durable storage for the serialized identity under one fixed key.
///
/// Single-owner: only the session cache writes through this port, keeping the
/// stored value and the in-memory identity consistent on every mutation.
#[cfg_attr(test, mockall::automock)]
pub trait IdentityStore: Send + Sync {
    /// Load the persisted identity, if any.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityStoreError::Read`] when the stored value exists but
    /// cannot be read or decoded.
    fn load(&self) -> Result<Option<Identity>, IdentityStoreError>;

    /// Persist the identity, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityStoreError::Write`] when the value cannot be stored.
    fn save(&self, identity: &Identity) -> Result<(), IdentityStoreError>;

    /// Remove the persisted identity; absent state is not an error.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityStoreError::Write`] when removal fails for reasons
    /// other than the value already being absent.
    fn clear(&self) -> Result<(), IdentityStoreError>;
}
