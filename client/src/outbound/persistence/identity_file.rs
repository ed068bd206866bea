//! File-backed identity store.
//!
//! One JSON file under the user's data directory holds the serialized
//! identity; presence means "optimistically authenticated, pending
//! revalidation". The session cache is the only writer.

use std::fs;
use std::io::ErrorKind as IoErrorKind;
use std::path::PathBuf;

use directories::ProjectDirs;

use crate::domain::Identity;
use crate::domain::ports::{IdentityStore, IdentityStoreError};

/// Fixed storage key: the file name holding the serialized identity.
const IDENTITY_FILE: &str = "identity.json";

/// Identity store writing a single JSON file.
pub struct FileIdentityStore {
    path: PathBuf,
}

impl FileIdentityStore {
    /// Store under the user's platform data directory.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityStoreError::Read`] when no home directory can be
    /// determined for the current user.
    pub fn in_user_data_dir() -> Result<Self, IdentityStoreError> {
        let dirs = ProjectDirs::from("com", "ziplink", "ziplink")
            .ok_or_else(|| IdentityStoreError::read("could not determine a data directory"))?;
        Ok(Self::at(dirs.data_dir().join(IDENTITY_FILE)))
    }

    /// Store at an explicit path.
    pub fn at(path: PathBuf) -> Self {
        Self { path }
    }
}

impl IdentityStore for FileIdentityStore {
    fn load(&self) -> Result<Option<Identity>, IdentityStoreError> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(error) if error.kind() == IoErrorKind::NotFound => return Ok(None),
            Err(error) => return Err(IdentityStoreError::read(error.to_string())),
        };
        serde_json::from_slice(&bytes)
            .map(Some)
            .map_err(|error| IdentityStoreError::read(error.to_string()))
    }

    fn save(&self, identity: &Identity) -> Result<(), IdentityStoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|error| IdentityStoreError::write(error.to_string()))?;
        }
        let payload = serde_json::to_vec_pretty(identity)
            .map_err(|error| IdentityStoreError::write(error.to_string()))?;
        fs::write(&self.path, payload).map_err(|error| IdentityStoreError::write(error.to_string()))
    }

    fn clear(&self) -> Result<(), IdentityStoreError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(error) if error.kind() == IoErrorKind::NotFound => Ok(()),
            Err(error) => Err(IdentityStoreError::write(error.to_string())),
        }
    }
}
