//! File-backed key-value store.
//!
//! Stores each key as one JSON file under a per-user configuration
//! directory. This is the durable store the probe uses by default; tests
//! point it at a temporary directory instead.

use super::{KeyValueStore, StorageError};
use crate::config::get_config;
use std::fs;
use std::path::PathBuf;

/// Key-value store keeping one file per key on disk.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Creates a store rooted at the default location.
    ///
    /// Uses the configured storage directory when one is set, otherwise
    /// `~/.config/http-probe` (or the Windows roaming equivalent).
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Io` if no home directory can be determined.
    pub fn new() -> Result<Self, StorageError> {
        if let Some(dir) = get_config().storage_dir {
            return Ok(Self::with_dir(dir));
        }
        Ok(Self::with_dir(default_storage_dir()?))
    }

    /// Creates a store rooted at an explicit directory.
    pub fn with_dir(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The directory this store reads and writes.
    pub fn dir(&self) -> &PathBuf {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl KeyValueStore for FileStore {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(None);
        }
        Ok(Some(fs::read_to_string(path)?))
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        fs::create_dir_all(&self.dir)?;
        fs::write(self.path_for(key), value)?;
        Ok(())
    }
}

/// Resolves the default per-user storage directory.
fn default_storage_dir() -> Result<PathBuf, StorageError> {
    let config_dir = if let Some(home) = std::env::var_os("HOME") {
        PathBuf::from(home).join(".config")
    } else if let Some(user_profile) = std::env::var_os("USERPROFILE") {
        PathBuf::from(user_profile).join("AppData").join("Roaming")
    } else {
        return Err(StorageError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "Could not determine home directory",
        )));
    };

    Ok(config_dir.join("http-probe"))
}
