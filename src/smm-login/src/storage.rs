//! Token storage backends.
//!
//! - [`LocalStorage`]: a JSON key/value file, the desktop stand-in for the
//!   browser's local storage. The token sits under [`TOKEN_KEY`]; other
//!   keys in the file are left untouched.
//! - [`MemoryStorage`]: process-local storage for tests and throwaway sessions.

use std::collections::BTreeMap;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use parking_lot::{Mutex, RwLock};
use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;

use crate::constants::{LOCAL_STORAGE_FILE, TOKEN_KEY};
use crate::utils::set_file_permissions;

/// Errors that can occur while reading or writing stored tokens.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Failed to read the storage file.
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to write the storage file.
    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The storage file is not a JSON object of strings.
    #[error("Corrupt local storage at {path}: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Result type for storage operations.
pub type Result<T> = std::result::Result<T, StorageError>;

/// Persistent home of the session token.
pub trait TokenStore: Send + Sync {
    /// Load the stored token, if any.
    fn load_token(&self) -> Result<Option<SecretString>>;

    /// Store a token, replacing any previous one.
    fn save_token(&self, token: &SecretString) -> Result<()>;

    /// Remove the stored token. Returns true if one was present.
    fn clear_token(&self) -> Result<bool>;
}

/// File-backed key/value storage.
pub struct LocalStorage {
    path: PathBuf,
    // Serializes read-modify-write cycles within this process.
    lock: Mutex<()>,
}

impl LocalStorage {
    /// Storage backed by an explicit file.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    /// Storage backed by the default file inside `home`.
    pub fn in_dir(home: &Path) -> Self {
        Self::new(home.join(LOCAL_STORAGE_FILE))
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get a raw value.
    pub fn get_item(&self, key: &str) -> Result<Option<String>> {
        let _guard = self.lock.lock();
        Ok(self.read_map()?.remove(key))
    }

    /// Set a raw value.
    pub fn set_item(&self, key: &str, value: &str) -> Result<()> {
        let _guard = self.lock.lock();
        let mut map = self.read_map()?;
        map.insert(key.to_string(), value.to_string());
        self.write_map(&map)
    }

    /// Remove a raw value. Returns true if it existed.
    pub fn remove_item(&self, key: &str) -> Result<bool> {
        let _guard = self.lock.lock();
        let mut map = self.read_map()?;
        if map.remove(key).is_none() {
            return Ok(false);
        }
        self.write_map(&map)?;
        Ok(true)
    }

    fn read_map(&self) -> Result<BTreeMap<String, String>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }

        let content = std::fs::read_to_string(&self.path).map_err(|source| StorageError::Read {
            path: self.path.clone(),
            source,
        })?;
        if content.trim().is_empty() {
            return Ok(BTreeMap::new());
        }

        serde_json::from_str(&content).map_err(|source| StorageError::Corrupt {
            path: self.path.clone(),
            source,
        })
    }

    fn write_map(&self, map: &BTreeMap<String, String>) -> Result<()> {
        let write_err = |source| StorageError::Write {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(write_err)?;
        }

        let json = serde_json::to_string_pretty(map).map_err(|source| StorageError::Corrupt {
            path: self.path.clone(),
            source,
        })?;
        let mut file = open_private(&self.path).map_err(write_err)?;
        file.write_all(json.as_bytes()).map_err(write_err)?;
        Ok(())
    }
}

/// Open for truncating write, never exposing the contents beyond the owner.
///
/// New files are created 0600; an existing file is narrowed to 0600 before
/// anything is written.
fn open_private(path: &Path) -> std::io::Result<File> {
    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }
    let file = options.open(path)?;
    set_file_permissions(path)?;
    Ok(file)
}

impl TokenStore for LocalStorage {
    fn load_token(&self) -> Result<Option<SecretString>> {
        Ok(self
            .get_item(TOKEN_KEY)?
            .filter(|token| !token.is_empty())
            .map(SecretString::from))
    }

    fn save_token(&self, token: &SecretString) -> Result<()> {
        self.set_item(TOKEN_KEY, token.expose_secret())?;
        tracing::debug!(path = %self.path.display(), "Session token written to local storage");
        Ok(())
    }

    fn clear_token(&self) -> Result<bool> {
        self.remove_item(TOKEN_KEY)
    }
}

/// In-memory token storage.
#[derive(Default)]
pub struct MemoryStorage {
    token: RwLock<Option<SecretString>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage pre-seeded with a token.
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: RwLock::new(Some(SecretString::from(token.into()))),
        }
    }
}

impl TokenStore for MemoryStorage {
    fn load_token(&self) -> Result<Option<SecretString>> {
        Ok(self
            .token
            .read()
            .as_ref()
            .filter(|token| !token.expose_secret().is_empty())
            .map(|token| SecretString::from(token.expose_secret().to_string())))
    }

    fn save_token(&self, token: &SecretString) -> Result<()> {
        *self.token.write() = Some(SecretString::from(token.expose_secret().to_string()));
        Ok(())
    }

    fn clear_token(&self) -> Result<bool> {
        Ok(self.token.write().take().is_some())
    }
}
