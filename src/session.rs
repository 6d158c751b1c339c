//! Persisted Session
//!
//! Key/value storage mirroring the browser Storage API, and the helpers that
//! keep the signed-in user under a fixed key.
//!
//! The session has no expiry. Writers race last-writer-wins; there is no
//! locking between processes.

use crate::models::User;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use thiserror::Error;

/// Storage key holding the serialized session
pub const SESSION_KEY: &str = "referralUser";

/// Errors from a storage backend
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("IO error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type StorageResult<T> = Result<T, StorageError>;

/// String key/value store (`getItem` / `setItem` / `removeItem`)
pub trait SessionStorage: Send + Sync {
    fn get_item(&self, key: &str) -> StorageResult<Option<String>>;

    fn set_item(&self, key: &str, value: &str) -> StorageResult<()>;

    fn remove_item(&self, key: &str) -> StorageResult<()>;
}

/// Storage backed by a JSON object file
///
/// A missing or unparseable file reads as an empty store. Every write
/// rewrites the file.
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> StorageResult<BTreeMap<String, String>> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(source) => {
                return Err(StorageError::Io {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        if content.trim().is_empty() {
            return Ok(BTreeMap::new());
        }

        match serde_json::from_str(&content) {
            Ok(items) => Ok(items),
            Err(e) => {
                // Next write replaces the file
                tracing::warn!(path = ?self.path, error = %e, "Ignoring unreadable storage file");
                Ok(BTreeMap::new())
            }
        }
    }

    fn write_all(&self, items: &BTreeMap<String, String>) -> StorageResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|source| StorageError::Io {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
        }

        let content = serde_json::to_string_pretty(items)?;
        std::fs::write(&self.path, content).map_err(|source| StorageError::Io {
            path: self.path.clone(),
            source,
        })
    }
}

impl SessionStorage for FileStorage {
    fn get_item(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(self.read_all()?.remove(key))
    }

    fn set_item(&self, key: &str, value: &str) -> StorageResult<()> {
        let mut items = self.read_all()?;
        items.insert(key.to_string(), value.to_string());
        self.write_all(&items)
    }

    fn remove_item(&self, key: &str) -> StorageResult<()> {
        let mut items = self.read_all()?;
        if items.remove(key).is_some() {
            self.write_all(&items)?;
        }
        Ok(())
    }
}

/// In-process storage
#[derive(Debug, Default)]
pub struct MemoryStorage {
    items: Mutex<BTreeMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, BTreeMap<String, String>> {
        // A poisoned map is still a valid map
        self.items.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl SessionStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(self.lock().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> StorageResult<()> {
        self.lock().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> StorageResult<()> {
        self.lock().remove(key);
        Ok(())
    }
}

/// Read the persisted session.
///
/// Anything that does not parse as a user (or has an empty id) is removed
/// and reported as no session. Storage failures are logged and also read
/// as no session.
pub fn load_session(storage: &dyn SessionStorage) -> Option<User> {
    let raw = match storage.get_item(SESSION_KEY) {
        Ok(Some(raw)) => raw,
        Ok(None) => return None,
        Err(e) => {
            tracing::warn!(error = %e, "Could not read persisted session");
            return None;
        }
    };

    match serde_json::from_str::<User>(&raw) {
        Ok(user) if !user.id.is_empty() => Some(user),
        Ok(_) => {
            tracing::warn!("Discarding persisted session without a user id");
            discard(storage);
            None
        }
        Err(e) => {
            tracing::warn!(error = %e, "Discarding malformed persisted session");
            discard(storage);
            None
        }
    }
}

fn discard(storage: &dyn SessionStorage) {
    if let Err(e) = storage.remove_item(SESSION_KEY) {
        tracing::warn!(error = %e, "Could not remove persisted session");
    }
}

/// Persist the user exactly as received
pub fn persist_session(storage: &dyn SessionStorage, user: &User) -> StorageResult<()> {
    let raw = serde_json::to_string(user)?;
    storage.set_item(SESSION_KEY, &raw)
}

/// Remove the persisted session
pub fn clear_session(storage: &dyn SessionStorage) -> StorageResult<()> {
    storage.remove_item(SESSION_KEY)
}
