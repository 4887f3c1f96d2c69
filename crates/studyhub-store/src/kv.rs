//! JSON key/value storage.
//!
//! Values are stored as raw JSON text; typing happens one level up in
//! [`StudyProgress`](crate::StudyProgress). Keys are independent: there is no
//! cross-key transaction.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use async_trait::async_trait;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{debug, warn};

use studyhub_core::{defaults, Error, Result};

/// Raw JSON storage backend.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Stored JSON text for `key`, `None` when the key was never written.
    async fn get_raw(&self, key: &str) -> Result<Option<String>>;

    /// Replace the value of `key`.
    async fn put_raw(&self, key: &str, json: &str) -> Result<()>;

    /// Delete `key`. Deleting a missing key is not an error.
    async fn remove(&self, key: &str) -> Result<()>;
}

fn check_key(key: &str) -> Result<()> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '_');
    if valid {
        Ok(())
    } else {
        Err(Error::Storage(format!("invalid key '{}'", key)))
    }
}

// =============================================================================
// FILE STORE
// =============================================================================

/// One `<key>.json` file per key under a data directory.
pub struct FileStore {
    base_path: PathBuf,
}

impl FileStore {
    /// Open (and create if needed) the data directory.
    pub async fn open(base_path: impl Into<PathBuf>) -> Result<Self> {
        let base_path = base_path.into();
        fs::create_dir_all(&base_path).await.map_err(|e| {
            Error::Storage(format!("create_dir_all({}): {}", base_path.display(), e))
        })?;
        debug!(path = %base_path.display(), "File store opened");
        Ok(Self { base_path })
    }

    /// Open the directory named by `STUDYHUB_DATA_DIR`.
    pub async fn from_env() -> Result<Self> {
        let dir = std::env::var("STUDYHUB_DATA_DIR")
            .unwrap_or_else(|_| defaults::DATA_DIR.to_string());
        Self::open(dir).await
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.base_path.join(format!("{}.json", key))
    }
}

#[async_trait]
impl KeyValueStore for FileStore {
    async fn get_raw(&self, key: &str) -> Result<Option<String>> {
        check_key(key)?;
        match fs::read_to_string(self.path_for(key)).await {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn put_raw(&self, key: &str, json: &str) -> Result<()> {
        check_key(key)?;
        let full_path = self.path_for(key);

        // temp file + rename
        let temp_path = full_path.with_extension("json.tmp");
        if let Err(e) = write_then_rename(&temp_path, &full_path, json).await {
            if let Err(cleanup) = fs::remove_file(&temp_path).await {
                if cleanup.kind() != std::io::ErrorKind::NotFound {
                    warn!(temp_path = %temp_path.display(), error = %cleanup, "store: temp cleanup failed");
                }
            }
            return Err(e.into());
        }
        debug!(key, bytes = json.len(), "store: write");
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        check_key(key)?;
        match fs::remove_file(self.path_for(key)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

async fn write_then_rename(temp_path: &Path, full_path: &Path, json: &str) -> std::io::Result<()> {
    let mut file = fs::File::create(temp_path).await.map_err(|e| {
        warn!(temp_path = %temp_path.display(), error = %e, "store: File::create failed");
        e
    })?;
    file.write_all(json.as_bytes()).await.map_err(|e| {
        warn!(temp_path = %temp_path.display(), error = %e, "store: write failed");
        e
    })?;
    file.sync_all().await?;
    drop(file);

    fs::rename(temp_path, full_path).await.map_err(|e| {
        warn!(from = %temp_path.display(), to = %full_path.display(), error = %e, "store: rename failed");
        e
    })
}

// =============================================================================
// MEMORY STORE
// =============================================================================

/// In-process store for tests.
#[derive(Default)]
pub struct MemoryStore {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn values(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        self.values
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get_raw(&self, key: &str) -> Result<Option<String>> {
        check_key(key)?;
        Ok(self.values().get(key).cloned())
    }

    async fn put_raw(&self, key: &str, json: &str) -> Result<()> {
        check_key(key)?;
        self.values().insert(key.to_string(), json.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        check_key(key)?;
        self.values().remove(key);
        Ok(())
    }
}
