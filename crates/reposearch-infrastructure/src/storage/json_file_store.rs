//! File-backed key-value store.
//!
//! Each key maps to `<base_dir>/<key>.json`. Writes go to a uniquely named
//! temporary file which is fsynced and then renamed over the target, so a
//! crash never leaves a half-written value behind. Writes through one store
//! (and its clones) are serialized.

use async_trait::async_trait;
use reposearch_core::error::{Result, SearchError};
use reposearch_core::storage::KeyValueStore;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

const VALUE_EXTENSION: &str = "json";
const TEMP_EXTENSION: &str = "tmp";

/// Distinguishes temp files of concurrent writers, including other stores
/// rooted at the same directory.
static TEMP_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Key-value store keeping one file per key under a directory.
#[derive(Debug, Clone)]
pub struct JsonFileKeyValueStore {
    base_dir: PathBuf,
    write_lock: Arc<Mutex<()>>,
}

impl JsonFileKeyValueStore {
    /// Creates a store rooted at `base_dir`. The directory is created lazily on
    /// first write.
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    fn value_path(&self, key: &str) -> Result<PathBuf> {
        validate_key(key)?;
        Ok(self.base_dir.join(format!("{key}.{VALUE_EXTENSION}")))
    }

    fn temp_path(&self, key: &str) -> PathBuf {
        let seq = TEMP_COUNTER.fetch_add(1, Ordering::Relaxed);
        self.base_dir.join(format!(
            ".{key}.{}.{seq}.{TEMP_EXTENSION}",
            std::process::id()
        ))
    }
}

/// Keys become file names, so only a conservative character set is allowed.
fn validate_key(key: &str) -> Result<()> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if valid {
        Ok(())
    } else {
        Err(SearchError::data_access(format!("Invalid storage key: {key:?}")))
    }
}

#[async_trait]
impl KeyValueStore for JsonFileKeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.value_path(key)?;
        match tokio::fs::read_to_string(&path).await {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn set(&self, key: &str, value: String) -> Result<()> {
        let path = self.value_path(key)?;
        let _guard = self.write_lock.lock().await;

        tokio::fs::create_dir_all(&self.base_dir).await?;

        let temp_path = self.temp_path(key);
        if let Err(e) = write_and_rename(&temp_path, &path, value.as_bytes()).await {
            let _ = tokio::fs::remove_file(&temp_path).await;
            return Err(e);
        }
        tracing::debug!(key, path = %path.display(), "stored value");
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        let path = self.value_path(key)?;
        let _guard = self.write_lock.lock().await;
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

async fn write_and_rename(temp_path: &Path, path: &Path, bytes: &[u8]) -> Result<()> {
    let mut file = tokio::fs::File::create(temp_path).await?;
    file.write_all(bytes).await?;
    file.sync_all().await?;
    drop(file);

    tokio::fs::rename(temp_path, path).await?;
    Ok(())
}
