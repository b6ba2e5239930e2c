use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use marquee_core::storage::{StateStore, StorageError};

/// Durable StateStore: one JSON file per key under a data directory.
/// The directory is the profile; deleting it resets every store to empty.
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

#[async_trait]
impl StateStore for JsonFileStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        match tokio::fs::read_to_string(self.path_for(key)).await {
            Ok(value) => Ok(Some(value)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(StorageError::ReadFailed {
                key: key.to_string(),
                reason: err.to_string(),
            }),
        }
    }

    async fn put(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let write_failed = |err: std::io::Error| StorageError::WriteFailed {
            key: key.to_string(),
            reason: err.to_string(),
        };

        tokio::fs::create_dir_all(&self.dir).await.map_err(write_failed)?;
        tokio::fs::write(self.path_for(key), value)
            .await
            .map_err(write_failed)?;
        tracing::debug!("Persisted '{}' ({} bytes)", key, value.len());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        match tokio::fs::remove_file(self.path_for(key)).await {
            Ok(()) => Ok(()),
            // Absent entry: already the desired state
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(StorageError::WriteFailed {
                key: key.to_string(),
                reason: err.to_string(),
            }),
        }
    }
}
