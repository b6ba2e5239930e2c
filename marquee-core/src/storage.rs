use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::Mutex;

/// Keys under which snapshots are persisted. An absent key reads as
/// empty/logged out.
pub mod keys {
    pub const CURRENT_USER: &str = "cinema_user";
    pub const BOOKINGS: &str = "cinema_bookings";
    pub const BOOKED_SEATS: &str = "cinema_booked_seats";
}

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Read of '{key}' failed: {reason}")]
    ReadFailed { key: String, reason: String },

    #[error("Write of '{key}' failed: {reason}")]
    WriteFailed { key: String, reason: String },
}

/// Durable key-value storage for string-serialized snapshots.
///
/// The stores receive a shared handle at construction, so a durable
/// implementation can be swapped for `MemoryStore` in tests.
#[async_trait]
pub trait StateStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    async fn put(&self, key: &str, value: &str) -> Result<(), StorageError>;

    async fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// Non-durable StateStore. Backs tests and profile-less runs.
#[derive(Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl StateStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.lock().await.get(key).cloned())
    }

    async fn put(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries
            .lock()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.entries.lock().await.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn memory_store_round_trip() {
        let store = MemoryStore::new();

        assert_eq!(store.get("cinema_user").await.unwrap(), None);

        store.put("cinema_user", "{\"id\":\"2\"}").await.unwrap();
        assert_eq!(
            store.get("cinema_user").await.unwrap().as_deref(),
            Some("{\"id\":\"2\"}")
        );

        store.remove("cinema_user").await.unwrap();
        assert_eq!(store.get("cinema_user").await.unwrap(), None);

        // Removing an absent key is not an error
        store.remove("cinema_user").await.unwrap();
    }
}
