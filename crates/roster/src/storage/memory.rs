//! In-memory key-value storage.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::KeyValueStore;
use crate::error::Result;

/// Volatile [`KeyValueStore`] backed by a shared map.
///
/// Clones share the same map, which lets tests change a slot behind the
/// back of a component that owns another handle.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    items: Arc<Mutex<BTreeMap<String, String>>>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self.items.lock().await.get(key).cloned())
    }

    async fn set_item(&self, key: &str, value: &str) -> Result<()> {
        self.items
            .lock()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove_item(&self, key: &str) -> Result<()> {
        self.items.lock().await.remove(key);
        Ok(())
    }

    async fn all_keys(&self) -> Result<Vec<String>> {
        Ok(self.items.lock().await.keys().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_roundtrip_and_remove() {
        let store = MemoryStore::new();
        assert_eq!(store.get_item("k").await.unwrap(), None);

        store.set_item("k", "v").await.unwrap();
        assert_eq!(store.get_item("k").await.unwrap(), Some("v".to_string()));

        store.remove_item("k").await.unwrap();
        assert!(store.all_keys().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_clones_share_state() {
        let store = MemoryStore::new();
        let handle = store.clone();
        handle.set_item("k", "v").await.unwrap();

        assert_eq!(store.all_keys().await.unwrap(), vec!["k".to_string()]);
    }
}
