use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::database::kv_store::KeyValueStore;
use crate::error::Result;

/// Process-local store, used when no database is configured and in tests.
#[derive(Debug, Default)]
pub struct MemoryKeyValueStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KeyValueStore for MemoryKeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        self.entries
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn set_overwrites_previous_value() {
        let store = MemoryKeyValueStore::new();
        assert_eq!(store.get("jobs").await.unwrap(), None);

        store.set("jobs", "[]").await.unwrap();
        store.set("jobs", "[1]").await.unwrap();

        assert_eq!(store.get("jobs").await.unwrap().as_deref(), Some("[1]"));
    }
}
