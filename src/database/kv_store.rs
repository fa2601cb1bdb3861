use async_trait::async_trait;

use crate::error::Result;

/// String key-value backend the job collection is persisted through.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>>;

    async fn set(&self, key: &str, value: &str) -> Result<()>;
}
