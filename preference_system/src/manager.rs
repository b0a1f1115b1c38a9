use crate::errors::PreferencesError;
use async_trait::async_trait;
use std::fmt::Debug;

/// A key-value store holding already-encoded bytes under caller keys
#[async_trait]
pub trait PreferencesManager: Send + Sync + Debug {
    async fn put(&self, key: &str, value: &[u8]) -> Result<(), PreferencesError>;

    /// `None` when nothing is stored under `key`
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, PreferencesError>;

    /// Removing a missing key is not an error
    async fn remove(&self, key: &str) -> Result<(), PreferencesError>;

    async fn contains(&self, key: &str) -> Result<bool, PreferencesError> {
        Ok(self.get(key).await?.is_some())
    }
}
