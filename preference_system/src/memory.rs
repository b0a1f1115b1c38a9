use crate::errors::PreferencesError;
use crate::manager::PreferencesManager;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Process-local preferences, lost on exit
#[derive(Debug, Clone, Default)]
pub struct MemoryPreferences {
    values: Arc<RwLock<HashMap<String, Vec<u8>>>>,
}

impl MemoryPreferences {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PreferencesManager for MemoryPreferences {
    async fn put(&self, key: &str, value: &[u8]) -> Result<(), PreferencesError> {
        self.values
            .write()
            .await
            .insert(key.to_string(), value.to_vec());
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, PreferencesError> {
        Ok(self.values.read().await.get(key).cloned())
    }

    async fn remove(&self, key: &str) -> Result<(), PreferencesError> {
        self.values.write().await.remove(key);
        Ok(())
    }

    async fn contains(&self, key: &str) -> Result<bool, PreferencesError> {
        Ok(self.values.read().await.contains_key(key))
    }
}
