//! Secure preferences in the OS credential store
//!
//! Each key becomes one credential owned by the service id. When an access
//! group is set it is used as the credential target, which shares items
//! between applications of the same group.

use crate::errors::PreferencesError;
use crate::manager::PreferencesManager;
use async_trait::async_trait;
use config::Accessibility;
use keyring::Entry;

#[derive(Debug, Clone)]
pub struct KeychainPreferences {
    service_id: String,
    access_group: Option<String>,
    accessibility: Accessibility,
}

impl KeychainPreferences {
    pub fn new(
        service_id: &str,
        access_group: Option<&str>,
        accessibility: Accessibility,
    ) -> Result<Self, PreferencesError> {
        if service_id.is_empty() {
            return Err(PreferencesError::Configuration(
                "secure preferences need a service id".to_string(),
            ));
        }

        Ok(Self {
            service_id: service_id.to_string(),
            access_group: access_group.filter(|g| !g.is_empty()).map(str::to_string),
            accessibility,
        })
    }

    pub fn service_id(&self) -> &str {
        &self.service_id
    }

    pub fn access_group(&self) -> Option<&str> {
        self.access_group.as_deref()
    }

    /// Platforms without per-item accessibility classes ignore this
    pub fn accessibility(&self) -> Accessibility {
        self.accessibility
    }

    fn entry(&self, key: &str) -> Result<Entry, PreferencesError> {
        let entry = match &self.access_group {
            Some(group) => Entry::new_with_target(group, &self.service_id, key)?,
            None => Entry::new(&self.service_id, key)?,
        };
        Ok(entry)
    }

    /// Credential store calls block, so they run off the async workers
    async fn with_entry<R, F>(&self, key: &str, op: F) -> Result<R, PreferencesError>
    where
        R: Send + 'static,
        F: FnOnce(Entry) -> Result<R, PreferencesError> + Send + 'static,
    {
        let entry = self.entry(key)?;
        tokio::task::spawn_blocking(move || op(entry))
            .await
            .map_err(|e| PreferencesError::Task(e.to_string()))?
    }
}

#[async_trait]
impl PreferencesManager for KeychainPreferences {
    async fn put(&self, key: &str, value: &[u8]) -> Result<(), PreferencesError> {
        let value = value.to_vec();
        self.with_entry(key, move |entry| Ok(entry.set_secret(&value)?))
            .await
    }

    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, PreferencesError> {
        self.with_entry(key, |entry| match entry.get_secret() {
            Ok(secret) => Ok(Some(secret)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(e.into()),
        })
        .await
    }

    async fn remove(&self, key: &str) -> Result<(), PreferencesError> {
        self.with_entry(key, |entry| match entry.delete_credential() {
            Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => Err(e.into()),
        })
        .await
    }
}
