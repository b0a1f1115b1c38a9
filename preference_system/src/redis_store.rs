//! Namespaced preferences over Redis
//!
//! Every key is stored as `<namespace>:<key>`, so several applications can
//! share one server without seeing each other's values.

use crate::errors::PreferencesError;
use crate::manager::PreferencesManager;
use async_trait::async_trait;
use redis::{AsyncCommands, Client};
use std::fmt::Debug;
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Clone)]
pub struct RedisPreferences {
    client: Arc<Client>,
    namespace: String,
    connection_pool: Arc<RwLock<Option<redis::aio::MultiplexedConnection>>>,
}

impl Debug for RedisPreferences {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let connection_status = match self.connection_pool.try_read() {
            Ok(pool) => {
                if pool.is_some() {
                    "connected"
                } else {
                    "no_connection"
                }
            }
            Err(_) => "lock_error",
        };

        f.debug_struct("RedisPreferences")
            .field("namespace", &self.namespace)
            .field("connected", &connection_status)
            .finish()
    }
}

impl RedisPreferences {
    /// Only parses the URL; the connection is opened on first use.
    pub fn new(redis_url: &str, namespace: &str) -> Result<Self, PreferencesError> {
        if namespace.is_empty() {
            return Err(PreferencesError::Configuration(
                "preferences namespace cannot be empty".to_string(),
            ));
        }

        let client = Client::open(redis_url)?;

        Ok(Self {
            client: Arc::new(client),
            namespace: namespace.to_string(),
            connection_pool: Arc::new(RwLock::new(None)),
        })
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Get or create Redis connection
    async fn get_connection(&self) -> Result<redis::aio::MultiplexedConnection, PreferencesError> {
        let mut pool = self.connection_pool.write().await;

        if pool.is_none() {
            tracing::debug!("[PREFERENCES] connecting namespace {}", self.namespace);
            let connection = self.client.get_multiplexed_async_connection().await?;
            *pool = Some(connection);
        }

        Ok(pool
            .as_ref()
            .ok_or_else(|| PreferencesError::Connection("Failed to get connection from pool".into()))?
            .clone())
    }

    pub(crate) fn build_key(&self, key: &str) -> String {
        format!("{}:{}", self.namespace, key)
    }
}

#[async_trait]
impl PreferencesManager for RedisPreferences {
    async fn put(&self, key: &str, value: &[u8]) -> Result<(), PreferencesError> {
        let mut conn = self.get_connection().await?;
        let _: () = conn.set(self.build_key(key), value).await?;
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, PreferencesError> {
        let mut conn = self.get_connection().await?;
        let value: Option<Vec<u8>> = conn.get(self.build_key(key)).await?;
        Ok(value)
    }

    async fn remove(&self, key: &str) -> Result<(), PreferencesError> {
        let mut conn = self.get_connection().await?;
        let _: () = conn.del(self.build_key(key)).await?;
        Ok(())
    }

    async fn contains(&self, key: &str) -> Result<bool, PreferencesError> {
        let mut conn = self.get_connection().await?;
        let exists: bool = conn.exists(self.build_key(key)).await?;
        Ok(exists)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys_are_namespaced() {
        let prefs = RedisPreferences::new("redis://localhost:6379", "app").unwrap();
        assert_eq!(prefs.build_key("theme"), "app:theme");
        assert_eq!(prefs.namespace(), "app");
    }

    #[test]
    fn test_new_does_not_connect() {
        // nothing listens here; construction must still succeed
        let prefs = RedisPreferences::new("redis://127.0.0.1:1", "app").unwrap();
        assert!(format!("{:?}", prefs).contains("no_connection"));
    }

    #[test]
    fn test_invalid_arguments() {
        assert!(matches!(
            RedisPreferences::new("not a url", "app"),
            Err(PreferencesError::ConnectionError(_))
        ));
        assert!(matches!(
            RedisPreferences::new("redis://localhost:6379", ""),
            Err(PreferencesError::Configuration(_))
        ));
    }
}
