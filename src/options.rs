//! Builder options for every manager kind
//!
//! An option is a declarative description of one manager. Its name is the
//! registry key: two options naming the same resource share one instance,
//! so secrets (encryption keys) and access levels are left out of it.

use crate::errors::StowageError;
use config::{Accessibility, BaseDirectory, PreferencesConfig};
use file_system::{FileManager, FileRoots, LocalFileStore};
use preference_system::{KeychainPreferences, PreferencesManager, RedisPreferences};
use signal_system::{NoopSync, SyncManager};
use std::fmt;
use std::sync::Arc;
use store_object::{DatabaseManager, SqliteDatabase};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ManagerKind {
    Database,
    Preferences,
    Files,
    Sync,
}

impl ManagerKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ManagerKind::Database => "database",
            ManagerKind::Preferences => "preferences",
            ManagerKind::Files => "files",
            ManagerKind::Sync => "sync",
        }
    }
}

impl fmt::Display for ManagerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Declarative configuration that can build one manager
pub trait BuilderOption {
    type Manager: ?Sized + Send + Sync + 'static;

    const KIND: ManagerKind;

    /// Registry key, unique within `KIND`
    fn name(&self) -> String;

    fn build(&self) -> Result<Arc<Self::Manager>, StowageError>;
}

fn external_name(kind: ManagerKind, name: &str) -> String {
    format!("{}:external:{}", kind, name)
}

/// Key material for an encrypted database
#[derive(Clone, PartialEq, Eq)]
pub struct Encryption {
    key: String,
}

impl Encryption {
    pub fn key(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }

    pub fn as_key(&self) -> &str {
        &self.key
    }
}

impl fmt::Debug for Encryption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Encryption").field("key", &"<redacted>").finish()
    }
}

#[derive(Clone)]
pub enum DatabaseOption {
    /// SQLite file, or `:memory:`
    Embedded {
        path: String,
        encryption: Option<Encryption>,
    },
    External {
        instance: Arc<dyn DatabaseManager>,
        name: String,
    },
}

impl DatabaseOption {
    pub fn embedded(path: impl Into<String>) -> Self {
        DatabaseOption::Embedded {
            path: path.into(),
            encryption: None,
        }
    }

    pub fn encrypted(path: impl Into<String>, encryption: Encryption) -> Self {
        DatabaseOption::Embedded {
            path: path.into(),
            encryption: Some(encryption),
        }
    }

    pub fn external(instance: Arc<dyn DatabaseManager>, name: impl Into<String>) -> Self {
        DatabaseOption::External {
            instance,
            name: name.into(),
        }
    }
}

impl fmt::Debug for DatabaseOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("DatabaseOption").field(&self.name()).finish()
    }
}

impl BuilderOption for DatabaseOption {
    type Manager = dyn DatabaseManager;

    const KIND: ManagerKind = ManagerKind::Database;

    fn name(&self) -> String {
        match self {
            DatabaseOption::Embedded { path, .. } => format!("database:sqlite:{}", path),
            DatabaseOption::External { name, .. } => external_name(Self::KIND, name),
        }
    }

    fn build(&self) -> Result<Arc<dyn DatabaseManager>, StowageError> {
        match self {
            DatabaseOption::Embedded { path, encryption } => {
                let key = encryption.as_ref().map(Encryption::as_key);
                let database = SqliteDatabase::open(path, key)?;
                Ok(Arc::new(database))
            }
            DatabaseOption::External { instance, .. } => Ok(Arc::clone(instance)),
        }
    }
}

#[derive(Clone)]
pub enum PreferencesOption {
    /// Plain key-value store; keys are stored as `<namespace>:<key>`
    Namespace { namespace: String, redis_url: String },
    /// OS credential store
    Secure {
        service_id: String,
        access_group: Option<String>,
        accessibility: Accessibility,
    },
    External {
        instance: Arc<dyn PreferencesManager>,
        name: String,
    },
}

impl PreferencesOption {
    pub fn namespace(namespace: impl Into<String>, redis_url: impl Into<String>) -> Self {
        PreferencesOption::Namespace {
            namespace: namespace.into(),
            redis_url: redis_url.into(),
        }
    }

    pub fn secure(service_id: impl Into<String>) -> Self {
        PreferencesOption::Secure {
            service_id: service_id.into(),
            access_group: None,
            accessibility: Accessibility::default(),
        }
    }

    pub fn external(instance: Arc<dyn PreferencesManager>, name: impl Into<String>) -> Self {
        PreferencesOption::External {
            instance,
            name: name.into(),
        }
    }
}

impl From<PreferencesConfig> for PreferencesOption {
    fn from(config: PreferencesConfig) -> Self {
        match config {
            PreferencesConfig::Namespace {
                namespace,
                redis_url,
            } => PreferencesOption::Namespace {
                namespace,
                redis_url,
            },
            PreferencesConfig::Secure {
                service_id,
                access_group,
                accessibility,
            } => PreferencesOption::Secure {
                service_id,
                access_group,
                accessibility,
            },
        }
    }
}

impl fmt::Debug for PreferencesOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("PreferencesOption").field(&self.name()).finish()
    }
}

impl BuilderOption for PreferencesOption {
    type Manager = dyn PreferencesManager;

    const KIND: ManagerKind = ManagerKind::Preferences;

    fn name(&self) -> String {
        match self {
            PreferencesOption::Namespace { namespace, .. } => {
                format!("preferences:namespace:{}", namespace)
            }
            PreferencesOption::Secure {
                service_id,
                access_group: Some(group),
                ..
            } => format!("preferences:secure:{}:{}", service_id, group),
            PreferencesOption::Secure { service_id, .. } => {
                format!("preferences:secure:{}", service_id)
            }
            PreferencesOption::External { name, .. } => external_name(Self::KIND, name),
        }
    }

    fn build(&self) -> Result<Arc<dyn PreferencesManager>, StowageError> {
        match self {
            PreferencesOption::Namespace {
                namespace,
                redis_url,
            } => {
                if namespace.is_empty() {
                    return Err(StowageError::Configuration(
                        "preferences namespace cannot be empty".to_string(),
                    ));
                }
                Ok(Arc::new(RedisPreferences::new(redis_url, namespace)?))
            }
            PreferencesOption::Secure {
                service_id,
                access_group,
                accessibility,
            } => {
                if service_id.is_empty() {
                    return Err(StowageError::Configuration(
                        "secure preferences need a service id".to_string(),
                    ));
                }
                Ok(Arc::new(KeychainPreferences::new(
                    service_id,
                    access_group.as_deref(),
                    *accessibility,
                )?))
            }
            PreferencesOption::External { instance, .. } => Ok(Arc::clone(instance)),
        }
    }
}

#[derive(Clone)]
pub enum FileOption {
    Directory {
        base: BaseDirectory,
        folder_name: String,
        roots: FileRoots,
    },
    External {
        instance: Arc<dyn FileManager>,
        name: String,
    },
}

impl FileOption {
    /// Folder under the platform root for `base`
    pub fn directory(base: BaseDirectory, folder_name: impl Into<String>) -> Self {
        FileOption::Directory {
            base,
            folder_name: folder_name.into(),
            roots: FileRoots::from_env(),
        }
    }

    pub fn external(instance: Arc<dyn FileManager>, name: impl Into<String>) -> Self {
        FileOption::External {
            instance,
            name: name.into(),
        }
    }
}

impl fmt::Debug for FileOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("FileOption").field(&self.name()).finish()
    }
}

impl BuilderOption for FileOption {
    type Manager = dyn FileManager;

    const KIND: ManagerKind = ManagerKind::Files;

    fn name(&self) -> String {
        match self {
            FileOption::Directory {
                base, folder_name, ..
            } => format!("files:{}:{}", base, folder_name),
            FileOption::External { name, .. } => external_name(Self::KIND, name),
        }
    }

    fn build(&self) -> Result<Arc<dyn FileManager>, StowageError> {
        match self {
            FileOption::Directory {
                base,
                folder_name,
                roots,
            } => Ok(Arc::new(LocalFileStore::new(*base, folder_name, roots)?)),
            FileOption::External { instance, .. } => Ok(Arc::clone(instance)),
        }
    }
}

#[derive(Clone)]
pub enum SyncOption {
    None,
    External {
        instance: Arc<dyn SyncManager>,
        name: String,
    },
}

impl SyncOption {
    pub fn external(instance: Arc<dyn SyncManager>, name: impl Into<String>) -> Self {
        SyncOption::External {
            instance,
            name: name.into(),
        }
    }
}

impl fmt::Debug for SyncOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SyncOption").field(&self.name()).finish()
    }
}

impl BuilderOption for SyncOption {
    type Manager = dyn SyncManager;

    const KIND: ManagerKind = ManagerKind::Sync;

    fn name(&self) -> String {
        match self {
            SyncOption::None => "sync:none".to_string(),
            SyncOption::External { name, .. } => external_name(Self::KIND, name),
        }
    }

    fn build(&self) -> Result<Arc<dyn SyncManager>, StowageError> {
        match self {
            SyncOption::None => Ok(Arc::new(NoopSync)),
            SyncOption::External { instance, .. } => Ok(Arc::clone(instance)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use preference_system::MemoryPreferences;

    #[test]
    fn test_names() {
        assert_eq!(
            DatabaseOption::embedded("./app.db").name(),
            "database:sqlite:./app.db"
        );
        assert_eq!(
            DatabaseOption::encrypted("./app.db", Encryption::key("k")).name(),
            "database:sqlite:./app.db"
        );
        assert_eq!(
            PreferencesOption::namespace("app", "redis://localhost").name(),
            "preferences:namespace:app"
        );
        assert_eq!(
            PreferencesOption::secure("com.example").name(),
            "preferences:secure:com.example"
        );
        let grouped = PreferencesOption::Secure {
            service_id: "com.example".into(),
            access_group: Some("team".into()),
            accessibility: Accessibility::WhenUnlocked,
        };
        assert_eq!(grouped.name(), "preferences:secure:com.example:team");
        assert_eq!(
            FileOption::directory(BaseDirectory::ApplicationSupport, "attachments").name(),
            "files:application_support:attachments"
        );
        assert_eq!(SyncOption::None.name(), "sync:none");
        assert_eq!(
            PreferencesOption::external(Arc::new(MemoryPreferences::new()), "mem").name(),
            "preferences:external:mem"
        );
    }

    #[test]
    fn test_encryption_key_is_not_printed() {
        let option = DatabaseOption::encrypted("./app.db", Encryption::key("hunter2"));
        assert!(!format!("{:?}", option).contains("hunter2"));
        assert!(!format!("{:?}", Encryption::key("hunter2")).contains("hunter2"));
    }

    #[test]
    fn test_empty_secure_service_id_is_configuration_error() {
        let err = PreferencesOption::secure("").build().unwrap_err();
        assert!(matches!(err, StowageError::Configuration(_)));
    }

    #[tokio::test]
    async fn test_empty_encryption_key_is_configuration_error() {
        let err = DatabaseOption::encrypted(":memory:", Encryption::key(""))
            .build()
            .unwrap_err();
        assert!(matches!(err, StowageError::Configuration(_)));
    }

    #[test]
    fn test_external_returns_the_given_instance() {
        let memory: Arc<dyn PreferencesManager> = Arc::new(MemoryPreferences::new());
        let built = PreferencesOption::external(Arc::clone(&memory), "mem")
            .build()
            .unwrap();
        assert!(Arc::ptr_eq(&built, &memory));
    }
}
