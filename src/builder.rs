//! Composition of one manager per kind
//!
//! ```rust,ignore
//! let registry = StorageRegistry::new();
//! let storage = StorageBuilder::new()
//!     .database(DatabaseOption::embedded("./app.db"))
//!     .preferences(PreferencesOption::secure("com.example.app"))
//!     .build(&registry)?;
//! ```

use crate::core::StorageRegistry;
use crate::errors::StowageError;
use crate::options::{BuilderOption, DatabaseOption, FileOption, PreferencesOption, SyncOption};
use config::AppConfig;
use file_system::{FileManager, FileRoots};
use preference_system::PreferencesManager;
use signal_system::SyncManager;
use std::sync::Arc;
use store_object::DatabaseManager;

/// Managers resolved by [`StorageBuilder::build`]
#[derive(Debug, Clone, Default)]
pub struct Storage {
    pub database: Option<Arc<dyn DatabaseManager>>,
    pub preferences: Option<Arc<dyn PreferencesManager>>,
    pub files: Option<Arc<dyn FileManager>>,
    pub sync: Option<Arc<dyn SyncManager>>,
}

/// Immutable set of options; every setter returns a new builder
#[derive(Debug, Clone, Default)]
pub struct StorageBuilder {
    database: Option<DatabaseOption>,
    preferences: Option<PreferencesOption>,
    files: Option<FileOption>,
    sync: Option<SyncOption>,
}

impl StorageBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Options named in a configuration file; file roots come from the
    /// environment unless the file overrides them
    pub fn from_config(config: &AppConfig) -> Self {
        let mut builder = Self::new();

        if let Some(database) = &config.database {
            builder = builder.database(DatabaseOption::Embedded {
                path: database.path.clone(),
                encryption: database
                    .encryption_key
                    .as_ref()
                    .map(|key| crate::options::Encryption::key(key.as_str())),
            });
        }
        if let Some(preferences) = &config.preferences {
            builder = builder.preferences(PreferencesOption::from(preferences.clone()));
        }
        if let Some(files) = &config.files {
            let roots = match &files.root {
                Some(root) => FileRoots::from_env().with_root(files.base, root),
                None => FileRoots::from_env(),
            };
            builder = builder.files(FileOption::Directory {
                base: files.base,
                folder_name: files.folder_name.clone(),
                roots,
            });
        }

        builder.sync(SyncOption::None)
    }

    pub fn database(&self, option: DatabaseOption) -> Self {
        Self {
            database: Some(option),
            ..self.clone()
        }
    }

    pub fn preferences(&self, option: PreferencesOption) -> Self {
        Self {
            preferences: Some(option),
            ..self.clone()
        }
    }

    pub fn files(&self, option: FileOption) -> Self {
        Self {
            files: Some(option),
            ..self.clone()
        }
    }

    pub fn sync(&self, option: SyncOption) -> Self {
        Self {
            sync: Some(option),
            ..self.clone()
        }
    }

    /// Resolves database, preferences, files then sync; stops at the first failure
    pub fn build(&self, registry: &StorageRegistry) -> Result<Storage, StowageError> {
        Ok(Storage {
            database: resolve(registry, self.database.as_ref())?,
            preferences: resolve(registry, self.preferences.as_ref())?,
            files: resolve(registry, self.files.as_ref())?,
            sync: resolve(registry, self.sync.as_ref())?,
        })
    }
}

fn resolve<O: BuilderOption>(
    registry: &StorageRegistry,
    option: Option<&O>,
) -> Result<Option<Arc<O::Manager>>, StowageError> {
    option
        .map(|option| {
            registry.try_get(option).map_err(|e| StowageError::BuildFailure {
                name: option.name(),
                reason: e.to_string(),
            })
        })
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::{BaseDirectory, FilesConfig};
    use crate::options::Encryption;

    #[test]
    fn test_setters_do_not_mutate() {
        let base = StorageBuilder::new();
        let with_sync = base.sync(SyncOption::None);

        let registry = StorageRegistry::new();
        let storage = base.build(&registry).unwrap();
        assert!(storage.sync.is_none());

        let storage = with_sync.build(&registry).unwrap();
        assert!(storage.sync.is_some());
        assert!(storage.database.is_none());
    }

    #[tokio::test]
    async fn test_first_failure_stops_the_build() {
        let registry = StorageRegistry::new();
        let err = StorageBuilder::new()
            .database(DatabaseOption::encrypted(":memory:", Encryption::key("")))
            .sync(SyncOption::None)
            .build(&registry)
            .unwrap_err();

        assert!(matches!(
            err,
            StowageError::BuildFailure { ref name, .. } if name == "database:sqlite::memory:"
        ));
        assert!(!registry.contains(&SyncOption::None));
    }

    #[test]
    fn test_from_config_uses_configured_root() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig {
            files: Some(FilesConfig {
                base: BaseDirectory::Caches,
                folder_name: "thumbs".to_string(),
                root: Some(dir.path().to_path_buf()),
            }),
            ..AppConfig::default()
        };

        let registry = StorageRegistry::new();
        let storage = StorageBuilder::from_config(&config).build(&registry).unwrap();
        assert!(storage.files.is_some());
        assert!(storage.sync.is_some());
        assert!(storage.database.is_none());
    }
}
