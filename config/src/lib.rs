//! # Configuration Management for Stowage
//!
//! This crate provides the configuration structures describing which storage
//! managers an application composes: the embedded database, the preferences
//! store, the file folder and the sync service.
//!
//! ## TOML File Configuration
//! ```toml
//! [database]
//! path = "./data/app.db"
//! encryption_key = "secret"          # optional
//!
//! [preferences]
//! kind = "namespace"
//! namespace = "app"
//! redis_url = "redis://localhost:6379"
//!
//! # or the OS keychain:
//! # [preferences]
//! # kind = "secure"
//! # service_id = "com.example.app"
//! # access_group = "team.shared"      # optional
//! # accessibility = "after_first_unlock"
//!
//! [files]
//! base = "application_support"
//! folder_name = "attachments"
//! root = "/var/lib/app"              # optional, overrides the platform folder
//!
//! [sync]
//! mode = "none"
//! ```
//!
//! Load configuration:
//! ```rust,ignore
//! use config::AppConfig;
//!
//! // Load from the path in STOWAGE_CONFIG or ./stowage.toml
//! let config = AppConfig::load()?;
//!
//! // Or load from custom path
//! let config = AppConfig::from_file("config/production.toml")?;
//! ```

use serde::{Deserialize, Serialize};
use std::{env, path::Path, path::PathBuf};
use thiserror::Error;

const DEFAULT_CONFIG_PATH: &str = "./stowage.toml";
const CONFIG_PATH_VAR: &str = "STOWAGE_CONFIG";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Environment variable error: {0}")]
    Env(#[from] env::VarError),
    #[error("Dotenvy error: {0}")]
    Dotenvy(#[from] dotenvy::Error),
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Complete application configuration; every section is optional
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    pub database: Option<DatabaseConfig>,
    pub preferences: Option<PreferencesConfig>,
    pub files: Option<FilesConfig>,
    #[serde(default)]
    pub sync: SyncConfig,
}

/// Embedded database configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// File path, or `:memory:`
    pub path: String,
    pub encryption_key: Option<String>,
}

/// Preferences store configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PreferencesConfig {
    /// Plain key-value store; keys live under `<namespace>:`
    Namespace { namespace: String, redis_url: String },
    /// OS credential store
    Secure {
        service_id: String,
        access_group: Option<String>,
        #[serde(default)]
        accessibility: Accessibility,
    },
}

/// When a secure item may be read
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Accessibility {
    WhenUnlocked,
    #[default]
    AfterFirstUnlock,
    WhenUnlockedThisDeviceOnly,
    AfterFirstUnlockThisDeviceOnly,
}

/// Well-known base folder a file manager is rooted in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BaseDirectory {
    Documents,
    Caches,
    ApplicationSupport,
    Temporary,
}

impl BaseDirectory {
    pub fn as_str(&self) -> &'static str {
        match self {
            BaseDirectory::Documents => "documents",
            BaseDirectory::Caches => "caches",
            BaseDirectory::ApplicationSupport => "application_support",
            BaseDirectory::Temporary => "temporary",
        }
    }
}

impl std::fmt::Display for BaseDirectory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// File folder configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilesConfig {
    pub base: BaseDirectory,
    pub folder_name: String,
    /// Replaces the platform folder for `base`
    pub root: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncMode {
    #[default]
    None,
}

/// Sync service configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SyncConfig {
    #[serde(default)]
    pub mode: SyncMode,
}

impl AppConfig {
    /// Load configuration from TOML file specified in .env or defaults
    pub fn load() -> Result<Self, ConfigError> {
        // a missing .env file is fine, the variable may come from the environment
        match dotenvy::dotenv() {
            Ok(_) => {}
            Err(e) if e.not_found() => {}
            Err(e) => return Err(e.into()),
        }

        if let Ok(config_path) = env::var(CONFIG_PATH_VAR) {
            Self::from_file(&config_path)
        } else if Path::new(DEFAULT_CONFIG_PATH).exists() {
            Self::from_file(DEFAULT_CONFIG_PATH)
        } else {
            Err(ConfigError::Invalid(format!(
                "Config path must be specified in .env file as {} or in {} file",
                CONFIG_PATH_VAR, DEFAULT_CONFIG_PATH
            )))
        }
    }

    /// Load configuration from TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse and validate configuration text
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(database) = &self.database {
            if database.path.trim().is_empty() {
                return Err(ConfigError::Invalid(
                    "Database path cannot be empty".to_string(),
                ));
            }
            if matches!(&database.encryption_key, Some(key) if key.is_empty()) {
                return Err(ConfigError::Invalid(
                    "Database encryption_key cannot be empty when set".to_string(),
                ));
            }
        }

        match &self.preferences {
            Some(PreferencesConfig::Namespace {
                namespace,
                redis_url,
            }) => {
                if namespace.is_empty() {
                    return Err(ConfigError::Invalid(
                        "Preferences namespace cannot be empty".to_string(),
                    ));
                }
                if redis_url.is_empty() {
                    return Err(ConfigError::Invalid(
                        "Redis URL cannot be empty".to_string(),
                    ));
                }
            }
            Some(PreferencesConfig::Secure { service_id, .. }) => {
                if service_id.is_empty() {
                    return Err(ConfigError::Invalid(
                        "Secure preferences service_id cannot be empty".to_string(),
                    ));
                }
            }
            None => {}
        }

        if let Some(files) = &self.files {
            if files.folder_name.is_empty() {
                return Err(ConfigError::Invalid(
                    "Files folder_name cannot be empty".to_string(),
                ));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_config() {
        let config = AppConfig::from_toml(
            r#"
            [database]
            path = "./data/app.db"
            encryption_key = "k"

            [preferences]
            kind = "secure"
            service_id = "com.example.app"
            accessibility = "when_unlocked"

            [files]
            base = "application_support"
            folder_name = "attachments"

            [sync]
            mode = "none"
            "#,
        )
        .unwrap();

        assert_eq!(
            config.database,
            Some(DatabaseConfig {
                path: "./data/app.db".to_string(),
                encryption_key: Some("k".to_string()),
            })
        );
        assert_eq!(
            config.preferences,
            Some(PreferencesConfig::Secure {
                service_id: "com.example.app".to_string(),
                access_group: None,
                accessibility: Accessibility::WhenUnlocked,
            })
        );
        let files = config.files.unwrap();
        assert_eq!(files.base, BaseDirectory::ApplicationSupport);
        assert_eq!(files.root, None);
        assert_eq!(config.sync.mode, SyncMode::None);
    }

    #[test]
    fn test_empty_config_is_valid() {
        let config = AppConfig::from_toml("").unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_namespace_preferences() {
        let config = AppConfig::from_toml(
            r#"
            [preferences]
            kind = "namespace"
            namespace = "app"
            redis_url = "redis://localhost:6379"
            "#,
        )
        .unwrap();
        assert!(matches!(
            config.preferences,
            Some(PreferencesConfig::Namespace { ref namespace, .. }) if namespace == "app"
        ));
    }

    #[test]
    fn test_validation_failures() {
        let cases = [
            "[database]\npath = \"\"",
            "[database]\npath = \"a.db\"\nencryption_key = \"\"",
            "[preferences]\nkind = \"namespace\"\nnamespace = \"\"\nredis_url = \"redis://x\"",
            "[preferences]\nkind = \"namespace\"\nnamespace = \"a\"\nredis_url = \"\"",
            "[preferences]\nkind = \"secure\"\nservice_id = \"\"",
            "[files]\nbase = \"caches\"\nfolder_name = \"\"",
        ];

        for case in cases {
            assert!(
                matches!(AppConfig::from_toml(case), Err(ConfigError::Invalid(_))),
                "should reject: {}",
                case
            );
        }
    }

    #[test]
    fn test_unknown_base_directory_is_parse_error() {
        let result = AppConfig::from_toml("[files]\nbase = \"desktop\"\nfolder_name = \"x\"");
        assert!(matches!(result, Err(ConfigError::Toml(_))));
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stowage.toml");
        std::fs::write(&path, "[database]\npath = \":memory:\"\n").unwrap();

        let config = AppConfig::from_file(&path).unwrap();
        assert_eq!(config.database.unwrap().path, ":memory:");
    }
}
