//! Error types for the Stowage crate
//!
//! This module contains all error types that can be returned while building
//! and composing storage managers.

use config::ConfigError;
use file_system::FileError;
use preference_system::PreferencesError;
use signal_system::SyncError;
use store_object::StoreError;
use thiserror::Error;
use type_mapping::CodecError;

#[derive(Error, Debug)]
pub enum StowageError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Schema conflict: table '{0}' already exists")]
    SchemaConflict(String),

    #[error("Encoding error: {0}")]
    Encoding(#[from] CodecError),

    #[error("Failed to build '{name}': {reason}")]
    BuildFailure { name: String, reason: String },

    #[error("Database error: {0}")]
    Database(StoreError),

    #[error("Preferences error: {0}")]
    Preferences(#[from] PreferencesError),

    #[error("File error: {0}")]
    Files(#[from] FileError),

    #[error("Sync error: {0}")]
    Sync(#[from] SyncError),

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<StoreError> for StowageError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Configuration(msg) => StowageError::Configuration(msg),
            StoreError::SchemaConflict(table) => StowageError::SchemaConflict(table),
            other => StowageError::Database(other),
        }
    }
}
