//! Error types for preference operations
//!
//! This module defines all error types that can occur
//! while talking to a preferences backend.

use thiserror::Error;
use type_mapping::CodecError;

/// Preference system errors
#[derive(Error, Debug)]
pub enum PreferencesError {
    #[error("Redis connection error: {0}")]
    ConnectionError(#[from] redis::RedisError),

    #[error("Connection pool error: {0}")]
    Connection(String),

    #[error("Keychain error: {0}")]
    Keychain(#[from] keyring::Error),

    #[error("Encoding error: {0}")]
    Encoding(#[from] CodecError),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Background task failed: {0}")]
    Task(String),
}
