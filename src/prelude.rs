//! Convenience re-exports for common Stowage usage
//!
//! This prelude module re-exports the most commonly used items from the Stowage ecosystem,
//! making it easier to import everything you need with a single use statement.
//!
//! # Example
//!
//! ```rust
//! use stowage::prelude::*;
//!
//! // Now you have access to all the common Stowage types and traits
//! ```

// Core Stowage components
pub use crate::builder::{Storage, StorageBuilder};
pub use crate::core::StorageRegistry;
pub use crate::errors::StowageError;
pub use crate::migration::auto_migrate;
pub use crate::options::{
    BuilderOption, DatabaseOption, Encryption, FileOption, ManagerKind, PreferencesOption,
    SyncOption,
};

// Re-export centralized config
pub use config::{Accessibility, AppConfig, BaseDirectory};

// Re-export commonly used store-object types for convenience
pub use store_object::prelude::*;

// Re-export store_object module for macro-generated code
pub use store_object;

// Re-export signal system for event handling
pub use signal_system::prelude::*;

// Preferences and files
pub use preference_system::prelude::{
    KeychainPreferences, MemoryPreferences, PreferencesError, PreferencesManager,
    RedisPreferences, TypedPreferences,
};
pub use file_system::prelude::{FileError, FileManager, FileRoots, LocalFileStore};

// Codec
pub use type_mapping::{Json, Storable, TaggedValue, ValueKind};

// Re-export table derive for model creation
pub use table_derive::{Record, model};

// Common external dependencies
pub use anyhow;
pub use chrono::{DateTime, Utc};
pub use tokio;
