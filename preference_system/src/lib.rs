//! Preference system for key-value and secure storage
//!
//! This crate provides the preferences manager contract, its adapters
//! (Redis namespaces, the OS keychain, an in-process map) and typed access
//! through the tagged value codec.

pub mod errors;
pub mod keychain;
pub mod manager;
pub mod memory;
pub mod prelude;
pub mod redis_store;
pub mod typed;

// Re-export centralized config
pub use config::{Accessibility, PreferencesConfig};

pub use errors::PreferencesError;
pub use keychain::KeychainPreferences;
pub use manager::PreferencesManager;
pub use memory::MemoryPreferences;
pub use redis_store::RedisPreferences;
pub use typed::TypedPreferences;
