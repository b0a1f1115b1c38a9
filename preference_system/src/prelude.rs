//! Convenience re-exports for common preference-system usage

// Core preference system components
pub use crate::errors::PreferencesError;
pub use crate::keychain::KeychainPreferences;
pub use crate::manager::PreferencesManager;
pub use crate::memory::MemoryPreferences;
pub use crate::redis_store::RedisPreferences;
pub use crate::typed::TypedPreferences;

// Re-export centralized config
pub use config::{Accessibility, PreferencesConfig};

// Codec types used with typed access
pub use type_mapping::{Json, Storable};

// Common external dependencies
pub use async_trait::async_trait;
pub use tokio;
