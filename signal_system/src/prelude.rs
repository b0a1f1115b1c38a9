//! Convenience re-exports for common signal-system usage

// Core signal system components
pub use crate::errors::SyncError;
pub use crate::event::{ChangeEvent, ChangeType};
pub use crate::manager::SignalManager;
pub use crate::sync::{NoopSync, SyncManager};
pub use crate::types::{ChangeCallback, RemoteChangeCallback};

// Common external dependencies
pub use async_trait::async_trait;
pub use serde::{Deserialize, Serialize};
pub use serde_json;
pub use tokio;
