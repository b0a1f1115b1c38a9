//! Signal system for change notification and synchronization
//!
//! This crate provides the change events emitted after committed writes,
//! the in-process signal hub that fans them out, and the contract a remote
//! synchronization service implements.

pub mod errors;
pub mod event;
pub mod manager;
pub mod prelude;
pub mod sync;
pub mod types;

pub use errors::SyncError;
pub use event::{ChangeEvent, ChangeType};
pub use manager::SignalManager;
pub use sync::{NoopSync, SyncManager};
pub use types::{ChangeCallback, RemoteChangeCallback};
