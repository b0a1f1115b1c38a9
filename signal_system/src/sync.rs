//! Remote synchronization contract

use crate::errors::SyncError;
use crate::event::ChangeEvent;
use crate::types::RemoteChangeCallback;
use async_trait::async_trait;
use std::fmt::Debug;

/// A remote synchronization service
#[async_trait]
pub trait SyncManager: Send + Sync + Debug {
    async fn start(&self) -> Result<(), SyncError>;

    /// Push locally committed changes to `remote_path`
    async fn push_changes(
        &self,
        changes: Vec<ChangeEvent>,
        remote_path: &str,
    ) -> Result<(), SyncError>;

    /// Register `on_change` for changes arriving at `remote_path`
    async fn observe_remote_changes(
        &self,
        remote_path: &str,
        on_change: RemoteChangeCallback,
    ) -> Result<(), SyncError>;
}

/// Sync manager that accepts everything and sends nothing
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopSync;

#[async_trait]
impl SyncManager for NoopSync {
    async fn start(&self) -> Result<(), SyncError> {
        Ok(())
    }

    async fn push_changes(
        &self,
        changes: Vec<ChangeEvent>,
        remote_path: &str,
    ) -> Result<(), SyncError> {
        tracing::trace!(
            "[SYNC] dropping {} change(s) for {}",
            changes.len(),
            remote_path
        );
        Ok(())
    }

    async fn observe_remote_changes(
        &self,
        _remote_path: &str,
        _on_change: RemoteChangeCallback,
    ) -> Result<(), SyncError> {
        Ok(())
    }
}
