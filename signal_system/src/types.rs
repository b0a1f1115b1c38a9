//! Callback types for the signal system

use crate::event::ChangeEvent;
use futures::future::BoxFuture;
use std::sync::Arc;

/// Synchronous observer of locally committed changes
pub type ChangeCallback = Box<dyn Fn(&ChangeEvent) + Send + Sync>;

/// Async observer of changes arriving from a remote path
pub type RemoteChangeCallback =
    Arc<dyn Fn(Vec<ChangeEvent>) -> BoxFuture<'static, anyhow::Result<()>> + Send + Sync>;
