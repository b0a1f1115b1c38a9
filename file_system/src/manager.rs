use crate::errors::FileError;
use async_trait::async_trait;
use std::fmt::Debug;
use std::path::{Path, PathBuf};

/// Stores files by path relative to the manager's folder
#[async_trait]
pub trait FileManager: Send + Sync + Debug {
    /// Writes `bytes`, replacing any previous file, and returns where it landed
    async fn save(&self, bytes: &[u8], relative: &Path) -> Result<PathBuf, FileError>;

    /// Location `relative` maps to; the file need not exist
    async fn resolve(&self, relative: &Path) -> Result<PathBuf, FileError>;

    async fn delete(&self, relative: &Path) -> Result<(), FileError>;
}
