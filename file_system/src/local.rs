//! Local folder adapter
//!
//! Files live under `<root>/<folder_name>/`. Relative paths are checked
//! lexically before touching the disk: empty paths, absolute paths and any
//! `..` component are rejected.

use crate::errors::FileError;
use crate::manager::FileManager;
use crate::roots::FileRoots;
use async_trait::async_trait;
use config::BaseDirectory;
use std::path::{Component, Path, PathBuf};

#[derive(Debug, Clone)]
pub struct LocalFileStore {
    base: BaseDirectory,
    folder: PathBuf,
}

impl LocalFileStore {
    /// The folder is created lazily by the first `save`
    pub fn new(base: BaseDirectory, folder_name: &str, roots: &FileRoots) -> Result<Self, FileError> {
        let folder_name = validate_relative(Path::new(folder_name))?;
        let root = roots
            .root(base)
            .ok_or_else(|| FileError::MissingRoot(base.to_string()))?;

        Ok(Self {
            base,
            folder: root.join(folder_name),
        })
    }

    pub fn base(&self) -> BaseDirectory {
        self.base
    }

    pub fn folder(&self) -> &Path {
        &self.folder
    }

    fn locate(&self, relative: &Path) -> Result<PathBuf, FileError> {
        Ok(self.folder.join(validate_relative(relative)?))
    }
}

/// Keeps only normal components; `.` is dropped
fn validate_relative(relative: &Path) -> Result<PathBuf, FileError> {
    let invalid = || FileError::InvalidPath(relative.display().to_string());

    let mut cleaned = PathBuf::new();
    for component in relative.components() {
        match component {
            Component::Normal(part) => cleaned.push(part),
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => {
                return Err(invalid());
            }
        }
    }

    if cleaned.as_os_str().is_empty() {
        return Err(invalid());
    }
    Ok(cleaned)
}

#[async_trait]
impl FileManager for LocalFileStore {
    async fn save(&self, bytes: &[u8], relative: &Path) -> Result<PathBuf, FileError> {
        let path = self.locate(relative)?;
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&path, bytes).await?;
        tracing::debug!("[FILES] saved {} bytes to {}", bytes.len(), path.display());
        Ok(path)
    }

    async fn resolve(&self, relative: &Path) -> Result<PathBuf, FileError> {
        self.locate(relative)
    }

    async fn delete(&self, relative: &Path) -> Result<(), FileError> {
        let path = self.locate(relative)?;
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(FileError::NotFound(path)),
            Err(e) => Err(e.into()),
        }
    }
}
