use std::path::PathBuf;
use thiserror::Error;

/// File system errors
#[derive(Error, Debug)]
pub enum FileError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid path '{0}': must be relative and stay inside the folder")]
    InvalidPath(String),

    #[error("No root directory known for {0}")]
    MissingRoot(String),

    #[error("File not found: {}", .0.display())]
    NotFound(PathBuf),
}
