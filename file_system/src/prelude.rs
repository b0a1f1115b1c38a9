//! Convenience re-exports for common file-system usage

pub use crate::errors::FileError;
pub use crate::local::LocalFileStore;
pub use crate::manager::FileManager;
pub use crate::roots::FileRoots;

pub use config::{BaseDirectory, FilesConfig};

pub use async_trait::async_trait;
