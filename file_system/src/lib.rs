//! File system manager for stowage
//!
//! This crate provides the file manager contract and a local adapter that
//! keeps an application's files in one folder under a well-known base
//! directory.

pub mod errors;
pub mod local;
pub mod manager;
pub mod prelude;
pub mod roots;

// Re-export centralized config
pub use config::{BaseDirectory, FilesConfig};

pub use errors::FileError;
pub use local::LocalFileStore;
pub use manager::FileManager;
pub use roots::FileRoots;
