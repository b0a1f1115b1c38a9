//! # Stowage
//!
//! A typed storage-access layer: structured queries compiled to
//! parameterized SQL, a tagged value codec for opaque key-value and secure
//! stores, and a registry that builds each configured storage manager once.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use stowage::prelude::*;
//!
//! #[model]
//! #[table(name = "note")]
//! pub struct Note {
//!     #[primary_key]
//!     pub id: String,
//!
//!     pub title: String,
//!
//!     #[column(name = "createdAt", type = "DATE")]
//!     pub created_at: DateTime<Utc>,
//! }
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let registry = StorageRegistry::new();
//!     let storage = StorageBuilder::new()
//!         .database(DatabaseOption::embedded("./notes.db"))
//!         .build(&registry)?;
//!
//!     let notes = storage.record_store::<Note>(None).await?;
//!     notes
//!         .create(Note {
//!             id: "n1".to_string(),
//!             title: "groceries".to_string(),
//!             created_at: Utc::now(),
//!         })
//!         .await?;
//!
//!     let found = notes
//!         .find(QueryBuilder::new().filter(QueryFilter::like("title", "%gro%")))
//!         .await?;
//!     println!("found {} notes", found.len());
//!
//!     Ok(())
//! }
//! ```

/// Conditional debug logging macros
/// These macros only compile in code when the `debug-logging` feature is enabled
#[cfg(feature = "debug-logging")]
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {
        tracing::debug!($($arg)*)
    };
}

#[cfg(not(feature = "debug-logging"))]
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {};
}

#[cfg(feature = "debug-logging")]
#[macro_export]
macro_rules! trace_log {
    ($($arg:tt)*) => {
        tracing::trace!($($arg)*)
    };
}

#[cfg(not(feature = "debug-logging"))]
#[macro_export]
macro_rules! trace_log {
    ($($arg:tt)*) => {};
}

pub mod builder;
pub mod core;
pub mod errors;
pub mod migration;
pub mod options;
pub mod prelude;

// Re-export the main public types for convenience
pub use builder::{Storage, StorageBuilder};
pub use crate::core::StorageRegistry;
pub use errors::StowageError;
pub use options::{
    BuilderOption, DatabaseOption, Encryption, FileOption, ManagerKind, PreferencesOption,
    SyncOption,
};

// Re-export centralized config
pub use config::{
    Accessibility, AppConfig, BaseDirectory, DatabaseConfig, FilesConfig, PreferencesConfig,
    SyncConfig,
};

// Re-export internal crates used by macros and public API
// These MUST be public for the generated macro code to work correctly
pub use file_system;
pub use preference_system;
pub use signal_system;
pub use store_object;
pub use table_derive;
pub use type_mapping;

// Re-export external dependencies used in public API
pub use async_trait;
pub use sqlx;
