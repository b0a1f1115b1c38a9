//! Traits for database operations
//!
//! This module contains the traits that define the interface between entities,
//! stores and database engines.

pub mod core;
pub mod database;
pub mod record;

// Re-export all public items for convenience
pub use self::core::StoreObject;
pub use database::{DatabaseManager, Row};
pub use record::{read_field, FromRecord, RecordMapping, RecordSchema};
