//! Store Object - core database abstraction layer for Stowage
//!
//! This crate provides the typed query model and its compiler, the record
//! mapping capability, the database manager contract with its SQLite
//! adapter, and the record store built on top of them.

pub mod errors;
pub mod generic_store;
pub mod prelude;
pub mod query_builder;
pub mod sqlite;
pub mod traits;
pub mod validation;

pub use errors::StoreError;
pub use generic_store::RecordStore;
pub use query_builder::{
    Action, ColumnDefinition, CompiledQuery, Query, QueryBuilder, QueryFilter, QueryOperator,
    SortDirection, SortSpec, TableDefinition, TableOption,
};
pub use sqlite::SqliteDatabase;
pub use traits::*;
pub use validation::{ValidatedFieldName, ValidatedTableName, ValidationError};

// Used by `#[derive(Record)]` expansions
pub use type_mapping;
