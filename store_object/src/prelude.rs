//! Convenience re-exports for common store-object usage

// Core traits
pub use crate::traits::{
    read_field, DatabaseManager, FromRecord, RecordMapping, RecordSchema, Row, StoreObject,
};

// Error types
pub use crate::errors::StoreError;

// Core store functionality
pub use crate::generic_store::RecordStore;
pub use crate::sqlite::SqliteDatabase;

// Validation
pub use crate::validation::{ValidatedFieldName, ValidatedTableName, ValidationError};

// Query building
pub use crate::query_builder::{
    values, Action, ColumnDefinition, CompiledQuery, Query, QueryBuilder, QueryFilter,
    SortDirection, SortSpec, TableDefinition, TableOption,
};

// Common external dependencies that are frequently used
pub use async_trait::async_trait;
pub use type_mapping::{ColumnType, ScalarValue};
pub use uuid::Uuid;
