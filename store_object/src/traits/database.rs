//! Database manager contract
//!
//! The capability set a relational engine adapter exposes. Query text is
//! produced by the query model; adapters only bind and run it.

use crate::errors::StoreError;
use crate::query_builder::{Query, TableDefinition};
use async_trait::async_trait;
use std::fmt::Debug;
use type_mapping::{Record, ScalarValue};

/// One fetched row, column name -> value
pub type Row = Record;

#[async_trait]
pub trait DatabaseManager: Send + Sync + Debug {
    async fn table_exists(&self, name: &str) -> Result<bool, StoreError>;

    /// Create the table; fails with `SchemaConflict` when it exists and the
    /// definition lacks `IfNotExists`
    async fn create_table(&self, definition: &TableDefinition) -> Result<(), StoreError>;

    /// Run a statement, returning the number of affected rows
    async fn execute_write(&self, sql: &str, args: &[ScalarValue]) -> Result<u64, StoreError>;

    async fn execute_read(&self, sql: &str, args: &[ScalarValue]) -> Result<Vec<Row>, StoreError>;

    /// Compile and run a write; no-op statements affect zero rows
    async fn execute(&self, query: &Query) -> Result<u64, StoreError> {
        let compiled = query.compile();
        if compiled.is_noop() {
            return Ok(0);
        }
        tracing::trace!("[{}] {} args={}", query.action().verb(), compiled.sql, compiled.args.len());
        self.execute_write(&compiled.sql, &compiled.args).await
    }

    /// Compile and run a read
    async fn fetch(&self, query: &Query) -> Result<Vec<Row>, StoreError> {
        let compiled = query.compile();
        if compiled.is_noop() {
            return Ok(Vec::new());
        }
        tracing::trace!("[{}] {} args={}", query.action().verb(), compiled.sql, compiled.args.len());
        self.execute_read(&compiled.sql, &compiled.args).await
    }
}
