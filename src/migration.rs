//! Table migration for record types
//!
//! This module provides automatic table creation for the record types an
//! application persists through a composed [`Storage`].

use crate::builder::Storage;
use crate::errors::StowageError;
use signal_system::SignalManager;
use std::sync::Arc;
use store_object::traits::{DatabaseManager, RecordSchema};
use store_object::{RecordStore, TableOption};

/// Create the table for `T` if missing; with `recreate` the table is dropped first
pub async fn auto_migrate<T>(
    database: &Arc<dyn DatabaseManager>,
    recreate: bool,
) -> Result<(), StowageError>
where
    T: RecordSchema,
{
    let definition = T::table_definition();

    if recreate {
        let drop_sql = definition.drop_table_sql();
        crate::debug_log!("Dropping table with SQL: {}", drop_sql);
        database.execute_write(&drop_sql, &[]).await?;
    }

    crate::debug_log!("Creating table {}", definition.name);
    database
        .create_table(&definition.option(TableOption::IfNotExists))
        .await?;
    Ok(())
}

impl Storage {
    fn require_database(&self) -> Result<&Arc<dyn DatabaseManager>, StowageError> {
        self.database.as_ref().ok_or_else(|| {
            StowageError::Configuration("no database manager was configured".to_string())
        })
    }

    pub async fn auto_migrate<T: RecordSchema>(&self, recreate: bool) -> Result<(), StowageError> {
        auto_migrate::<T>(self.require_database()?, recreate).await
    }

    /// Record store for `T` over the composed database, its table migrated first
    pub async fn record_store<T: RecordSchema>(
        &self,
        signal_manager: Option<Arc<SignalManager>>,
    ) -> Result<RecordStore<T>, StowageError> {
        let database = self.require_database()?;
        auto_migrate::<T>(database, false).await?;
        Ok(RecordStore::new(Arc::clone(database), signal_manager))
    }
}
