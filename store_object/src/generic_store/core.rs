use crate::errors::StoreError;
use crate::query_builder::TableOption;
use crate::traits::{DatabaseManager, RecordMapping, RecordSchema};
use signal_system::{ChangeEvent, ChangeType, SignalManager};
use std::sync::Arc;
use type_mapping::ScalarValue;

/// Record store driving CRUD for one mapped entity type over any database manager
pub struct RecordStore<T: RecordMapping> {
    pub(crate) database: Arc<dyn DatabaseManager>,
    pub(crate) signal_manager: Option<Arc<SignalManager>>,
    pub(crate) _phantom: std::marker::PhantomData<fn() -> T>,
}

impl<T: RecordMapping> Clone for RecordStore<T> {
    fn clone(&self) -> Self {
        Self {
            database: self.database.clone(),
            signal_manager: self.signal_manager.clone(),
            _phantom: std::marker::PhantomData,
        }
    }
}

impl<T: RecordMapping> std::fmt::Debug for RecordStore<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecordStore")
            .field("table", &T::table_name())
            .field("database", &self.database)
            .field("has_signals", &self.has_signals())
            .finish()
    }
}

impl<T: RecordMapping> RecordStore<T> {
    pub fn new(database: Arc<dyn DatabaseManager>, signal_manager: Option<Arc<SignalManager>>) -> Self {
        Self {
            database,
            signal_manager,
            _phantom: std::marker::PhantomData,
        }
    }

    /// Check if signal manager is set
    pub fn has_signals(&self) -> bool {
        self.signal_manager.is_some()
    }

    pub fn database(&self) -> &Arc<dyn DatabaseManager> {
        &self.database
    }

    pub(crate) fn emit_signal(&self, event: ChangeEvent) {
        if let Some(signal_manager) = &self.signal_manager {
            signal_manager.emit(event);
        }
    }

    /// Emit a change carrying the record's key and field values
    pub(crate) fn emit_record_change(&self, change_type: ChangeType, record: &T) {
        if self.signal_manager.is_none() {
            return;
        }
        let event = ChangeEvent::new(change_type, T::table_name())
            .with_record_id(id_to_string(&record.primary_key_value()))
            .with_payload(record.field_values());
        self.emit_signal(event);
    }

    pub(crate) fn emit_delete(&self, id: &ScalarValue) {
        if self.signal_manager.is_none() {
            return;
        }
        self.emit_signal(
            ChangeEvent::new(ChangeType::Delete, T::table_name()).with_record_id(id_to_string(id)),
        );
    }
}

impl<T: RecordSchema> RecordStore<T> {
    /// Create the entity's table unless it already exists
    pub async fn ensure_table(&self) -> Result<(), StoreError> {
        let definition = T::table_definition().option(TableOption::IfNotExists);
        self.database.create_table(&definition).await
    }
}

/// Render a key value the way change events carry it
pub(crate) fn id_to_string(id: &ScalarValue) -> String {
    match id {
        ScalarValue::Text(s) => s.clone(),
        ScalarValue::Integer(i) => i.to_string(),
        ScalarValue::Uuid(u) => u.to_string(),
        ScalarValue::Timestamp(ts) => type_mapping::format_timestamp(ts),
        other => other.to_sql_literal(),
    }
}
