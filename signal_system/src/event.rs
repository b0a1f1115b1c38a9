//! Change event types and definitions
//!
//! This module defines the notification a record store emits after a
//! successful write and which sync managers push to a remote path.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use type_mapping::ScalarValue;
use uuid::Uuid;

/// Kind of committed write
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChangeType {
    Insert,
    Update,
    Delete,
    Upsert,
}

/// Notification of a committed write
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChangeEvent {
    /// Unique event ID
    pub id: Uuid,
    pub change_type: ChangeType,
    /// Table name
    pub table: String,
    /// Primary key of the affected record, when the write targeted one
    pub record_id: Option<String>,
    /// Field values written (empty for deletes)
    pub payload: HashMap<String, ScalarValue>,
    /// Event timestamp (UTC)
    pub timestamp: DateTime<Utc>,
}

impl ChangeEvent {
    pub fn new(change_type: ChangeType, table: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            change_type,
            table: table.to_string(),
            record_id: None,
            payload: HashMap::new(),
            timestamp: Utc::now(),
        }
    }

    pub fn with_record_id(mut self, record_id: String) -> Self {
        self.record_id = Some(record_id);
        self
    }

    pub fn with_payload(mut self, payload: HashMap<String, ScalarValue>) -> Self {
        self.payload = payload;
        self
    }

    pub fn add_payload(&mut self, key: &str, value: ScalarValue) {
        self.payload.insert(key.to_string(), value);
    }
}
