//! Persistence actions a query can perform

use crate::query_builder::filter::QueryFilter;
use crate::query_builder::ordering::SortSpec;
use std::collections::HashMap;
use type_mapping::ScalarValue;

/// Column name -> value map; `ScalarValue::Null` stands for an absent value
pub type ValueMap = HashMap<String, ScalarValue>;

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Select {
        fields: Vec<String>,
        filters: Vec<QueryFilter>,
        sort: Vec<SortSpec>,
        limit: Option<u64>,
        offset: Option<u64>,
    },
    Insert {
        values: ValueMap,
    },
    InsertMany {
        rows: Vec<ValueMap>,
    },
    Update {
        values: ValueMap,
        filters: Vec<QueryFilter>,
    },
    Delete {
        filters: Vec<QueryFilter>,
    },
    DeleteMany {
        field: String,
        ids: Vec<ScalarValue>,
    },
    Upsert {
        values: ValueMap,
        /// Conflict target, kept in the order given
        conflict_fields: Vec<String>,
        /// Columns refreshed on conflict; `None` means every non-conflict value column
        update_fields: Option<Vec<String>>,
    },
}

impl Action {
    pub fn insert(values: ValueMap) -> Self {
        Action::Insert { values }
    }

    /// Multi-row insert over the union of the rows' keys; a row missing a key
    /// binds NULL for it. Rows without any keys contribute no columns, so a
    /// batch made only of empty rows compiles to a no-op.
    pub fn insert_many(rows: Vec<ValueMap>) -> Self {
        Action::InsertMany { rows }
    }

    pub fn update(values: ValueMap, filters: Vec<QueryFilter>) -> Self {
        Action::Update { values, filters }
    }

    pub fn delete(filters: Vec<QueryFilter>) -> Self {
        Action::Delete { filters }
    }

    pub fn delete_many<I, V>(field: &str, ids: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<ScalarValue>,
    {
        Action::DeleteMany {
            field: field.to_string(),
            ids: ids.into_iter().map(Into::into).collect(),
        }
    }

    pub fn upsert(values: ValueMap, conflict_fields: &[&str]) -> Self {
        Action::Upsert {
            values,
            conflict_fields: conflict_fields.iter().map(|f| f.to_string()).collect(),
            update_fields: None,
        }
    }

    /// Restrict the columns an upsert refreshes; no effect on other actions
    pub fn with_update_fields(self, fields: &[&str]) -> Self {
        match self {
            Action::Upsert {
                values,
                conflict_fields,
                ..
            } => Action::Upsert {
                values,
                conflict_fields,
                update_fields: Some(fields.iter().map(|f| f.to_string()).collect()),
            },
            other => other,
        }
    }

    /// Short verb used in logs and change events
    pub fn verb(&self) -> &'static str {
        match self {
            Action::Select { .. } => "select",
            Action::Insert { .. } => "insert",
            Action::InsertMany { .. } => "insert_many",
            Action::Update { .. } => "update",
            Action::Delete { .. } => "delete",
            Action::DeleteMany { .. } => "delete_many",
            Action::Upsert { .. } => "upsert",
        }
    }

    pub fn is_read(&self) -> bool {
        matches!(self, Action::Select { .. })
    }
}

/// Build a value map from `(column, value)` pairs
pub fn values<I, K, V>(pairs: I) -> ValueMap
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<ScalarValue>,
{
    pairs
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect()
}
