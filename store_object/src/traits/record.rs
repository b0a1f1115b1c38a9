//! Record mapping capability
//!
//! The four facts a persisted entity exposes so that queries can be built
//! for it without knowing its shape. Usually derived with `#[derive(Record)]`.

use crate::errors::StoreError;
use crate::query_builder::{Action, Query, QueryFilter, TableDefinition};
use std::collections::HashMap;
use type_mapping::{FromScalar, Record, ScalarValue};

/// Metadata and current state of a persisted entity
///
/// ```ignore
/// use table_derive::Record;
///
/// #[derive(Debug, Clone, Record)]
/// #[table(name = "note")]
/// pub struct Note {
///     #[primary_key]
///     pub id: String,
///     pub title: String,
///     #[column(name = "createdAt")]
///     pub created_at: DateTime<Utc>,
/// }
/// ```
pub trait RecordMapping: Send + Sync {
    /// The table name in the database
    fn table_name() -> &'static str;

    /// Get the primary key field name
    fn primary_key_field() -> &'static str;

    fn primary_key_value(&self) -> ScalarValue;

    /// Every persisted field, `ScalarValue::Null` for absent values
    fn field_values(&self) -> HashMap<String, ScalarValue>;

    fn insert_query(&self) -> Query {
        Query::new(Self::table_name(), Action::insert(self.field_values()))
    }

    /// Update every non-key field of the row with this record's key
    fn update_query(&self) -> Query {
        let mut values = self.field_values();
        values.remove(Self::primary_key_field());
        Query::new(
            Self::table_name(),
            Action::update(values, vec![self.primary_key_filter()]),
        )
    }

    fn delete_query(&self) -> Query {
        Query::new(
            Self::table_name(),
            Action::delete(vec![self.primary_key_filter()]),
        )
    }

    /// Insert, refreshing every non-key field when the key already exists
    fn upsert_query(&self) -> Query {
        Query::new(
            Self::table_name(),
            Action::upsert(self.field_values(), &[Self::primary_key_field()]),
        )
    }

    fn select_by_id_query(id: ScalarValue) -> Query
    where
        Self: Sized,
    {
        crate::query_builder::QueryBuilder::new()
            .filter(QueryFilter::eq(Self::primary_key_field(), id))
            .limit(1)
            .select_from(Self::table_name())
    }

    fn primary_key_filter(&self) -> QueryFilter {
        QueryFilter::eq(Self::primary_key_field(), self.primary_key_value())
    }
}

/// Construction of a typed entity from a fetched row
pub trait FromRecord: Sized {
    fn from_record(row: &Record) -> Result<Self, StoreError>;
}

/// Table layout of a mapped entity
pub trait RecordSchema: RecordMapping {
    fn table_definition() -> TableDefinition;
}

/// Read one column of `row` as `T`; a missing column reads as `Null`
pub fn read_field<T: FromScalar>(row: &Record, field: &str) -> Result<T, StoreError> {
    let value = row.get(field).cloned().unwrap_or(ScalarValue::Null);
    T::from_scalar(value)
        .map_err(|e| StoreError::SerializationError(format!("field '{}': {}", field, e)))
}
