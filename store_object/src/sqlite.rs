//! SQLite database manager
//!
//! Thin adapter binding compiled queries to an `sqlx` SQLite pool. Rows come
//! back as generic records keyed by column name; values keep their storage
//! class (booleans read as integers, timestamps and UUIDs as text).

use crate::errors::StoreError;
use crate::query_builder::{TableDefinition, TableOption};
use crate::traits::database::{DatabaseManager, Row};
use async_trait::async_trait;
use sqlx::query::Query as SqlxQuery;
use sqlx::sqlite::{
    SqliteArguments, SqliteConnectOptions, SqlitePool, SqlitePoolOptions, SqliteRow,
};
use sqlx::{Column, Row as SqlxRow, Sqlite, TypeInfo, ValueRef};
use std::str::FromStr;
use type_mapping::{format_timestamp, Record, ScalarValue};

/// Path that selects a private in-memory database
pub const MEMORY_PATH: &str = ":memory:";

#[derive(Debug, Clone)]
pub struct SqliteDatabase {
    pool: SqlitePool,
    path: String,
}

impl SqliteDatabase {
    /// Open (creating if missing) the database at `path`.
    ///
    /// Connections are established lazily on first use, so this never touches
    /// the file itself. Outside a Tokio runtime this is a configuration error.
    /// With `key` set every connection issues `PRAGMA key` before any other
    /// statement.
    pub fn open(path: &str, key: Option<&str>) -> Result<Self, StoreError> {
        if path.trim().is_empty() {
            return Err(StoreError::Configuration(
                "database path must not be empty".to_string(),
            ));
        }

        let mut options = if path == MEMORY_PATH {
            SqliteConnectOptions::from_str("sqlite::memory:")?
        } else {
            SqliteConnectOptions::new()
                .filename(path)
                .create_if_missing(true)
        };

        if let Some(key) = key {
            if key.is_empty() {
                return Err(StoreError::Configuration(
                    "encryption requested with an empty key".to_string(),
                ));
            }
            options = options.pragma("key", format!("'{}'", key.replace('\'', "''")));
        }

        // the pool's maintenance task is spawned on the current runtime
        if tokio::runtime::Handle::try_current().is_err() {
            return Err(StoreError::Configuration(
                "opening a SQLite database requires a running Tokio runtime".to_string(),
            ));
        }

        let pool_options = if path == MEMORY_PATH {
            // every connection would get its own empty database
            SqlitePoolOptions::new()
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new()
        };

        tracing::debug!("[SQLITE] opening {}", path);
        Ok(Self {
            pool: pool_options.connect_lazy_with(options),
            path: path.to_string(),
        })
    }

    pub fn in_memory() -> Result<Self, StoreError> {
        Self::open(MEMORY_PATH, None)
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}

fn bind_scalar<'q>(
    query: SqlxQuery<'q, Sqlite, SqliteArguments<'q>>,
    value: &ScalarValue,
) -> SqlxQuery<'q, Sqlite, SqliteArguments<'q>> {
    match value {
        ScalarValue::Null => query.bind(Option::<String>::None),
        ScalarValue::Text(s) => query.bind(s.clone()),
        ScalarValue::Integer(i) => query.bind(*i),
        ScalarValue::Real(f) => query.bind(*f),
        ScalarValue::Boolean(b) => query.bind(*b),
        ScalarValue::Blob(bytes) => query.bind(bytes.clone()),
        ScalarValue::Timestamp(ts) => query.bind(format_timestamp(ts)),
        ScalarValue::Uuid(id) => query.bind(id.to_string()),
        ScalarValue::Json(v) => query.bind(v.to_string()),
    }
}

fn bind_all<'q>(sql: &'q str, args: &[ScalarValue]) -> SqlxQuery<'q, Sqlite, SqliteArguments<'q>> {
    args.iter()
        .fold(sqlx::query(sql), |query, value| bind_scalar(query, value))
}

fn row_to_record(row: &SqliteRow) -> Result<Row, StoreError> {
    let mut record = Record::with_capacity(row.columns().len());

    for column in row.columns() {
        let idx = column.ordinal();
        let raw = row.try_get_raw(idx)?;

        let value = if raw.is_null() {
            ScalarValue::Null
        } else {
            let storage_class = raw.type_info().name().to_string();
            match storage_class.as_str() {
                "INTEGER" | "BOOLEAN" => ScalarValue::Integer(row.try_get::<i64, _>(idx)?),
                "REAL" => ScalarValue::Real(row.try_get::<f64, _>(idx)?),
                "BLOB" => ScalarValue::Blob(row.try_get::<Vec<u8>, _>(idx)?),
                _ => ScalarValue::Text(row.try_get::<String, _>(idx)?),
            }
        };

        record.insert(column.name().to_string(), value);
    }

    Ok(record)
}

#[async_trait]
impl DatabaseManager for SqliteDatabase {
    async fn table_exists(&self, name: &str) -> Result<bool, StoreError> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM (SELECT name FROM sqlite_master WHERE type = 'table' AND name = ? \
             UNION ALL SELECT name FROM sqlite_temp_master WHERE type = 'table' AND name = ?)",
        )
        .bind(name)
        .bind(name)
        .fetch_one(&self.pool)
        .await?;

        Ok(count > 0)
    }

    async fn create_table(&self, definition: &TableDefinition) -> Result<(), StoreError> {
        definition.validate()?;

        if !definition.has_option(TableOption::IfNotExists)
            && self.table_exists(&definition.name).await?
        {
            return Err(StoreError::SchemaConflict(definition.name.clone()));
        }

        let sql = definition.create_table_sql();
        tracing::debug!("[SQLITE] {}", sql);
        sqlx::query(&sql).execute(&self.pool).await?;
        Ok(())
    }

    async fn execute_write(&self, sql: &str, args: &[ScalarValue]) -> Result<u64, StoreError> {
        let result = bind_all(sql, args).execute(&self.pool).await?;
        Ok(result.rows_affected())
    }

    async fn execute_read(&self, sql: &str, args: &[ScalarValue]) -> Result<Vec<Row>, StoreError> {
        let rows = bind_all(sql, args).fetch_all(&self.pool).await?;
        rows.iter().map(row_to_record).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query_builder::{
        values, Action, ColumnDefinition, Query, QueryBuilder, QueryFilter, SortDirection,
    };
    use type_mapping::ColumnType;

    fn person_table() -> TableDefinition {
        TableDefinition::new("person")
            .column(ColumnDefinition::new("id", ColumnType::Integer).primary_key())
            .column(ColumnDefinition::new("name", ColumnType::Text).not_null())
            .column(ColumnDefinition::new("age", ColumnType::Integer))
            .column(ColumnDefinition::new("avatar", ColumnType::Blob))
    }

    async fn database() -> SqliteDatabase {
        let db = SqliteDatabase::in_memory().unwrap();
        db.create_table(&person_table()).await.unwrap();
        db
    }

    #[tokio::test]
    async fn test_round_trip_through_compiled_queries() {
        let db = database().await;
        assert!(db.table_exists("person").await.unwrap());
        assert!(!db.table_exists("nobody").await.unwrap());

        let rows = vec![
            values([("id", ScalarValue::from(1)), ("name", ScalarValue::from("ann")), ("age", ScalarValue::from(30))]),
            values([("id", ScalarValue::from(2)), ("name", ScalarValue::from("bob"))]),
            values([
                ("id", ScalarValue::from(3)),
                ("name", ScalarValue::from("cy")),
                ("avatar", ScalarValue::Blob(vec![0, 1, 2])),
            ]),
        ];
        let inserted = db
            .execute(&Query::new("person", Action::insert_many(rows)))
            .await
            .unwrap();
        assert_eq!(inserted, 3);

        let fetched = db
            .fetch(
                &QueryBuilder::new()
                    .order_by("id", SortDirection::Ascending)
                    .select_from("person"),
            )
            .await
            .unwrap();
        assert_eq!(fetched.len(), 3);
        assert_eq!(fetched[0]["name"], ScalarValue::from("ann"));
        assert_eq!(fetched[0]["age"], ScalarValue::Integer(30));
        assert_eq!(fetched[1]["age"], ScalarValue::Null);
        assert_eq!(fetched[2]["avatar"], ScalarValue::Blob(vec![0, 1, 2]));

        let upsert = Query::new(
            "person",
            Action::upsert(
                values([("id", ScalarValue::from(2)), ("name", ScalarValue::from("robert"))]),
                &["id"],
            ),
        );
        db.execute(&upsert).await.unwrap();
        let bob = db
            .fetch(&QueryBuilder::new().filter(QueryFilter::eq("id", 2)).select_from("person"))
            .await
            .unwrap();
        assert_eq!(bob[0]["name"], ScalarValue::from("robert"));

        let deleted = db
            .execute(&Query::new("person", Action::delete_many("id", [1, 3])))
            .await
            .unwrap();
        assert_eq!(deleted, 2);

        let remaining = db.fetch(&QueryBuilder::new().select_from("person")).await.unwrap();
        assert_eq!(remaining.len(), 1);
    }

    #[tokio::test]
    async fn test_empty_in_set_matches_nothing() {
        let db = database().await;
        db.execute(&Query::new(
            "person",
            Action::insert(values([("id", ScalarValue::from(1)), ("name", ScalarValue::from("a"))])),
        ))
        .await
        .unwrap();

        let rows = db
            .fetch(
                &QueryBuilder::new()
                    .filter(QueryFilter::in_set("id", Vec::<i64>::new()))
                    .select_from("person"),
            )
            .await
            .unwrap();
        assert!(rows.is_empty());

        let deleted = db
            .execute(&Query::new("person", Action::delete_many("id", Vec::<i64>::new())))
            .await
            .unwrap();
        assert_eq!(deleted, 0);
    }

    #[tokio::test]
    async fn test_noop_queries_do_not_reach_the_engine() {
        let db = SqliteDatabase::in_memory().unwrap();
        // table does not exist; a real statement would fail
        let affected = db
            .execute(&Query::new("missing", Action::insert_many(Vec::new())))
            .await
            .unwrap();
        assert_eq!(affected, 0);
    }

    #[tokio::test]
    async fn test_duplicate_create_is_schema_conflict() {
        let db = database().await;

        let err = db.create_table(&person_table()).await.unwrap_err();
        assert!(matches!(err, StoreError::SchemaConflict(name) if name == "person"));

        db.create_table(&person_table().option(TableOption::IfNotExists))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_invalid_table_name_rejected() {
        let db = SqliteDatabase::in_memory().unwrap();
        let err = db
            .create_table(&TableDefinition::new("bad name"))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::ValidationError(_)));
    }

    #[tokio::test]
    async fn test_strict_table_with_boolean_column_rejected() {
        let db = database().await;
        let table = TableDefinition::new("flag")
            .column(ColumnDefinition::new("id", ColumnType::Integer).primary_key())
            .column(ColumnDefinition::new("enabled", ColumnType::Boolean))
            .option(TableOption::Strict);

        let err = db.create_table(&table).await.unwrap_err();
        assert!(matches!(err, StoreError::ValidationError(message) if message.contains("STRICT")));
        assert!(!db.table_exists("flag").await.unwrap());
    }

    #[tokio::test]
    async fn test_empty_encryption_key_is_configuration_error() {
        let err = SqliteDatabase::open(MEMORY_PATH, Some("")).unwrap_err();
        assert!(matches!(err, StoreError::Configuration(_)));

        let err = SqliteDatabase::open("  ", None).unwrap_err();
        assert!(matches!(err, StoreError::Configuration(_)));
    }

    #[test]
    fn test_open_outside_runtime_is_configuration_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.db");

        let err = SqliteDatabase::open(path.to_str().unwrap(), None).unwrap_err();
        assert!(matches!(err, StoreError::Configuration(_)));
        assert!(matches!(
            SqliteDatabase::in_memory(),
            Err(StoreError::Configuration(_))
        ));
    }

    #[tokio::test]
    async fn test_file_database_persists_across_pools() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.db");
        let path = path.to_str().unwrap();

        let db = SqliteDatabase::open(path, None).unwrap();
        db.create_table(&person_table()).await.unwrap();
        db.execute(&Query::new(
            "person",
            Action::insert(values([("id", ScalarValue::from(1)), ("name", ScalarValue::from("a"))])),
        ))
        .await
        .unwrap();
        db.close().await;

        let reopened = SqliteDatabase::open(path, None).unwrap();
        assert!(reopened.table_exists("person").await.unwrap());
        assert_eq!(reopened.path(), path);
    }
}
