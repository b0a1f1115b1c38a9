//! Table definitions and DDL rendering

use crate::validation::{ValidatedFieldName, ValidatedTableName, ValidationError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use type_mapping::{ColumnType, ScalarValue};

/// Table-level options applied when the table is created
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TableOption {
    IfNotExists,
    Temporary,
    WithoutRowId,
    Strict,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnDefinition {
    pub name: String,
    pub column_type: ColumnType,
    pub is_primary_key: bool,
    pub is_not_null: bool,
    pub is_unique: bool,
    pub default_value: Option<ScalarValue>,
}

impl ColumnDefinition {
    pub fn new(name: &str, column_type: ColumnType) -> Self {
        Self {
            name: name.to_string(),
            column_type,
            is_primary_key: false,
            is_not_null: false,
            is_unique: false,
            default_value: None,
        }
    }

    pub fn primary_key(mut self) -> Self {
        self.is_primary_key = true;
        self
    }

    pub fn not_null(mut self) -> Self {
        self.is_not_null = true;
        self
    }

    pub fn unique(mut self) -> Self {
        self.is_unique = true;
        self
    }

    pub fn default(mut self, value: impl Into<ScalarValue>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    /// Column clause; `inline_pk` is false when the key is declared as a table constraint
    fn to_sql(&self, inline_pk: bool) -> String {
        let mut parts = vec![self.name.clone(), self.column_type.to_sql().to_string()];

        if self.is_primary_key && inline_pk {
            parts.push("PRIMARY KEY".to_string());
        }
        if self.is_not_null {
            parts.push("NOT NULL".to_string());
        }
        if self.is_unique {
            parts.push("UNIQUE".to_string());
        }
        if let Some(default) = &self.default_value {
            parts.push(format!("DEFAULT {}", default.to_sql_literal()));
        }

        parts.join(" ")
    }
}

fn allowed_in_strict(column_type: &ColumnType) -> bool {
    matches!(
        column_type,
        ColumnType::Integer | ColumnType::Real | ColumnType::Text | ColumnType::Blob | ColumnType::Any
    )
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableDefinition {
    pub name: String,
    pub columns: Vec<ColumnDefinition>,
    pub options: BTreeSet<TableOption>,
}

impl TableDefinition {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            columns: Vec::new(),
            options: BTreeSet::new(),
        }
    }

    pub fn column(mut self, column: ColumnDefinition) -> Self {
        self.columns.push(column);
        self
    }

    pub fn option(mut self, option: TableOption) -> Self {
        self.options.insert(option);
        self
    }

    pub fn has_option(&self, option: TableOption) -> bool {
        self.options.contains(&option)
    }

    pub fn primary_key_columns(&self) -> Vec<&str> {
        self.columns
            .iter()
            .filter(|c| c.is_primary_key)
            .map(|c| c.name.as_str())
            .collect()
    }

    /// Check the table and every column name, and that a STRICT table only
    /// uses the storage classes SQLite accepts there
    pub fn validate(&self) -> Result<(), ValidationError> {
        ValidatedTableName::new(&self.name)?;
        let strict = self.has_option(TableOption::Strict);
        for column in &self.columns {
            ValidatedFieldName::new(&column.name)?;
            if strict && !allowed_in_strict(&column.column_type) {
                return Err(ValidationError::StrictColumnType {
                    column: column.name.clone(),
                    column_type: column.column_type.to_sql().to_string(),
                });
            }
        }
        Ok(())
    }

    pub fn create_table_sql(&self) -> String {
        let primary_keys = self.primary_key_columns();
        let composite = primary_keys.len() > 1;

        let mut clauses: Vec<String> = self.columns.iter().map(|c| c.to_sql(!composite)).collect();
        if composite {
            clauses.push(format!("PRIMARY KEY ({})", primary_keys.join(", ")));
        }

        let mut sql = String::from("CREATE ");
        if self.has_option(TableOption::Temporary) {
            sql.push_str("TEMPORARY ");
        }
        sql.push_str("TABLE ");
        if self.has_option(TableOption::IfNotExists) {
            sql.push_str("IF NOT EXISTS ");
        }
        sql.push_str(&format!("{} ({})", self.name, clauses.join(", ")));

        let mut trailing = Vec::new();
        if self.has_option(TableOption::WithoutRowId) {
            trailing.push("WITHOUT ROWID");
        }
        if self.has_option(TableOption::Strict) {
            trailing.push("STRICT");
        }
        if !trailing.is_empty() {
            sql.push(' ');
            sql.push_str(&trailing.join(", "));
        }

        sql
    }

    pub fn drop_table_sql(&self) -> String {
        format!("DROP TABLE IF EXISTS {}", self.name)
    }
}
