//! Queries and their compiled form

use crate::query_builder::action::Action;
use crate::query_builder::sql_generation::SqlGenerator;
use type_mapping::ScalarValue;

/// A persistence operation against one table.
///
/// Immutable once constructed; [`Query::compile`] is a pure function of it.
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    table: String,
    action: Action,
}

/// Query text with `?` placeholders and the arguments bound to them, in order
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledQuery {
    pub sql: String,
    pub args: Vec<ScalarValue>,
}

impl CompiledQuery {
    pub fn new(sql: String, args: Vec<ScalarValue>) -> Self {
        Self { sql, args }
    }

    /// Statement with nothing to do (an empty batch, an empty SET list)
    pub fn noop() -> Self {
        Self {
            sql: String::new(),
            args: Vec::new(),
        }
    }

    pub fn is_noop(&self) -> bool {
        self.sql.is_empty()
    }
}

impl Query {
    pub fn new(table: &str, action: Action) -> Self {
        Self {
            table: table.to_string(),
            action,
        }
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    pub fn action(&self) -> &Action {
        &self.action
    }

    /// Lower the query to text and positional arguments. Never fails.
    pub fn compile(&self) -> CompiledQuery {
        let table = self.table.as_str();

        match &self.action {
            Action::Select {
                fields,
                filters,
                sort,
                limit,
                offset,
            } => SqlGenerator::select(table, fields, filters, sort, *limit, *offset),
            Action::Insert { values } => SqlGenerator::insert(table, values),
            Action::InsertMany { rows } => SqlGenerator::insert_many(table, rows),
            Action::Update { values, filters } => SqlGenerator::update(table, values, filters),
            Action::Delete { filters } => SqlGenerator::delete(table, filters),
            Action::DeleteMany { field, ids } => SqlGenerator::delete_many(table, field, ids),
            Action::Upsert {
                values,
                conflict_fields,
                update_fields,
            } => SqlGenerator::upsert(table, values, conflict_fields, update_fields.as_deref()),
        }
    }
}
