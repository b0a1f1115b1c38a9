//! Query builder utilities
//!
//! Fluent construction of `Select` actions.

use crate::query_builder::action::Action;
use crate::query_builder::filter::QueryFilter;
use crate::query_builder::ordering::{SortDirection, SortSpec};
use crate::query_builder::query::Query;

/// Query builder for constructing select queries
#[derive(Debug, Clone, Default)]
pub struct QueryBuilder {
    pub(crate) fields: Vec<String>,
    pub(crate) conditions: Vec<QueryFilter>,
    pub(crate) order_by: Vec<SortSpec>,
    pub(crate) limit: Option<u64>,
    pub(crate) offset: Option<u64>,
}

impl QueryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict the selected columns (default `*`)
    pub fn fields(mut self, fields: &[&str]) -> Self {
        self.fields = fields.iter().map(|f| f.to_string()).collect();
        self
    }

    /// Add a filter condition
    pub fn filter(mut self, filter: QueryFilter) -> Self {
        self.conditions.push(filter);
        self
    }

    /// Add multiple filters (combined with AND)
    pub fn filters(mut self, filters: Vec<QueryFilter>) -> Self {
        self.conditions.extend(filters);
        self
    }

    /// Add ordering
    pub fn order_by(mut self, field: &str, direction: SortDirection) -> Self {
        self.order_by.push(SortSpec::new(field, direction));
        self
    }

    /// Add limit
    pub fn limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Add offset
    pub fn offset(mut self, offset: u64) -> Self {
        self.offset = Some(offset);
        self
    }

    pub fn into_action(self) -> Action {
        Action::Select {
            fields: self.fields,
            filters: self.conditions,
            sort: self.order_by,
            limit: self.limit,
            offset: self.offset,
        }
    }

    /// Finish as a select query over `table`
    pub fn select_from(self, table: &str) -> Query {
        Query::new(table, self.into_action())
    }
}
