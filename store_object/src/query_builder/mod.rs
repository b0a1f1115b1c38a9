//! Query model
//!
//! Filters, sort specs and actions, and the deterministic compiler that
//! lowers a [`Query`] into SQL text with `?` placeholders plus its ordered
//! argument list. Everything here is pure.

pub mod action;
pub mod builder;
pub mod filter;
pub mod ordering;
pub mod query;
pub mod schema;
pub mod sql_generation;

#[cfg(test)]
mod tests;


pub use action::{values, Action, ValueMap};
pub use builder::QueryBuilder;
pub use filter::{FilterValue, QueryFilter, QueryOperator};
pub use ordering::{SortDirection, SortSpec};
pub use query::{CompiledQuery, Query};
pub use schema::{ColumnDefinition, TableDefinition, TableOption};
pub use sql_generation::SqlGenerator;
