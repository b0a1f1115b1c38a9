//! SQL generation
//!
//! Lowers actions into query text with `?` placeholders plus the positional
//! argument list. Column lists built from value maps are sorted so the same
//! map always produces byte-identical output.

use crate::query_builder::action::ValueMap;
use crate::query_builder::filter::{FilterValue, QueryFilter, QueryOperator};
use crate::query_builder::ordering::SortSpec;
use crate::query_builder::query::CompiledQuery;
use std::collections::BTreeSet;
use type_mapping::ScalarValue;

/// Always-false predicate
const NEVER: &str = "1=0";

pub struct SqlGenerator;

impl SqlGenerator {
    /// Build WHERE clause from filters
    pub fn build_where_clause(filters: &[QueryFilter]) -> (String, Vec<ScalarValue>) {
        if filters.is_empty() {
            return (String::new(), Vec::new());
        }

        let mut values = Vec::new();
        let conditions_sql = filters
            .iter()
            .map(|filter| Self::build_filter_sql(filter, &mut values))
            .collect::<Vec<_>>()
            .join(" AND ");

        (format!("WHERE {}", conditions_sql), values)
    }

    /// Lower one filter, pushing the scalars it consumes onto `values`
    pub fn build_filter_sql(filter: &QueryFilter, values: &mut Vec<ScalarValue>) -> String {
        let field = filter.field();

        match (filter.operator(), filter.value()) {
            (QueryOperator::InSet, FilterValue::Multiple(set)) => {
                if set.is_empty() {
                    return NEVER.to_string();
                }
                values.extend(set.iter().cloned());
                format!("{} IN ({})", field, Self::placeholders(set.len()))
            }
            (operator, FilterValue::Single(value)) if !operator.takes_multiple() => {
                values.push(value.clone());
                format!("{} {} ?", field, operator.to_sql())
            }
            // Operator / value shape mismatch
            _ => NEVER.to_string(),
        }
    }

    /// Build ORDER BY clause
    pub fn build_order_clause(sort: &[SortSpec]) -> String {
        if sort.is_empty() {
            return String::new();
        }

        let order_items: Vec<String> = sort
            .iter()
            .map(|spec| format!("{} {}", spec.field, spec.direction.to_sql()))
            .collect();

        format!("ORDER BY {}", order_items.join(", "))
    }

    /// Build LIMIT/OFFSET clause
    pub fn build_limit_clause(limit: Option<u64>, offset: Option<u64>) -> String {
        match (limit, offset) {
            (Some(limit), Some(offset)) => format!("LIMIT {} OFFSET {}", limit, offset),
            (Some(limit), None) => format!("LIMIT {}", limit),
            // SQLite only accepts OFFSET after a LIMIT; -1 means unbounded
            (None, Some(offset)) => format!("LIMIT -1 OFFSET {}", offset),
            (None, None) => String::new(),
        }
    }

    /// Build SELECT column list
    pub fn build_select_clause(fields: &[String]) -> String {
        if fields.is_empty() {
            return "*".to_string();
        }
        fields.join(", ")
    }

    /// `?, ?, ?` for `count` parameters
    pub fn placeholders(count: usize) -> String {
        vec!["?"; count].join(", ")
    }

    /// Column names of a value map in lexicographic order
    pub fn sorted_columns(values: &ValueMap) -> Vec<&str> {
        let mut columns: Vec<&str> = values.keys().map(String::as_str).collect();
        columns.sort_unstable();
        columns
    }

    pub fn select(
        table: &str,
        fields: &[String],
        filters: &[QueryFilter],
        sort: &[SortSpec],
        limit: Option<u64>,
        offset: Option<u64>,
    ) -> CompiledQuery {
        let head = format!("SELECT {} FROM {}", Self::build_select_clause(fields), table);
        let (where_clause, args) = Self::build_where_clause(filters);
        let order_clause = Self::build_order_clause(sort);
        let limit_clause = Self::build_limit_clause(limit, offset);

        CompiledQuery::new(
            join_clauses(&[
                head.as_str(),
                where_clause.as_str(),
                order_clause.as_str(),
                limit_clause.as_str(),
            ]),
            args,
        )
    }

    pub fn insert(table: &str, values: &ValueMap) -> CompiledQuery {
        if values.is_empty() {
            return CompiledQuery::new(format!("INSERT INTO {} DEFAULT VALUES", table), Vec::new());
        }

        let columns = Self::sorted_columns(values);
        let args = columns.iter().map(|c| values[*c].clone()).collect();
        let sql = format!(
            "INSERT INTO {} ({}) VALUES ({})",
            table,
            columns.join(", "),
            Self::placeholders(columns.len())
        );

        CompiledQuery::new(sql, args)
    }

    pub fn insert_many(table: &str, rows: &[ValueMap]) -> CompiledQuery {
        let columns: BTreeSet<&str> = rows
            .iter()
            .flat_map(|row| row.keys().map(String::as_str))
            .collect();

        if rows.is_empty() || columns.is_empty() {
            return CompiledQuery::noop();
        }

        let group = format!("({})", Self::placeholders(columns.len()));
        let mut args = Vec::with_capacity(rows.len() * columns.len());
        for row in rows {
            for column in &columns {
                args.push(row.get(*column).cloned().unwrap_or(ScalarValue::Null));
            }
        }

        let sql = format!(
            "INSERT INTO {} ({}) VALUES {}",
            table,
            columns.into_iter().collect::<Vec<_>>().join(", "),
            vec![group; rows.len()].join(", ")
        );

        CompiledQuery::new(sql, args)
    }

    pub fn update(table: &str, values: &ValueMap, filters: &[QueryFilter]) -> CompiledQuery {
        if values.is_empty() {
            return CompiledQuery::noop();
        }

        let columns = Self::sorted_columns(values);
        let mut args: Vec<ScalarValue> = columns.iter().map(|c| values[*c].clone()).collect();
        let set_clause = columns
            .iter()
            .map(|c| format!("{} = ?", c))
            .collect::<Vec<_>>()
            .join(", ");

        let head = format!("UPDATE {} SET {}", table, set_clause);
        let (where_clause, filter_args) = Self::build_where_clause(filters);
        args.extend(filter_args);

        CompiledQuery::new(join_clauses(&[head.as_str(), where_clause.as_str()]), args)
    }

    pub fn delete(table: &str, filters: &[QueryFilter]) -> CompiledQuery {
        let head = format!("DELETE FROM {}", table);
        let (where_clause, args) = Self::build_where_clause(filters);
        CompiledQuery::new(join_clauses(&[head.as_str(), where_clause.as_str()]), args)
    }

    pub fn delete_many(table: &str, field: &str, ids: &[ScalarValue]) -> CompiledQuery {
        Self::delete(table, &[QueryFilter::in_set(field, ids.iter().cloned())])
    }

    pub fn upsert(
        table: &str,
        values: &ValueMap,
        conflict_fields: &[String],
        update_fields: Option<&[String]>,
    ) -> CompiledQuery {
        if values.is_empty() {
            return CompiledQuery::noop();
        }

        let CompiledQuery { sql: insert_sql, args } = Self::insert(table, values);

        if conflict_fields.is_empty() {
            return CompiledQuery::new(format!("{} ON CONFLICT DO NOTHING", insert_sql), args);
        }

        let refresh: Vec<&str> = match update_fields {
            Some(fields) => fields.iter().map(String::as_str).collect(),
            None => Self::sorted_columns(values)
                .into_iter()
                .filter(|c| !conflict_fields.iter().any(|k| k == c))
                .collect(),
        };

        let target = format!("ON CONFLICT ({})", conflict_fields.join(", "));
        let resolution = if refresh.is_empty() {
            "DO NOTHING".to_string()
        } else {
            let assignments = refresh
                .iter()
                .map(|c| format!("{} = excluded.{}", c, c))
                .collect::<Vec<_>>()
                .join(", ");
            format!("DO UPDATE SET {}", assignments)
        };

        CompiledQuery::new(format!("{} {} {}", insert_sql, target, resolution), args)
    }
}

fn join_clauses(parts: &[&str]) -> String {
    parts
        .iter()
        .filter(|p| !p.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join(" ")
}
