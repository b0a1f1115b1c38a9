//! Query filters
//!
//! A filter is a single comparison predicate over one field. Filters are
//! combined with AND by the compiler.

use serde::{Deserialize, Serialize};
use type_mapping::ScalarValue;

/// Query condition operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QueryOperator {
    Equals,      // =
    NotEquals,   // !=
    Like,        // LIKE
    GreaterThan, // >
    LessThan,    // <
    InSet,       // IN (...)
}

impl QueryOperator {
    pub fn to_sql(&self) -> &'static str {
        match self {
            QueryOperator::Equals => "=",
            QueryOperator::NotEquals => "!=",
            QueryOperator::Like => "LIKE",
            QueryOperator::GreaterThan => ">",
            QueryOperator::LessThan => "<",
            QueryOperator::InSet => "IN",
        }
    }

    /// `InSet` compares against a list, every other operator against one value
    pub fn takes_multiple(&self) -> bool {
        matches!(self, QueryOperator::InSet)
    }
}

/// Right-hand side of a filter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FilterValue {
    Single(ScalarValue),
    Multiple(Vec<ScalarValue>),
}

/// Single condition in a WHERE clause.
///
/// Fields are private: the constructors pair every operator with the value
/// shape it requires. Deserialized filters may still carry a mismatched
/// shape; the compiler lowers those to an always-false predicate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryFilter {
    field: String,
    operator: QueryOperator,
    value: FilterValue,
}

impl QueryFilter {
    fn single(field: &str, operator: QueryOperator, value: ScalarValue) -> Self {
        Self {
            field: field.to_string(),
            operator,
            value: FilterValue::Single(value),
        }
    }

    /// Equal condition
    pub fn eq(field: &str, value: impl Into<ScalarValue>) -> Self {
        Self::single(field, QueryOperator::Equals, value.into())
    }

    /// Not equal condition
    pub fn ne(field: &str, value: impl Into<ScalarValue>) -> Self {
        Self::single(field, QueryOperator::NotEquals, value.into())
    }

    /// LIKE condition
    pub fn like(field: &str, pattern: &str) -> Self {
        Self::single(field, QueryOperator::Like, ScalarValue::Text(pattern.to_string()))
    }

    /// Greater than condition
    pub fn gt(field: &str, value: impl Into<ScalarValue>) -> Self {
        Self::single(field, QueryOperator::GreaterThan, value.into())
    }

    /// Less than condition
    pub fn lt(field: &str, value: impl Into<ScalarValue>) -> Self {
        Self::single(field, QueryOperator::LessThan, value.into())
    }

    /// IN condition
    pub fn in_set<I, V>(field: &str, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<ScalarValue>,
    {
        Self {
            field: field.to_string(),
            operator: QueryOperator::InSet,
            value: FilterValue::Multiple(values.into_iter().map(Into::into).collect()),
        }
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn operator(&self) -> QueryOperator {
        self.operator
    }

    pub fn value(&self) -> &FilterValue {
        &self.value
    }

    /// Whether the operator and value shape agree
    pub fn is_well_formed(&self) -> bool {
        matches!(
            (&self.value, self.operator.takes_multiple()),
            (FilterValue::Single(_), false) | (FilterValue::Multiple(_), true)
        )
    }
}
