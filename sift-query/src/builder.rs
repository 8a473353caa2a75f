//! Free-function DSL for building query trees.
//!
//! These helpers produce frozen [`StructuredQuery`] values and never build
//! a shape-invalid leaf, so trees assembled here validate by construction:
//!
//! ```rust
//! use sift_query::builder::{and, between, contains, eq, or};
//!
//! let query = or([
//!     and([eq("status", "active"), between("age", 18, 65)]),
//!     contains("email", "@example.com"),
//! ]);
//! assert!(query.validate().is_ok());
//! ```

use smol_str::SmolStr;

use crate::query::{AttributeQuery, Operator, RangeQuery, StructuredQuery};
use crate::value::Value;

/// `attribute = value`
pub fn eq(attribute: impl Into<SmolStr>, value: impl Into<Value>) -> StructuredQuery {
    AttributeQuery::new(attribute, Operator::Equals, value).into()
}

/// `attribute != value`
pub fn ne(attribute: impl Into<SmolStr>, value: impl Into<Value>) -> StructuredQuery {
    AttributeQuery::new(attribute, Operator::NotEquals, value).into()
}

/// `attribute < value`
pub fn lt(attribute: impl Into<SmolStr>, value: impl Into<Value>) -> StructuredQuery {
    AttributeQuery::new(attribute, Operator::LessThan, value).into()
}

/// `attribute <= value`
pub fn lte(attribute: impl Into<SmolStr>, value: impl Into<Value>) -> StructuredQuery {
    AttributeQuery::new(attribute, Operator::LessThanOrEqual, value).into()
}

/// `attribute > value`
pub fn gt(attribute: impl Into<SmolStr>, value: impl Into<Value>) -> StructuredQuery {
    AttributeQuery::new(attribute, Operator::GreaterThan, value).into()
}

/// `attribute >= value`
pub fn gte(attribute: impl Into<SmolStr>, value: impl Into<Value>) -> StructuredQuery {
    AttributeQuery::new(attribute, Operator::GreaterThanOrEqual, value).into()
}

/// Attribute value is one of the given values.
pub fn is_in<V: Into<Value>>(
    attribute: impl Into<SmolStr>,
    values: impl IntoIterator<Item = V>,
) -> StructuredQuery {
    let values: Vec<Value> = values.into_iter().map(Into::into).collect();
    AttributeQuery::new(attribute, Operator::In, Value::List(values)).into()
}

/// Attribute value is none of the given values.
pub fn not_in<V: Into<Value>>(
    attribute: impl Into<SmolStr>,
    values: impl IntoIterator<Item = V>,
) -> StructuredQuery {
    let values: Vec<Value> = values.into_iter().map(Into::into).collect();
    AttributeQuery::new(attribute, Operator::NotIn, Value::List(values)).into()
}

/// Attribute contains the given substring.
pub fn contains(attribute: impl Into<SmolStr>, needle: impl Into<String>) -> StructuredQuery {
    AttributeQuery::new(attribute, Operator::Contains, needle.into()).into()
}

/// Attribute starts with the given prefix.
pub fn starts_with(attribute: impl Into<SmolStr>, prefix: impl Into<String>) -> StructuredQuery {
    AttributeQuery::new(attribute, Operator::StartsWith, prefix.into()).into()
}

/// Attribute ends with the given suffix.
pub fn ends_with(attribute: impl Into<SmolStr>, suffix: impl Into<String>) -> StructuredQuery {
    AttributeQuery::new(attribute, Operator::EndsWith, suffix.into()).into()
}

/// Attribute is null.
pub fn is_null(attribute: impl Into<SmolStr>) -> StructuredQuery {
    AttributeQuery::new(attribute, Operator::IsNull, Value::Null).into()
}

/// Attribute is not null.
pub fn is_not_null(attribute: impl Into<SmolStr>) -> StructuredQuery {
    AttributeQuery::new(attribute, Operator::IsNotNull, Value::Null).into()
}

/// Attribute lies in the inclusive interval `[lower, upper]`.
pub fn between(
    attribute: impl Into<SmolStr>,
    lower: impl Into<Value>,
    upper: impl Into<Value>,
) -> StructuredQuery {
    RangeQuery::between(attribute, lower, upper).into()
}

/// Attribute is at least `lower` (inclusive, unbounded above).
pub fn at_least(attribute: impl Into<SmolStr>, lower: impl Into<Value>) -> StructuredQuery {
    RangeQuery::new(attribute, Some(lower.into()), None, true, false).into()
}

/// Attribute is at most `upper` (inclusive, unbounded below).
pub fn at_most(attribute: impl Into<SmolStr>, upper: impl Into<Value>) -> StructuredQuery {
    RangeQuery::new(attribute, None, Some(upper.into()), false, true).into()
}

/// Conjoin queries. See [`StructuredQuery::and`] for the collapsing rules.
pub fn and(queries: impl IntoIterator<Item = StructuredQuery>) -> StructuredQuery {
    StructuredQuery::and(queries)
}

/// Disjoin queries. See [`StructuredQuery::or`] for the collapsing rules.
pub fn or(queries: impl IntoIterator<Item = StructuredQuery>) -> StructuredQuery {
    StructuredQuery::or(queries)
}
