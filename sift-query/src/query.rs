//! Structured query nodes: leaf predicates and logical composites.
//!
//! A structured query is a tree of [`StructuredQuery`] nodes, built
//! bottom-up and handed to a backend translator for rendering. The tree
//! itself never executes anything; it only describes the boolean filter.
//!
//! ```rust
//! use sift_query::{AndQuery, AttributeQuery, Operator, StructuredQuery};
//!
//! let mut group = AndQuery::new([
//!     AttributeQuery::new("status", Operator::Equals, "active").into(),
//! ]);
//! group.add_query(AttributeQuery::new("age", Operator::GreaterThan, 18).into());
//!
//! assert_eq!(group.queries().len(), 2);
//! let root = StructuredQuery::And(group);
//! ```

use std::fmt;

use smol_str::SmolStr;

use crate::value::Value;
use crate::visitor::QueryVisitor;

/// Comparison operators for leaf predicates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    /// Equals the value. A null value means "attribute is null".
    Equals,
    /// Not equals the value. A null value means "attribute is not null".
    NotEquals,
    /// Less than.
    LessThan,
    /// Less than or equal.
    LessThanOrEqual,
    /// Greater than.
    GreaterThan,
    /// Greater than or equal.
    GreaterThanOrEqual,
    /// In a list of values.
    In,
    /// Not in a list of values.
    NotIn,
    /// Contains a substring.
    Contains,
    /// Starts with a prefix.
    StartsWith,
    /// Ends with a suffix.
    EndsWith,
    /// Attribute is null.
    IsNull,
    /// Attribute is not null.
    IsNotNull,
}

impl Operator {
    /// Operators that carry a list value.
    pub fn expects_list(&self) -> bool {
        matches!(self, Self::In | Self::NotIn)
    }

    /// Operators that carry no value at all.
    pub fn expects_no_value(&self) -> bool {
        matches!(self, Self::IsNull | Self::IsNotNull)
    }

    /// Operators that carry a string value.
    pub fn expects_string(&self) -> bool {
        matches!(self, Self::Contains | Self::StartsWith | Self::EndsWith)
    }

    /// Ordering operators, which reject null values.
    pub fn is_ordering(&self) -> bool {
        matches!(
            self,
            Self::LessThan | Self::LessThanOrEqual | Self::GreaterThan | Self::GreaterThanOrEqual
        )
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Equals => "equals",
            Self::NotEquals => "not_equals",
            Self::LessThan => "less_than",
            Self::LessThanOrEqual => "less_than_or_equal",
            Self::GreaterThan => "greater_than",
            Self::GreaterThanOrEqual => "greater_than_or_equal",
            Self::In => "in",
            Self::NotIn => "not_in",
            Self::Contains => "contains",
            Self::StartsWith => "starts_with",
            Self::EndsWith => "ends_with",
            Self::IsNull => "is_null",
            Self::IsNotNull => "is_not_null",
        };
        f.write_str(name)
    }
}

/// Leaf predicate comparing one attribute against a value.
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeQuery {
    attribute: SmolStr,
    operator: Operator,
    value: Value,
}

impl AttributeQuery {
    /// Create a new attribute predicate.
    pub fn new(
        attribute: impl Into<SmolStr>,
        operator: Operator,
        value: impl Into<Value>,
    ) -> Self {
        Self {
            attribute: attribute.into(),
            operator,
            value: value.into(),
        }
    }

    /// The attribute name this predicate filters on.
    pub fn attribute(&self) -> &str {
        &self.attribute
    }

    /// The comparison operator.
    pub fn operator(&self) -> Operator {
        self.operator
    }

    /// The value being compared against.
    pub fn value(&self) -> &Value {
        &self.value
    }
}

/// Leaf predicate matching an attribute against a bounded interval.
///
/// Either bound may be absent for a half-open interval, but not both.
#[derive(Debug, Clone, PartialEq)]
pub struct RangeQuery {
    attribute: SmolStr,
    lower: Option<Value>,
    upper: Option<Value>,
    lower_inclusive: bool,
    upper_inclusive: bool,
}

impl RangeQuery {
    /// Create a new range predicate.
    pub fn new(
        attribute: impl Into<SmolStr>,
        lower: Option<Value>,
        upper: Option<Value>,
        lower_inclusive: bool,
        upper_inclusive: bool,
    ) -> Self {
        Self {
            attribute: attribute.into(),
            lower,
            upper,
            lower_inclusive,
            upper_inclusive,
        }
    }

    /// Inclusive range over both bounds.
    pub fn between(
        attribute: impl Into<SmolStr>,
        lower: impl Into<Value>,
        upper: impl Into<Value>,
    ) -> Self {
        Self::new(attribute, Some(lower.into()), Some(upper.into()), true, true)
    }

    /// The attribute name this predicate filters on.
    pub fn attribute(&self) -> &str {
        &self.attribute
    }

    /// The lower bound, if any.
    pub fn lower(&self) -> Option<&Value> {
        self.lower.as_ref()
    }

    /// The upper bound, if any.
    pub fn upper(&self) -> Option<&Value> {
        self.upper.as_ref()
    }

    /// Whether the lower bound is included in the interval.
    pub fn lower_inclusive(&self) -> bool {
        self.lower_inclusive
    }

    /// Whether the upper bound is included in the interval.
    pub fn upper_inclusive(&self) -> bool {
        self.upper_inclusive
    }
}

macro_rules! composite_query {
    ($name:ident, $doc:literal) => {
        #[doc = $doc]
        ///
        /// The composite exclusively owns its children; construction takes
        /// ownership of the caller's collection and `queries` hands back an
        /// immutable view, so the tree cannot be aliased or mutated behind
        /// the composite's back. Child order is insertion order and is
        /// preserved exactly through traversal.
        #[derive(Debug, Clone, Default, PartialEq)]
        pub struct $name {
            queries: Vec<StructuredQuery>,
        }

        impl $name {
            /// Create a composite from an owned collection of children.
            pub fn new(queries: impl IntoIterator<Item = StructuredQuery>) -> Self {
                Self {
                    queries: queries.into_iter().collect(),
                }
            }

            /// Append one child query at the end of the sequence.
            pub fn add_query(&mut self, query: StructuredQuery) {
                self.queries.push(query);
            }

            /// The ordered sequence of children.
            pub fn queries(&self) -> &[StructuredQuery] {
                &self.queries
            }

            /// Number of direct children.
            pub fn len(&self) -> usize {
                self.queries.len()
            }

            /// Whether this composite has no children.
            pub fn is_empty(&self) -> bool {
                self.queries.is_empty()
            }
        }
    };
}

composite_query!(AndQuery, "Conjunction of child queries.");
composite_query!(OrQuery, "Disjunction of child queries.");

/// A node in a structured query tree.
///
/// This is the closed set of node kinds; every [`QueryVisitor`] handles all
/// of them, checked at compile time. Adding a kind here means adding one
/// operation to the visitor trait and a rendering to every translator;
/// adding a backend means one new visitor implementation and no node
/// changes.
#[derive(Debug, Clone, PartialEq)]
pub enum StructuredQuery {
    /// Leaf attribute predicate.
    Attribute(AttributeQuery),
    /// Leaf range predicate.
    Range(RangeQuery),
    /// Conjunction of children.
    And(AndQuery),
    /// Disjunction of children.
    Or(OrQuery),
}

impl StructuredQuery {
    /// Forward this node to the visitor operation matching its kind.
    ///
    /// This is a pure forwarding call. It never recurses into children;
    /// whether and how to combine child results is the visitor's decision.
    pub fn dispatch<V: QueryVisitor>(&self, visitor: &mut V) -> Result<V::Output, V::Error> {
        match self {
            Self::Attribute(query) => visitor.visit_attribute(query),
            Self::Range(query) => visitor.visit_range(query),
            Self::And(query) => visitor.visit_and(query),
            Self::Or(query) => visitor.visit_or(query),
        }
    }

    /// Conjoin queries, collapsing the trivial cases.
    ///
    /// Zero children produce the empty AND composite (matches everything
    /// under the identity policy); a single child is returned as-is.
    pub fn and(queries: impl IntoIterator<Item = StructuredQuery>) -> Self {
        let mut queries: Vec<_> = queries.into_iter().collect();
        match queries.len() {
            1 => queries.remove(0),
            _ => Self::And(AndQuery::new(queries)),
        }
    }

    /// Disjoin queries, collapsing the trivial cases.
    ///
    /// Zero children produce the empty OR composite (matches nothing under
    /// the identity policy); a single child is returned as-is.
    pub fn or(queries: impl IntoIterator<Item = StructuredQuery>) -> Self {
        let mut queries: Vec<_> = queries.into_iter().collect();
        match queries.len() {
            1 => queries.remove(0),
            _ => Self::Or(OrQuery::new(queries)),
        }
    }

    /// Combine with another query using AND, flattening an existing
    /// top-level conjunction.
    pub fn and_then(self, other: StructuredQuery) -> Self {
        match self {
            Self::And(mut group) => {
                group.add_query(other);
                Self::And(group)
            }
            _ => Self::And(AndQuery::new([self, other])),
        }
    }

    /// Combine with another query using OR, flattening an existing
    /// top-level disjunction.
    pub fn or_else(self, other: StructuredQuery) -> Self {
        match self {
            Self::Or(mut group) => {
                group.add_query(other);
                Self::Or(group)
            }
            _ => Self::Or(OrQuery::new([self, other])),
        }
    }

    /// Total number of nodes in this tree, including this one.
    pub fn node_count(&self) -> usize {
        match self {
            Self::Attribute(_) | Self::Range(_) => 1,
            Self::And(group) => 1 + group.queries().iter().map(Self::node_count).sum::<usize>(),
            Self::Or(group) => 1 + group.queries().iter().map(Self::node_count).sum::<usize>(),
        }
    }

    /// Depth of this tree; a leaf has depth 1.
    pub fn depth(&self) -> usize {
        match self {
            Self::Attribute(_) | Self::Range(_) => 1,
            Self::And(group) => {
                1 + group.queries().iter().map(Self::depth).max().unwrap_or(0)
            }
            Self::Or(group) => {
                1 + group.queries().iter().map(Self::depth).max().unwrap_or(0)
            }
        }
    }
}

impl From<AttributeQuery> for StructuredQuery {
    fn from(query: AttributeQuery) -> Self {
        Self::Attribute(query)
    }
}

impl From<RangeQuery> for StructuredQuery {
    fn from(query: RangeQuery) -> Self {
        Self::Range(query)
    }
}

impl From<AndQuery> for StructuredQuery {
    fn from(query: AndQuery) -> Self {
        Self::And(query)
    }
}

impl From<OrQuery> for StructuredQuery {
    fn from(query: OrQuery) -> Self {
        Self::Or(query)
    }
}
