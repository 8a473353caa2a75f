//! Pre-traversal validation of query trees.
//!
//! Structural problems are rejected before any translator renders a
//! fragment: translators run [`StructuredQuery::validate_with`] at their
//! entry point, so a malformed tree never produces a partial backend
//! expression.

use tracing::debug;

use crate::error::{QueryError, QueryResult};
use crate::query::{AttributeQuery, RangeQuery, StructuredQuery};
use crate::value::Value;

/// Bounds on the shape of a query tree.
///
/// Traversal work is proportional to tree size, so callers that accept
/// trees from untrusted input bound them here rather than with timeouts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryLimits {
    /// Maximum tree depth; a leaf has depth 1.
    pub max_depth: usize,
    /// Maximum total number of nodes.
    pub max_nodes: usize,
    /// Whether zero-child composites are accepted.
    ///
    /// Empty composites are legal by default and render under the identity
    /// policy (AND-of-none matches everything, OR-of-none matches
    /// nothing). Callers for whom an empty composite only ever signals a
    /// bug can reject them here instead.
    pub allow_empty_composites: bool,
}

impl Default for QueryLimits {
    fn default() -> Self {
        Self {
            max_depth: 64,
            max_nodes: 4096,
            allow_empty_composites: true,
        }
    }
}

impl QueryLimits {
    /// Set the maximum tree depth.
    pub fn max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Set the maximum node count.
    pub fn max_nodes(mut self, max_nodes: usize) -> Self {
        self.max_nodes = max_nodes;
        self
    }

    /// Reject zero-child composites instead of rendering identities.
    pub fn deny_empty_composites(mut self) -> Self {
        self.allow_empty_composites = false;
        self
    }
}

impl StructuredQuery {
    /// Validate this tree against the default [`QueryLimits`].
    pub fn validate(&self) -> QueryResult<()> {
        self.validate_with(&QueryLimits::default())
    }

    /// Validate this tree against the given limits.
    ///
    /// Checks attribute names, operator/value shapes, range bounds, and
    /// tree size in a single pass.
    pub fn validate_with(&self, limits: &QueryLimits) -> QueryResult<()> {
        let mut nodes = 0usize;
        walk(self, 1, &mut nodes, limits)?;
        debug!(nodes, depth = self.depth(), "validated query tree");
        Ok(())
    }
}

fn walk(
    query: &StructuredQuery,
    depth: usize,
    nodes: &mut usize,
    limits: &QueryLimits,
) -> QueryResult<()> {
    *nodes += 1;
    if *nodes > limits.max_nodes {
        return Err(QueryError::too_complex(format!(
            "tree has more than {} nodes",
            limits.max_nodes
        )));
    }
    if depth > limits.max_depth {
        return Err(QueryError::too_complex(format!(
            "tree depth exceeds limit {}",
            limits.max_depth
        )));
    }

    match query {
        StructuredQuery::Attribute(leaf) => check_attribute(leaf),
        StructuredQuery::Range(range) => check_range(range),
        StructuredQuery::And(group) => {
            if group.is_empty() && !limits.allow_empty_composites {
                return Err(QueryError::empty_composite("AND"));
            }
            for child in group.queries() {
                walk(child, depth + 1, nodes, limits)?;
            }
            Ok(())
        }
        StructuredQuery::Or(group) => {
            if group.is_empty() && !limits.allow_empty_composites {
                return Err(QueryError::empty_composite("OR"));
            }
            for child in group.queries() {
                walk(child, depth + 1, nodes, limits)?;
            }
            Ok(())
        }
    }
}

fn check_attribute(leaf: &AttributeQuery) -> QueryResult<()> {
    if leaf.attribute().is_empty() {
        return Err(QueryError::invalid_attribute("empty attribute name"));
    }

    let operator = leaf.operator();
    let value = leaf.value();
    if operator.expects_list() && !value.is_list() {
        return Err(QueryError::invalid_filter(format!(
            "operator `{operator}` requires a list value, got {}",
            value.kind()
        ))
        .with_attribute(leaf.attribute()));
    }
    if operator.expects_no_value() && !value.is_null() {
        return Err(QueryError::invalid_filter(format!(
            "operator `{operator}` takes no value, got {}",
            value.kind()
        ))
        .with_attribute(leaf.attribute()));
    }
    if operator.expects_string() && value.as_str().is_none() {
        return Err(QueryError::invalid_filter(format!(
            "operator `{operator}` requires a string value, got {}",
            value.kind()
        ))
        .with_attribute(leaf.attribute()));
    }
    if operator.is_ordering() && (value.is_null() || value.is_list()) {
        return Err(QueryError::invalid_filter(format!(
            "operator `{operator}` requires a scalar value, got {}",
            value.kind()
        ))
        .with_attribute(leaf.attribute()));
    }
    if !operator.expects_list() && !operator.expects_no_value() && value.is_list() {
        return Err(QueryError::invalid_filter(format!(
            "operator `{operator}` cannot compare against a list"
        ))
        .with_attribute(leaf.attribute()));
    }
    Ok(())
}

fn check_range(range: &RangeQuery) -> QueryResult<()> {
    if range.attribute().is_empty() {
        return Err(QueryError::invalid_attribute("empty attribute name"));
    }
    if range.lower().is_none() && range.upper().is_none() {
        return Err(QueryError::invalid_filter("range with no bounds")
            .with_attribute(range.attribute()));
    }
    for bound in [range.lower(), range.upper()].into_iter().flatten() {
        if matches!(bound, Value::Null | Value::List(_)) {
            return Err(QueryError::invalid_filter(format!(
                "range bound must be a scalar, got {}",
                bound.kind()
            ))
            .with_attribute(range.attribute()));
        }
    }
    Ok(())
}
