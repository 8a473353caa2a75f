//! The traversal contract implemented once per target backend.
//!
//! A translator implements [`QueryVisitor`] with exactly one operation per
//! node kind, then exposes its own entry point that takes a tree root and
//! returns the backend-native filter representation. Because the node set
//! is a closed enum, a translator that misses a kind fails to compile; the
//! exhaustiveness check the classic pattern defers to runtime happens here
//! at definition time.
//!
//! Composite operations decide how to combine children, typically by
//! dispatching into each child in order and joining the fragments with the
//! backend's own AND/OR operator:
//!
//! ```rust
//! use sift_query::{
//!     AndQuery, AttributeQuery, OrQuery, QueryVisitor, RangeQuery, StructuredQuery,
//! };
//!
//! /// Renders a tree as its attribute names joined by `&`/`|`.
//! struct Outline;
//!
//! impl QueryVisitor for Outline {
//!     type Output = String;
//!     type Error = std::convert::Infallible;
//!
//!     fn visit_attribute(&mut self, query: &AttributeQuery) -> Result<String, Self::Error> {
//!         Ok(query.attribute().to_string())
//!     }
//!
//!     fn visit_range(&mut self, query: &RangeQuery) -> Result<String, Self::Error> {
//!         Ok(query.attribute().to_string())
//!     }
//!
//!     fn visit_and(&mut self, query: &AndQuery) -> Result<String, Self::Error> {
//!         let parts: Vec<_> = query
//!             .queries()
//!             .iter()
//!             .map(|child| child.dispatch(self))
//!             .collect::<Result<_, _>>()?;
//!         Ok(format!("({})", parts.join(" & ")))
//!     }
//!
//!     fn visit_or(&mut self, query: &OrQuery) -> Result<String, Self::Error> {
//!         let parts: Vec<_> = query
//!             .queries()
//!             .iter()
//!             .map(|child| child.dispatch(self))
//!             .collect::<Result<_, _>>()?;
//!         Ok(format!("({})", parts.join(" | ")))
//!     }
//! }
//! ```

use crate::query::{AndQuery, AttributeQuery, OrQuery, RangeQuery};

/// Polymorphic traversal capability over the closed set of node kinds.
///
/// Implementations may accumulate state across operations (`&mut self`),
/// but a traversal is a single synchronous depth-first walk; each
/// operation's result is a function of the node and the state accumulated
/// so far.
pub trait QueryVisitor {
    /// The backend-native representation produced per node.
    type Output;
    /// The translator's failure type.
    type Error;

    /// Render a leaf attribute predicate.
    fn visit_attribute(&mut self, query: &AttributeQuery) -> Result<Self::Output, Self::Error>;

    /// Render a leaf range predicate.
    fn visit_range(&mut self, query: &RangeQuery) -> Result<Self::Output, Self::Error>;

    /// Render a conjunction, recursing into its children as needed.
    fn visit_and(&mut self, query: &AndQuery) -> Result<Self::Output, Self::Error>;

    /// Render a disjunction, recursing into its children as needed.
    fn visit_or(&mut self, query: &OrQuery) -> Result<Self::Output, Self::Error>;
}
