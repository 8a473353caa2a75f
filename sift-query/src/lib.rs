//! # sift-query
//!
//! Backend-agnostic structured queries for the Sift persistence layer.
//!
//! A structured query is a tree of logical combinators (AND, OR) over leaf
//! predicates (attribute comparison, range). The tree never executes
//! anything itself; backend translators implement [`QueryVisitor`] and walk
//! it to emit their engine's native filter representation.
//!
//! This crate provides:
//! - The node types ([`StructuredQuery`], [`AttributeQuery`], [`RangeQuery`],
//!   [`AndQuery`], [`OrQuery`]) and their composition rules
//! - The visitor/dispatch contract ([`QueryVisitor`]) translators implement
//! - A free-function construction DSL ([`builder`])
//! - Pre-traversal validation with [`QueryLimits`]
//! - The shared error taxonomy ([`QueryError`], [`ErrorCode`])
//!
//! ## Building a query
//!
//! ```rust
//! use sift_query::builder::{and, eq, gt, or};
//!
//! let query = or([
//!     and([eq("status", "active"), gt("age", 18)]),
//!     eq("role", "admin"),
//! ]);
//! assert!(query.validate().is_ok());
//! ```
//!
//! ## Composites
//!
//! Composites own their children and preserve insertion order:
//!
//! ```rust
//! use sift_query::{AndQuery, AttributeQuery, Operator};
//!
//! let mut group = AndQuery::new([
//!     AttributeQuery::new("active", Operator::Equals, true).into(),
//! ]);
//! group.add_query(AttributeQuery::new("age", Operator::GreaterThan, 18).into());
//! assert_eq!(group.len(), 2);
//! ```
//!
//! ## Extending
//!
//! The node set is closed and matched exhaustively, so a translator missing
//! an operation for some node kind does not compile. The trade-off runs the
//! other way too: a new node kind means one new [`QueryVisitor`] operation
//! and a change to every translator, while a new backend is a single new
//! visitor implementation touching no node code. This crate deliberately
//! optimizes for cheap backends.

pub mod builder;
pub mod error;
pub mod logging;
pub mod query;
pub mod validate;
pub mod value;
pub mod visitor;

pub use error::{ErrorCode, ErrorContext, QueryError, QueryResult};
pub use query::{AndQuery, AttributeQuery, Operator, OrQuery, RangeQuery, StructuredQuery};
pub use validate::QueryLimits;
pub use value::Value;
pub use visitor::QueryVisitor;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::builder::{
        and, at_least, at_most, between, contains, ends_with, eq, gt, gte, is_in, is_not_null,
        is_null, lt, lte, ne, not_in, or, starts_with,
    };
    pub use crate::error::{ErrorCode, QueryError, QueryResult};
    pub use crate::query::{
        AndQuery, AttributeQuery, Operator, OrQuery, RangeQuery, StructuredQuery,
    };
    pub use crate::validate::QueryLimits;
    pub use crate::value::Value;
    pub use crate::visitor::QueryVisitor;
}
