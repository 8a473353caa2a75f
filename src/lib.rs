//! # Sift
//!
//! Backend-agnostic structured queries with pluggable backend translators.
//!
//! Sift represents boolean search criteria as a tree of logical
//! combinators (AND, OR) over leaf predicates, independent of any storage
//! engine. Translators walk the tree through a visitor contract and emit
//! the native filter representation for their engine:
//!
//! - [`sql`] renders parameterized `WHERE` fragments (PostgreSQL, MySQL,
//!   SQLite placeholder styles)
//! - [`mongodb`] renders BSON filter documents
//! - [`search`] renders an Elasticsearch-style boolean query DSL
//!
//! ## Quick Start
//!
//! ```rust
//! use sift::prelude::*;
//!
//! let query = or([
//!     and([eq("status", "active"), gt("age", 18)]),
//!     eq("role", "admin"),
//! ]);
//!
//! let where_clause = SqlTranslator::postgres().translate(&query).unwrap();
//! assert_eq!(
//!     where_clause.sql(),
//!     "((status = $1 AND age > $2) OR role = $3)"
//! );
//!
//! let document = DocumentTranslator::new().translate(&query).unwrap();
//! assert!(document.contains_key("$or"));
//! ```
//!
//! New backends plug in by implementing [`QueryVisitor`] (one operation
//! per node kind, checked exhaustively at compile time) and exposing an
//! entry point from a tree root to their native representation. No node
//! code changes.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

/// Core node types, visitor contract, builder DSL, and validation.
pub mod query {
    pub use sift_query::*;
}

/// SQL WHERE-fragment translator.
pub mod sql {
    pub use sift_sql::*;
}

/// MongoDB filter-document translator.
pub mod mongodb {
    pub use sift_mongodb::*;
}

/// Search-engine boolean DSL translator.
pub mod search {
    pub use sift_search::*;
}

// Re-export key types at the crate root
pub use sift_query::{
    AndQuery, AttributeQuery, ErrorCode, Operator, OrQuery, QueryError, QueryLimits, QueryResult,
    QueryVisitor, RangeQuery, StructuredQuery, Value,
};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use sift_mongodb::prelude::*;
    pub use sift_query::prelude::*;
    pub use sift_search::prelude::*;
    pub use sift_sql::prelude::*;
}
