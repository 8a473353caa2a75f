//! # sift-sql
//!
//! SQL translator for Sift structured queries.
//!
//! Walks a [`sift_query::StructuredQuery`] tree and emits a parameterized
//! `WHERE` fragment plus the values to bind, for PostgreSQL, MySQL, or
//! SQLite placeholder styles. This crate only renders text; executing the
//! resulting statement belongs to the caller's database client.
//!
//! ## Example
//!
//! ```rust
//! use sift_query::builder::{and, eq, is_in};
//! use sift_sql::{Dialect, SqlTranslator};
//!
//! let query = and([
//!     eq("status", "active"),
//!     is_in("role", vec!["admin", "moderator"]),
//! ]);
//!
//! let filter = SqlTranslator::new(Dialect::PostgreSQL).translate(&query).unwrap();
//! assert_eq!(filter.sql(), "(status = $1 AND role IN ($2, $3))");
//! ```
//!
//! ## Empty composites
//!
//! This translator renders the boolean identities: an AND with no children
//! becomes `TRUE`, an OR with no children becomes `FALSE`.

pub mod dialect;
pub mod error;
pub mod translator;

pub use dialect::{Dialect, needs_quoting};
pub use error::{SqlError, SqlResult};
pub use translator::{SqlFilter, SqlTranslator};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::dialect::Dialect;
    pub use crate::error::{SqlError, SqlResult};
    pub use crate::translator::{SqlFilter, SqlTranslator};
}
