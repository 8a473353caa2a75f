//! # sift-search
//!
//! Search-engine translator for Sift structured queries.
//!
//! Walks a [`sift_query::StructuredQuery`] tree and emits a boolean-query
//! DSL fragment as [`serde_json::Value`], in the shape search engines such
//! as Elasticsearch and OpenSearch accept (`bool`/`must`/`should`, `term`,
//! `range`, `wildcard`, `exists`). This crate only renders the fragment;
//! embedding it in a request belongs to the caller's search client.
//!
//! ## Example
//!
//! ```rust
//! use serde_json::json;
//! use sift_query::builder::{and, eq};
//! use sift_search::SearchTranslator;
//!
//! let query = and([eq("status", "active"), eq("role", "admin")]);
//! let dsl = SearchTranslator::new().translate(&query).unwrap();
//! assert_eq!(
//!     dsl,
//!     json!({
//!         "bool": {
//!             "must": [
//!                 { "term": { "status": "active" } },
//!                 { "term": { "role": "admin" } },
//!             ]
//!         }
//!     })
//! );
//! ```
//!
//! ## Empty composites
//!
//! An AND with no children renders as `{"match_all": {}}`; an OR with no
//! children renders as `{"match_none": {}}`.

pub mod error;
pub mod translator;

pub use error::{SearchError, SearchResult};
pub use translator::SearchTranslator;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::{SearchError, SearchResult};
    pub use crate::translator::SearchTranslator;
}
