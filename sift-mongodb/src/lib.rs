//! # sift-mongodb
//!
//! MongoDB translator for Sift structured queries.
//!
//! Walks a [`sift_query::StructuredQuery`] tree and emits a BSON filter
//! [`Document`](bson::Document) using the server's query operators
//! (`$and`, `$or`, `$gte`, `$in`, `$regex`, ...). This crate only builds
//! the filter; handing it to a collection belongs to the caller's driver.
//!
//! ## Example
//!
//! ```rust
//! use sift_mongodb::DocumentTranslator;
//! use sift_query::builder::{eq, gte, or};
//!
//! let query = or([eq("role", "admin"), gte("age", 18)]);
//! let filter = DocumentTranslator::new().translate(&query).unwrap();
//! assert_eq!(filter.get_array("$or").unwrap().len(), 2);
//! ```
//!
//! ## Empty composites
//!
//! An AND with no children renders as the empty document (matches
//! everything); an OR with no children renders as `{"$nor": [{}]}`
//! (matches nothing).

pub mod error;
pub mod translator;

pub use bson::{Bson, Document, doc};
pub use error::{DocumentError, DocumentResult};
pub use translator::DocumentTranslator;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::{DocumentError, DocumentResult};
    pub use crate::translator::DocumentTranslator;
    pub use bson::{Bson, Document, doc};
}
