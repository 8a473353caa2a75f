//! Error types for MongoDB filter translation.

use sift_query::QueryError;
use thiserror::Error;

/// Result type for MongoDB filter translation.
pub type DocumentResult<T> = Result<T, DocumentError>;

/// Errors that can occur while rendering a query tree to a filter document.
#[derive(Error, Debug)]
pub enum DocumentError {
    /// The tree failed validation before rendering started.
    #[error(transparent)]
    Query(#[from] QueryError),

    /// BSON serialization error.
    #[error("bson error: {0}")]
    Bson(#[from] bson::ser::Error),
}

impl From<DocumentError> for QueryError {
    fn from(err: DocumentError) -> Self {
        match err {
            DocumentError::Query(err) => err,
            DocumentError::Bson(err) => {
                QueryError::unsupported("value is not representable as BSON").with_source(err)
            }
        }
    }
}
