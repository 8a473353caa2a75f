//! Error types for search DSL translation.

use sift_query::QueryError;
use thiserror::Error;

/// Result type for search DSL translation.
pub type SearchResult<T> = Result<T, SearchError>;

/// Errors that can occur while rendering a query tree to the search DSL.
#[derive(Error, Debug)]
pub enum SearchError {
    /// The tree failed validation before rendering started.
    #[error(transparent)]
    Query(#[from] QueryError),

    /// A value kind that has no term-level representation.
    #[error("cannot render {kind} value for attribute `{attribute}` in a term clause")]
    UnsupportedValue {
        /// The attribute whose value could not be rendered.
        attribute: String,
        /// The offending value kind.
        kind: &'static str,
    },
}

impl From<SearchError> for QueryError {
    fn from(err: SearchError) -> Self {
        match err {
            SearchError::Query(err) => err,
            SearchError::UnsupportedValue { ref attribute, .. } => {
                let attribute = attribute.clone();
                QueryError::unsupported(err.to_string()).with_attribute(attribute)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_into_query_error() {
        let err = SearchError::UnsupportedValue {
            attribute: "payload".to_string(),
            kind: "json",
        };
        let query_err: QueryError = err.into();
        assert!(query_err.is_unsupported());
    }
}
