//! Error types for SQL translation.

use sift_query::QueryError;
use thiserror::Error;

/// Result type for SQL translation.
pub type SqlResult<T> = Result<T, SqlError>;

/// Errors that can occur while rendering a query tree to SQL.
#[derive(Error, Debug)]
pub enum SqlError {
    /// The tree failed validation before rendering started.
    #[error(transparent)]
    Query(#[from] QueryError),

    /// A value kind that cannot be bound as a SQL parameter.
    #[error("cannot bind {kind} value for attribute `{attribute}`")]
    UnsupportedValue {
        /// The attribute whose value could not be bound.
        attribute: String,
        /// The offending value kind.
        kind: &'static str,
    },
}

impl From<SqlError> for QueryError {
    fn from(err: SqlError) -> Self {
        match err {
            SqlError::Query(err) => err,
            SqlError::UnsupportedValue { ref attribute, .. } => {
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
    fn test_unsupported_value_display() {
        let err = SqlError::UnsupportedValue {
            attribute: "payload".to_string(),
            kind: "json",
        };
        assert_eq!(
            err.to_string(),
            "cannot bind json value for attribute `payload`"
        );
    }

    #[test]
    fn test_into_query_error() {
        let err = SqlError::UnsupportedValue {
            attribute: "payload".to_string(),
            kind: "json",
        };
        let query_err: QueryError = err.into();
        assert!(query_err.is_unsupported());
        assert_eq!(query_err.context.attribute.as_deref(), Some("payload"));
    }
}
