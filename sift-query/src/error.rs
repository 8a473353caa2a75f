//! Error types for structured query construction and translation.
//!
//! Error codes follow a pattern: Q{category}{number}
//! - 1xxx: Construction errors (invalid leaf, empty composite, ...)
//! - 5xxx: Complexity errors (tree over configured limits)
//! - 7xxx: Configuration errors (a translator cannot express a node)
//! - 9xxx: Internal errors
//!
//! ```rust
//! use sift_query::{QueryError, ErrorCode};
//!
//! let err = QueryError::invalid_filter("operator `in` requires a list value");
//! assert_eq!(err.code, ErrorCode::InvalidFilter);
//! assert_eq!(err.code.code(), "Q1001");
//! ```

use std::fmt;
use thiserror::Error;

/// Result type for structured query operations.
pub type QueryResult<T> = Result<T, QueryError>;

/// Error codes for programmatic error handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Construction errors (1xxx)
    /// Malformed leaf predicate (Q1001).
    InvalidFilter = 1001,
    /// Empty or malformed attribute name (Q1002).
    InvalidAttribute = 1002,
    /// Empty composite rejected by the caller's limits (Q1003).
    EmptyComposite = 1003,

    // Complexity errors (5xxx)
    /// Tree exceeds configured depth or node limits (Q5001).
    TooComplex = 5001,

    // Configuration errors (7xxx)
    /// A translator cannot express a node it was handed (Q7001).
    Unsupported = 7001,

    // Internal errors (9xxx)
    /// Internal error (Q9001).
    Internal = 9001,
}

impl ErrorCode {
    /// Get the error code string (e.g., "Q1001").
    pub fn code(&self) -> String {
        format!("Q{}", *self as u16)
    }

    /// Get a short description of the error code.
    pub fn description(&self) -> &'static str {
        match self {
            Self::InvalidFilter => "Malformed leaf predicate",
            Self::InvalidAttribute => "Invalid attribute name",
            Self::EmptyComposite => "Empty composite rejected",
            Self::TooComplex => "Query tree too complex",
            Self::Unsupported => "Node not expressible by this translator",
            Self::Internal => "Internal error",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Additional context for an error.
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// The attribute involved, if any.
    pub attribute: Option<String>,
    /// The operation that was being performed.
    pub operation: Option<String>,
    /// Suggestions for fixing the error.
    pub suggestions: Vec<String>,
}

/// Errors that can occur while building, validating, or translating a
/// structured query.
#[derive(Error, Debug)]
pub struct QueryError {
    /// The error code.
    pub code: ErrorCode,
    /// The error message.
    pub message: String,
    /// Additional context.
    pub context: ErrorContext,
    /// The source error (if any).
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl fmt::Display for QueryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code.code(), self.message)
    }
}

impl QueryError {
    /// Create a new error with the given code and message.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            context: ErrorContext::default(),
            source: None,
        }
    }

    /// Set the attribute this error refers to.
    pub fn with_attribute(mut self, attribute: impl Into<String>) -> Self {
        self.context.attribute = Some(attribute.into());
        self
    }

    /// Add context about the operation.
    pub fn with_operation(mut self, operation: impl Into<String>) -> Self {
        self.context.operation = Some(operation.into());
        self
    }

    /// Add a suggestion for fixing the error.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.context.suggestions.push(suggestion.into());
        self
    }

    /// Set the source error.
    pub fn with_source<E: std::error::Error + Send + Sync + 'static>(mut self, source: E) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    // ============== Constructor Functions ==============

    /// Create a malformed-leaf error.
    pub fn invalid_filter(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidFilter, message)
    }

    /// Create an invalid-attribute error.
    pub fn invalid_attribute(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidAttribute, message)
            .with_suggestion("Attribute names must be non-empty")
    }

    /// Create an empty-composite error.
    pub fn empty_composite(kind: &str) -> Self {
        Self::new(
            ErrorCode::EmptyComposite,
            format!("empty {kind} composite rejected by limits"),
        )
        .with_suggestion("Add at least one child query, or allow empty composites in QueryLimits")
    }

    /// Create a complexity error.
    pub fn too_complex(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::TooComplex, message)
            .with_suggestion("Raise the limits with QueryLimits, or build a smaller tree")
    }

    /// Create an unsupported-node error.
    pub fn unsupported(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Unsupported, message)
    }

    /// Create an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Internal, message)
    }

    // ============== Error Checks ==============

    /// Check if this is a construction error.
    pub fn is_construction_error(&self) -> bool {
        matches!(
            self.code,
            ErrorCode::InvalidFilter | ErrorCode::InvalidAttribute | ErrorCode::EmptyComposite
        )
    }

    /// Check if this is a complexity error.
    pub fn is_too_complex(&self) -> bool {
        self.code == ErrorCode::TooComplex
    }

    /// Check if this is a translator configuration error.
    pub fn is_unsupported(&self) -> bool {
        self.code == ErrorCode::Unsupported
    }

    /// Display the full error with all context and suggestions.
    pub fn display_full(&self) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "Error [{}] {}: {}\n",
            self.code.code(),
            self.code.description(),
            self.message
        ));

        if let Some(ref attribute) = self.context.attribute {
            output.push_str(&format!("  → Attribute: {attribute}\n"));
        }
        if let Some(ref operation) = self.context.operation {
            output.push_str(&format!("  → While: {operation}\n"));
        }
        if !self.context.suggestions.is_empty() {
            output.push_str("\nSuggestions:\n");
            for (i, suggestion) in self.context.suggestions.iter().enumerate() {
                output.push_str(&format!("  {}. {suggestion}\n", i + 1));
            }
        }

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_format() {
        assert_eq!(ErrorCode::InvalidFilter.code(), "Q1001");
        assert_eq!(ErrorCode::TooComplex.code(), "Q5001");
        assert_eq!(ErrorCode::Unsupported.code(), "Q7001");
        assert_eq!(
            ErrorCode::InvalidFilter.description(),
            "Malformed leaf predicate"
        );
    }

    #[test]
    fn test_invalid_filter_error() {
        let err = QueryError::invalid_filter("operator `in` requires a list value")
            .with_attribute("status");
        assert!(err.is_construction_error());
        assert_eq!(err.context.attribute, Some("status".to_string()));
        assert!(err.to_string().contains("Q1001"));
    }

    #[test]
    fn test_empty_composite_error() {
        let err = QueryError::empty_composite("AND");
        assert!(err.is_construction_error());
        assert!(err.message.contains("AND"));
        assert!(!err.context.suggestions.is_empty());
    }

    #[test]
    fn test_unsupported_error() {
        let err = QueryError::unsupported("json values cannot be bound as SQL parameters");
        assert!(err.is_unsupported());
        assert!(!err.is_construction_error());
    }

    #[test]
    fn test_display_full() {
        let err = QueryError::too_complex("tree depth 80 exceeds limit 64")
            .with_operation("validating query before translation");
        let output = err.display_full();
        assert!(output.contains("Q5001"));
        assert!(output.contains("Query tree too complex"));
        assert!(output.contains("While"));
        assert!(output.contains("Suggestions"));
    }
}
