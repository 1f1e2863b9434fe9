//! Error types for the linq crate.

use thiserror::Error;

/// Errors reported by query operations.
///
/// Every failure is local to the call that detects it. The builder the
/// operation was invoked on is left untouched.
#[derive(Debug, Error)]
pub enum QueryError {
    /// The operation needs at least one element.
    #[error("the collection is empty")]
    EmptyCollection,

    /// No element satisfies the condition.
    #[error("no element satisfies the condition")]
    NoMatch,

    /// More than one element matched where exactly one was expected.
    #[error("expected a single element, found {count}")]
    TooManyElements { count: usize },

    /// Two elements (or their keys) have no defined order, e.g. `NaN`.
    #[error("elements at positions {left} and {right} cannot be compared")]
    NotComparable { left: usize, right: usize },

    /// An element has no numeric value.
    #[error("element at position {index} is not numeric")]
    NotNumeric { index: usize },

    /// Slice amount exceeds the number of elements.
    #[error("amount {amount} is out of range for a collection of {len} elements")]
    InvalidArgument { amount: usize, len: usize },

    /// Invalid regular expression pattern.
    #[error("invalid regex pattern: {0}")]
    InvalidRegex(#[from] regex::Error),
}

impl QueryError {
    /// Returns `true` for the "nothing found" kinds that `*_or_default`
    /// operations turn into an absent result.
    pub fn is_absent(&self) -> bool {
        matches!(self, QueryError::EmptyCollection | QueryError::NoMatch)
    }
}

/// Result type for query operations.
pub type Result<T> = std::result::Result<T, QueryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_kinds() {
        assert!(QueryError::EmptyCollection.is_absent());
        assert!(QueryError::NoMatch.is_absent());
        assert!(!QueryError::TooManyElements { count: 2 }.is_absent());
        assert!(!QueryError::NotNumeric { index: 0 }.is_absent());
    }

    #[test]
    fn messages() {
        assert_eq!(
            QueryError::TooManyElements { count: 3 }.to_string(),
            "expected a single element, found 3"
        );
        assert_eq!(
            QueryError::InvalidArgument { amount: 5, len: 4 }.to_string(),
            "amount 5 is out of range for a collection of 4 elements"
        );
    }
}
