//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, PartialEq, Eq)]
pub enum DomainError {
    #[error("Query cannot be empty")]
    EmptyQuery,

    #[error("Transcript has no message to update")]
    EmptyTranscript,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(DomainError::EmptyQuery.to_string(), "Query cannot be empty");
        assert_eq!(
            DomainError::EmptyTranscript.to_string(),
            "Transcript has no message to update"
        );
    }
}
