//! Query value object

use super::error::DomainError;
use serde::{Deserialize, Serialize};

/// User input submitted to the chat server (Value Object)
///
/// Always trimmed and never empty. Whitespace-only input cannot become a
/// `Query`, which is what keeps an empty submission from opening a stream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Query {
    text: String,
}

impl Query {
    /// Trim the input and build a query, or `None` if nothing is left.
    pub fn try_new(input: &str) -> Option<Self> {
        let text = input.trim();
        if text.is_empty() {
            None
        } else {
            Some(Self {
                text: text.to_string(),
            })
        }
    }

    /// Get the query text
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Consume and return the inner text
    pub fn into_text(self) -> String {
        self.text
    }
}

impl std::str::FromStr for Query {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Query::try_new(s).ok_or(DomainError::EmptyQuery)
    }
}

impl std::fmt::Display for Query {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_is_trimmed() {
        let q = Query::try_new("  What is Rust?\n").unwrap();
        assert_eq!(q.text(), "What is Rust?");
    }

    #[test]
    fn test_try_new_empty() {
        assert!(Query::try_new("").is_none());
        assert!(Query::try_new("   ").is_none());
        assert!(Query::try_new("\n\t ").is_none());
    }

    #[test]
    fn test_from_str_empty_is_error() {
        assert_eq!("  ".parse::<Query>(), Err(DomainError::EmptyQuery));
        assert_eq!("hi".parse::<Query>().unwrap().into_text(), "hi");
    }
}
