//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    #[error("Unknown advisor: {0}")]
    UnknownAdvisor(String),

    #[error("Unknown resolution policy: {0}")]
    UnknownPolicy(String),

    #[error("Primary advisor '{0}' produced no response")]
    MissingPrimary(String),
}

impl DomainError {
    /// Check if this error is fatal for a coordination round
    pub fn is_fatal(&self) -> bool {
        matches!(self, DomainError::MissingPrimary(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_primary_display() {
        let error = DomainError::MissingPrimary("coach".to_string());
        assert_eq!(error.to_string(), "Primary advisor 'coach' produced no response");
    }

    #[test]
    fn test_is_fatal() {
        assert!(DomainError::MissingPrimary("coach".to_string()).is_fatal());
        assert!(!DomainError::UnknownAdvisor("dietician".to_string()).is_fatal());
        assert!(!DomainError::InvalidQuery("empty".to_string()).is_fatal());
    }
}
