//! Domain errors - error types for the domain layer

use thiserror::Error;

use crate::value_objects::Snowflake;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Store Failures
    // =========================================================================
    /// The store is transiently locked by a concurrent writer. Eligible for
    /// retry; surfaced only after the retry budget is spent.
    #[error("Store busy: {0}")]
    StoreBusy(String),

    /// Permanent store failure (malformed query, schema mismatch). Never
    /// retried.
    #[error("Database error: {0}")]
    Database(String),

    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("Warning records not found for user: {0}")]
    WarningsNotFound(Snowflake),

    #[error("No timed sanction for target: {0}")]
    SanctionNotFound(Snowflake),

    #[error("Setting not found: {0}")]
    SettingNotFound(String),

    // =========================================================================
    // Internal
    // =========================================================================
    #[error("Internal error: {0}")]
    Internal(String),
}

impl DomainError {
    /// True when the error signifies transient lock contention
    pub fn is_busy(&self) -> bool {
        matches!(self, Self::StoreBusy(_))
    }

    /// True when the error is a not-found condition
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::WarningsNotFound(_) | Self::SanctionNotFound(_) | Self::SettingNotFound(_)
        )
    }

    /// Error code string for reporting surfaces
    pub fn code(&self) -> &'static str {
        match self {
            Self::StoreBusy(_) => "STORE_BUSY",
            Self::Database(_) => "DATABASE_ERROR",
            Self::WarningsNotFound(_) | Self::SanctionNotFound(_) | Self::SettingNotFound(_) => {
                "NOT_FOUND"
            }
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_busy_classification() {
        assert!(DomainError::StoreBusy("database is locked".into()).is_busy());
        assert!(!DomainError::Database("syntax error".into()).is_busy());
    }

    #[test]
    fn test_not_found_classification() {
        assert!(DomainError::SanctionNotFound(Snowflake::new(7)).is_not_found());
        assert!(!DomainError::StoreBusy("locked".into()).is_not_found());
    }
}
