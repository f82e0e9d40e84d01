//! Application-level error type
//!
//! The outermost error surface: wraps domain errors and adds the
//! application-only failure classes the reporting layer needs to
//! distinguish.

use thiserror::Error;

use warden_core::DomainError;

/// Application error
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Insufficient permissions")]
    InsufficientPermissions,

    #[error("Hierarchy violation: staff members can only be moderated by admins")]
    HierarchyViolation,

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Stable code for reporting surfaces
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Domain(e) => e.code(),
            Self::NotFound(_) => "NOT_FOUND",
            Self::InsufficientPermissions => "MISSING_PERMISSIONS",
            Self::HierarchyViolation => "HIERARCHY_VIOLATION",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Config(_) => "CONFIG_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

/// Result type for application operations
pub type AppResult<T> = Result<T, AppError>;
