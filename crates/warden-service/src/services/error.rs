//! Service layer error types
//!
//! One unified error for every moderation operation, mapping the store and
//! adapter failures into the taxonomy the command surface reports.

use std::fmt;

use warden_common::AppError;
use warden_core::DomainError;

use crate::adapter::AdapterError;

/// Service layer error type
#[derive(Debug)]
pub enum ServiceError {
    /// Domain or store failure
    Domain(DomainError),

    /// Platform request failure
    Adapter(AdapterError),

    /// Resource not found (member, ban, mute role, record)
    NotFound { resource: &'static str, id: String },

    /// Actor lacks the required capability tier
    PermissionDenied { required: &'static str },

    /// Actor may not act on this target; always reported, never swallowed
    HierarchyViolation { actor: String, target: String },

    /// Invalid command input
    Validation(String),

    /// Internal error
    Internal(String),
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Domain(e) => write!(f, "{e}"),
            Self::Adapter(e) => write!(f, "{e}"),
            Self::NotFound { resource, id } => write!(f, "{resource} not found: {id}"),
            Self::PermissionDenied { required } => {
                write!(f, "You don't have permission to use this command ({required} required)")
            }
            Self::HierarchyViolation { actor, target } => {
                write!(f, "{actor} cannot moderate staff member {target}")
            }
            Self::Validation(msg) => write!(f, "Validation error: {msg}"),
            Self::Internal(msg) => write!(f, "Internal error: {msg}"),
        }
    }
}

impl std::error::Error for ServiceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Domain(e) => Some(e),
            Self::Adapter(e) => Some(e),
            _ => None,
        }
    }
}

impl ServiceError {
    /// Create a not found error
    pub fn not_found(resource: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            resource,
            id: id.into(),
        }
    }

    /// Create a hierarchy violation error
    pub fn hierarchy(actor: impl Into<String>, target: impl Into<String>) -> Self {
        Self::HierarchyViolation {
            actor: actor.into(),
            target: target.into(),
        }
    }

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Stable code for reporting surfaces
    pub fn error_code(&self) -> &str {
        match self {
            Self::Domain(e) => e.code(),
            Self::Adapter(AdapterError::NotFound(_)) | Self::NotFound { .. } => "NOT_FOUND",
            Self::Adapter(_) => "PLATFORM_ERROR",
            Self::PermissionDenied { .. } => "MISSING_PERMISSIONS",
            Self::HierarchyViolation { .. } => "HIERARCHY_VIOLATION",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

impl From<DomainError> for ServiceError {
    fn from(err: DomainError) -> Self {
        Self::Domain(err)
    }
}

impl From<AdapterError> for ServiceError {
    fn from(err: AdapterError) -> Self {
        Self::Adapter(err)
    }
}

impl From<ServiceError> for AppError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Domain(e) => AppError::Domain(e),
            ServiceError::Adapter(e) => AppError::Internal(anyhow::anyhow!(e)),
            ServiceError::NotFound { resource, id } => {
                AppError::NotFound(format!("{resource} {id}"))
            }
            ServiceError::PermissionDenied { .. } => AppError::InsufficientPermissions,
            ServiceError::HierarchyViolation { .. } => AppError::HierarchyViolation,
            ServiceError::Validation(msg) => AppError::Validation(msg),
            ServiceError::Internal(msg) => AppError::Internal(anyhow::anyhow!(msg)),
        }
    }
}

/// Result type for service operations
pub type ServiceResult<T> = Result<T, ServiceError>;

#[cfg(test)]
mod tests {
    use super::*;
    use warden_core::Snowflake;

    #[test]
    fn test_not_found_error() {
        let err = ServiceError::not_found("Member", "123");
        assert_eq!(err.error_code(), "NOT_FOUND");
        assert!(err.to_string().contains("Member not found: 123"));
    }

    #[test]
    fn test_hierarchy_violation_error() {
        let err = ServiceError::hierarchy("alice", "bob");
        assert_eq!(err.error_code(), "HIERARCHY_VIOLATION");
        assert!(err.to_string().contains("cannot moderate staff member"));
    }

    #[test]
    fn test_busy_domain_error_maps_through() {
        let err = ServiceError::from(DomainError::StoreBusy("warnings.append".to_string()));
        assert_eq!(err.error_code(), "STORE_BUSY");
    }

    #[test]
    fn test_convert_to_app_error() {
        let err = ServiceError::from(DomainError::SanctionNotFound(Snowflake::new(1)));
        let app_err: AppError = err.into();
        assert_eq!(app_err.error_code(), "NOT_FOUND");
    }
}
