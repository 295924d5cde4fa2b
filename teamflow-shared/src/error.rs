/// Domain error taxonomy
///
/// Every fallible domain operation returns one of these categories; the API
/// layer owns the single mapping to HTTP status codes (validation 400,
/// unauthorized 401, access denied 403, not found 404, conflict 409,
/// internal 500). Services never reason about HTTP.

use crate::store::StoreError;

/// Result type alias for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

/// Error categories produced by domain services
#[derive(Debug, thiserror::Error)]
pub enum DomainError {
    /// Input failed a domain validation rule
    #[error("{0}")]
    Validation(String),

    /// The requester's identity could not be established
    #[error("{0}")]
    Unauthorized(String),

    /// The requester is known but not allowed to perform the operation
    #[error("{0}")]
    AccessDenied(String),

    /// A referenced record does not exist
    #[error("{0}")]
    NotFound(String),

    /// The operation would violate a uniqueness or structural invariant
    #[error("{0}")]
    Conflict(String),

    /// Unexpected failure; detail is logged, never shown to clients
    #[error("{0}")]
    Internal(String),
}

impl DomainError {
    /// Validation error shorthand
    pub fn validation(msg: impl Into<String>) -> Self {
        DomainError::Validation(msg.into())
    }

    /// Access-denied error shorthand
    pub fn access_denied(msg: impl Into<String>) -> Self {
        DomainError::AccessDenied(msg.into())
    }

    /// Not-found error shorthand
    pub fn not_found(msg: impl Into<String>) -> Self {
        DomainError::NotFound(msg.into())
    }

    /// Conflict error shorthand
    pub fn conflict(msg: impl Into<String>) -> Self {
        DomainError::Conflict(msg.into())
    }
}

/// Storage failures surface as conflicts (uniqueness) or internal errors
impl From<StoreError> for DomainError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Duplicate(what) => DomainError::Conflict(format!("{} already exists", what)),
            StoreError::Database(e) => DomainError::Internal(format!("database error: {}", e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_maps_to_conflict() {
        let err: DomainError = StoreError::Duplicate("email").into();
        assert!(matches!(err, DomainError::Conflict(_)));
        assert_eq!(err.to_string(), "email already exists");
    }

    #[test]
    fn test_shorthand_constructors() {
        assert!(matches!(
            DomainError::validation("Project name is required"),
            DomainError::Validation(_)
        ));
        assert!(matches!(
            DomainError::not_found("Project not found"),
            DomainError::NotFound(_)
        ));
    }
}
