use thiserror::Error;

/// Errors surfaced by the credential store, verifier, session manager
/// and role router.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Username already exists")]
    DuplicateUsername,

    #[error("Email already registered")]
    DuplicateEmail,

    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("Session expired")]
    SessionExpired,

    #[error("Session invalid")]
    SessionInvalid,

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Validation: {0}")]
    Validation(String),

    #[error("Not found: {entity} with {field}={value}")]
    NotFound {
        entity: &'static str,
        field: &'static str,
        value: String,
    },

    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),
}

pub type DomainResult<T> = Result<T, DomainError>;

impl DomainError {
    /// Whether this error is likely transient (e.g. DB connection lost)
    /// and the operation may succeed if retried.
    pub fn is_transient(&self) -> bool {
        matches!(self, DomainError::StoreUnavailable(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_store_unavailable_is_transient() {
        assert!(DomainError::StoreUnavailable("timeout".into()).is_transient());
        assert!(!DomainError::DuplicateUsername.is_transient());
        assert!(!DomainError::InvalidCredentials.is_transient());
        assert!(!DomainError::SessionExpired.is_transient());
    }
}
