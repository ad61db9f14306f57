pub mod auth;
pub mod dashboard;
pub mod health;

use axum::http::StatusCode;
use axum::Json;

use crate::api::dto::ApiResponse;
use crate::domain::DomainError;

/// HTTP status for a domain error.
pub(crate) fn status_for(err: &DomainError) -> StatusCode {
    match err {
        DomainError::DuplicateUsername | DomainError::DuplicateEmail => StatusCode::CONFLICT,
        DomainError::InvalidCredentials
        | DomainError::SessionExpired
        | DomainError::SessionInvalid => StatusCode::UNAUTHORIZED,
        DomainError::Unauthorized(_) => StatusCode::FORBIDDEN,
        DomainError::Validation(_) => StatusCode::BAD_REQUEST,
        DomainError::NotFound { .. } => StatusCode::NOT_FOUND,
        DomainError::StoreUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
    }
}

/// Map a domain error into the standard error envelope.
pub(crate) fn error_response<T>(err: DomainError) -> (StatusCode, Json<ApiResponse<T>>) {
    (status_for(&err), Json(ApiResponse::error(err.to_string())))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_errors_are_conflicts() {
        assert_eq!(status_for(&DomainError::DuplicateUsername), StatusCode::CONFLICT);
        assert_eq!(status_for(&DomainError::DuplicateEmail), StatusCode::CONFLICT);
    }

    #[test]
    fn auth_failures_are_401_and_role_mismatch_is_403() {
        assert_eq!(
            status_for(&DomainError::InvalidCredentials),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            status_for(&DomainError::SessionExpired),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            status_for(&DomainError::Unauthorized("role".into())),
            StatusCode::FORBIDDEN
        );
    }

    #[test]
    fn store_unavailable_is_503() {
        assert_eq!(
            status_for(&DomainError::StoreUnavailable("down".into())),
            StatusCode::SERVICE_UNAVAILABLE
        );
    }
}
