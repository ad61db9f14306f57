//! Session authentication middleware for Axum
//!
//! Protected routes accept the session token from the
//! `Authorization: Bearer` header or the `session_token` cookie. The
//! validated session is attached to the request extensions; handlers
//! enforce role requirements on top with `is_authorized`.

use axum::{
    body::Body,
    extract::State,
    http::{header, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::domain::DomainError;
use crate::session::SharedSessionStore;

/// Authentication state for protected routes
#[derive(Clone)]
pub struct AuthState {
    pub sessions: SharedSessionStore,
}

/// Cookie carrying the session token.
pub const SESSION_COOKIE: &str = "session_token";

/// Extract token from an Authorization header value
fn extract_bearer(auth_header: &str) -> Option<&str> {
    auth_header.strip_prefix("Bearer ")
}

/// Extract the session token from a Cookie header value
fn extract_cookie(cookie_header: &str, name: &str) -> Option<String> {
    cookie_header.split(';').find_map(|pair| {
        let (key, value) = pair.trim().split_once('=')?;
        (key == name).then(|| value.to_string())
    })
}

/// Pull the session token from request headers, Bearer header first.
pub fn token_from_headers(headers: &axum::http::HeaderMap) -> Option<String> {
    if let Some(auth) = headers
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
    {
        if let Some(token) = extract_bearer(auth) {
            return Some(token.to_string());
        }
    }

    headers
        .get(header::COOKIE)
        .and_then(|h| h.to_str().ok())
        .and_then(|cookies| extract_cookie(cookies, SESSION_COOKIE))
}

/// Session authentication middleware - requires a valid, unexpired token
pub async fn auth_middleware(
    State(auth_state): State<AuthState>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let Some(token) = token_from_headers(request.headers()) else {
        return auth_error_response("Missing session token");
    };

    match auth_state.sessions.validate(&token) {
        Ok(session) => {
            request.extensions_mut().insert(session);
            next.run(request).await
        }
        Err(DomainError::SessionExpired) => auth_error_response("Session expired"),
        Err(_) => auth_error_response("Session invalid"),
    }
}

fn auth_error_response(message: &str) -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({
            "success": false,
            "data": null,
            "error": message,
        })),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bearer_extraction() {
        assert_eq!(extract_bearer("Bearer abc123"), Some("abc123"));
        assert_eq!(extract_bearer("Basic abc123"), None);
        assert_eq!(extract_bearer("abc123"), None);
    }

    #[test]
    fn cookie_extraction() {
        assert_eq!(
            extract_cookie("session_token=tok123", SESSION_COOKIE),
            Some("tok123".to_string())
        );
        assert_eq!(
            extract_cookie("theme=dark; session_token=tok123; lang=en", SESSION_COOKIE),
            Some("tok123".to_string())
        );
        assert_eq!(extract_cookie("theme=dark", SESSION_COOKIE), None);
        assert_eq!(extract_cookie("", SESSION_COOKIE), None);
    }

    #[test]
    fn bearer_takes_priority_over_cookie() {
        let mut headers = axum::http::HeaderMap::new();
        headers.insert(header::AUTHORIZATION, "Bearer from-header".parse().unwrap());
        headers.insert(header::COOKIE, "session_token=from-cookie".parse().unwrap());
        assert_eq!(token_from_headers(&headers), Some("from-header".to_string()));
    }

    #[test]
    fn cookie_is_fallback() {
        let mut headers = axum::http::HeaderMap::new();
        headers.insert(header::COOKIE, "session_token=from-cookie".parse().unwrap());
        assert_eq!(token_from_headers(&headers), Some("from-cookie".to_string()));
    }
}
