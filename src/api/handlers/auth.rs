//! Authentication API handlers

use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    Extension, Json,
};
use validator::Validate;

use crate::api::dto::{
    ApiResponse, ChangePasswordRequest, EmptyData, LoginRequest, LoginResponse, SignupRequest,
    UserInfo,
};
use crate::api::handlers::error_response;
use crate::application::{AuthService, SignupData};
use crate::auth::{token_from_headers, SESSION_COOKIE};
use crate::session::Session;

/// State for authentication handlers
#[derive(Clone)]
pub struct AuthHandlerState {
    pub service: Arc<AuthService>,
    /// Inactivity window in seconds, reported to clients and used for
    /// the cookie Max-Age.
    pub session_ttl_secs: i64,
}

fn validation_error<T>(e: validator::ValidationErrors) -> (StatusCode, Json<ApiResponse<T>>) {
    let message = e
        .field_errors()
        .values()
        .flat_map(|errors| errors.iter())
        .filter_map(|err| err.message.as_ref().map(|m| m.to_string()))
        .next()
        .unwrap_or_else(|| "Invalid request".to_string());
    (StatusCode::BAD_REQUEST, Json(ApiResponse::error(message)))
}

/// Register a new user
///
/// Creates a new account with role `Customer` regardless of any role in
/// the payload. Username and email must be unique.
#[utoipa::path(
    post,
    path = "/api/v1/auth/signup",
    tag = "Authentication",
    request_body = SignupRequest,
    responses(
        (status = 201, description = "User created", body = ApiResponse<UserInfo>),
        (status = 400, description = "Validation failure (short password, invalid email, ...)"),
        (status = 409, description = "Username or email already taken")
    )
)]
pub async fn signup(
    State(state): State<AuthHandlerState>,
    Json(request): Json<SignupRequest>,
) -> Result<(StatusCode, Json<ApiResponse<UserInfo>>), (StatusCode, Json<ApiResponse<UserInfo>>)> {
    request.validate().map_err(validation_error)?;

    let user = state
        .service
        .signup(SignupData {
            username: request.username,
            email: request.email,
            password: request.password,
            full_name: request.full_name,
            phone: request.phone,
            requested_role: request.role,
        })
        .await
        .map_err(error_response)?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(UserInfo::from(user))),
    ))
}

/// Log in
///
/// Returns a session token on success and sets it as an HttpOnly
/// cookie. The `username` field accepts either username or email.
#[utoipa::path(
    post,
    path = "/api/v1/auth/login",
    tag = "Authentication",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Authenticated; session token issued", body = ApiResponse<LoginResponse>),
        (status = 401, description = "Invalid credentials"),
        (status = 503, description = "Credential store unavailable")
    )
)]
pub async fn login(
    State(state): State<AuthHandlerState>,
    Json(request): Json<LoginRequest>,
) -> Result<
    (HeaderMap, Json<ApiResponse<LoginResponse>>),
    (StatusCode, Json<ApiResponse<LoginResponse>>),
> {
    let outcome = state
        .service
        .login(&request.username, &request.password)
        .await
        .map_err(error_response)?;

    let mut headers = HeaderMap::new();
    let cookie = format!(
        "{}={}; HttpOnly; SameSite=Lax; Path=/; Max-Age={}",
        SESSION_COOKIE, outcome.token, state.session_ttl_secs
    );
    if let Ok(value) = cookie.parse() {
        headers.insert(header::SET_COOKIE, value);
    }

    let response = LoginResponse {
        token: outcome.token,
        token_type: "Bearer".to_string(),
        expires_in: state.session_ttl_secs,
        destination: outcome.destination.to_string(),
        user: UserInfo::from(outcome.user),
    };

    Ok((headers, Json(ApiResponse::success(response))))
}

/// Log out
///
/// Invalidates the presented session token. Idempotent: returns 200
/// even if the token is unknown or already invalidated.
#[utoipa::path(
    post,
    path = "/api/v1/auth/logout",
    tag = "Authentication",
    responses(
        (status = 200, description = "Session invalidated", body = ApiResponse<EmptyData>)
    ),
    security(("session_token" = []))
)]
pub async fn logout(
    State(state): State<AuthHandlerState>,
    request_headers: HeaderMap,
) -> (HeaderMap, Json<ApiResponse<EmptyData>>) {
    if let Some(token) = token_from_headers(&request_headers) {
        state.service.logout(&token);
    }

    // Expire the cookie on the client as well
    let mut headers = HeaderMap::new();
    let cookie = format!("{}=; HttpOnly; SameSite=Lax; Path=/; Max-Age=0", SESSION_COOKIE);
    if let Ok(value) = cookie.parse() {
        headers.insert(header::SET_COOKIE, value);
    }

    (headers, Json(ApiResponse::success(EmptyData {})))
}

/// Current user
///
/// Returns the user record behind the presented session.
#[utoipa::path(
    get,
    path = "/api/v1/auth/me",
    tag = "Authentication",
    responses(
        (status = 200, description = "Current user", body = ApiResponse<UserInfo>),
        (status = 401, description = "Missing, invalid or expired session")
    ),
    security(("session_token" = []))
)]
pub async fn get_current_user(
    State(state): State<AuthHandlerState>,
    Extension(session): Extension<Session>,
) -> Result<Json<ApiResponse<UserInfo>>, (StatusCode, Json<ApiResponse<UserInfo>>)> {
    let user = state
        .service
        .current_user(&session)
        .await
        .map_err(error_response)?;
    Ok(Json(ApiResponse::success(UserInfo::from(user))))
}

/// Change password
///
/// Re-verifies the current password before storing the new hash.
#[utoipa::path(
    post,
    path = "/api/v1/auth/change-password",
    tag = "Authentication",
    request_body = ChangePasswordRequest,
    responses(
        (status = 200, description = "Password changed", body = ApiResponse<EmptyData>),
        (status = 400, description = "New password too short"),
        (status = 401, description = "Current password is wrong")
    ),
    security(("session_token" = []))
)]
pub async fn change_password(
    State(state): State<AuthHandlerState>,
    Extension(session): Extension<Session>,
    Json(request): Json<ChangePasswordRequest>,
) -> Result<Json<ApiResponse<EmptyData>>, (StatusCode, Json<ApiResponse<EmptyData>>)> {
    request.validate().map_err(validation_error)?;

    state
        .service
        .change_password(
            &session.user_id,
            &request.current_password,
            &request.new_password,
        )
        .await
        .map_err(error_response)?;

    Ok(Json(ApiResponse::success(EmptyData {})))
}
