//! Authentication request/response DTOs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::{User, UserRole};

/// Signup request payload
///
/// A `role` field is accepted for compatibility with older clients but
/// ignored: every signup is stored as `Customer`.
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[schema(example = json!({
    "username": "alice",
    "email": "alice@example.com",
    "password": "secure_password_123",
    "full_name": "Alice Example",
    "phone": "+1-555-0100"
}))]
pub struct SignupRequest {
    /// Username (3-50 characters, unique)
    #[validate(length(min = 3, max = 50, message = "Username must be 3-50 characters"))]
    pub username: String,
    /// Email address (unique)
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    /// Password (at least 8 characters)
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
    /// Full display name
    #[validate(length(min = 1, max = 100, message = "Full name must be 1-100 characters"))]
    pub full_name: String,
    /// Phone number (optional)
    pub phone: Option<String>,
    /// Ignored; signups are always stored as Customer
    #[serde(default, deserialize_with = "ignored_role")]
    pub role: Option<UserRole>,
}

/// Bind whatever `role` value the payload carries so it can be ignored.
/// Unknown strings and non-string values must not reject the signup.
fn ignored_role<'de, D>(deserializer: D) -> Result<Option<UserRole>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value
        .as_ref()
        .and_then(serde_json::Value::as_str)
        .map(UserRole::parse_or_default))
}

/// Login request payload
#[derive(Debug, Deserialize, ToSchema)]
#[schema(example = json!({
    "username": "alice",
    "password": "secure_password_123"
}))]
pub struct LoginRequest {
    /// Username or email
    pub username: String,
    /// Password
    pub password: String,
}

/// Successful login response
///
/// The session token is also set as an HttpOnly `session_token` cookie.
/// For header-based clients pass it as `Authorization: Bearer <token>`.
#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    /// Opaque session token
    pub token: String,
    /// Token type (always `Bearer`)
    pub token_type: String,
    /// Inactivity window in seconds before the session expires
    pub expires_in: i64,
    /// Dashboard destination for the user's role
    pub destination: String,
    /// The authenticated user
    pub user: UserInfo,
}

/// Public user information
#[derive(Debug, Serialize, ToSchema)]
pub struct UserInfo {
    /// Unique user id (UUID)
    pub id: String,
    /// Username
    pub username: String,
    /// Email
    pub email: String,
    /// Full display name
    pub full_name: String,
    /// Phone number, if provided
    pub phone: Option<String>,
    /// Role
    pub role: UserRole,
}

impl From<User> for UserInfo {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            full_name: user.full_name,
            phone: user.phone,
            role: user.role,
        }
    }
}

/// Password change request payload
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ChangePasswordRequest {
    /// Current password
    pub current_password: String,
    /// New password (at least 8 characters)
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub new_password: String,
}

/// Role-routed dashboard response
#[derive(Debug, Serialize, ToSchema)]
pub struct DashboardResponse {
    /// Role of the current session
    pub role: UserRole,
    /// Destination route for that role
    pub destination: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signup_json(role_field: &str) -> String {
        format!(
            r#"{{
                "username": "alice",
                "email": "alice@example.com",
                "password": "secure_password_123",
                "full_name": "Alice Example"{}
            }}"#,
            role_field
        )
    }

    #[test]
    fn known_role_is_bound() {
        let request: SignupRequest =
            serde_json::from_str(&signup_json(r#", "role": "Admin""#)).unwrap();
        assert_eq!(request.role, Some(UserRole::Admin));
    }

    #[test]
    fn unknown_role_string_does_not_reject_the_payload() {
        let request: SignupRequest =
            serde_json::from_str(&signup_json(r#", "role": "SuperAdmin""#)).unwrap();
        assert_eq!(request.role, Some(UserRole::Customer));
    }

    #[test]
    fn non_string_role_is_dropped() {
        let request: SignupRequest =
            serde_json::from_str(&signup_json(r#", "role": 42"#)).unwrap();
        assert_eq!(request.role, None);

        let request: SignupRequest =
            serde_json::from_str(&signup_json(r#", "role": null"#)).unwrap();
        assert_eq!(request.role, None);
    }

    #[test]
    fn absent_role_defaults_to_none() {
        let request: SignupRequest = serde_json::from_str(&signup_json("")).unwrap();
        assert_eq!(request.role, None);
    }
}
