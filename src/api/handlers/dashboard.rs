//! Role-routed dashboard handlers
//!
//! `GET /dashboard` routes the caller to the destination for their own
//! role. The per-role endpoints gate access with `is_authorized`,
//! checked here on every request rather than only at login.

use axum::{http::StatusCode, Extension, Json};

use crate::api::dto::{ApiResponse, DashboardResponse};
use crate::api::handlers::error_response;
use crate::domain::{destination_for, is_authorized, DomainError, UserRole};
use crate::session::Session;

fn dashboard_response(role: UserRole) -> Json<ApiResponse<DashboardResponse>> {
    Json(ApiResponse::success(DashboardResponse {
        role,
        destination: destination_for(role).to_string(),
    }))
}

fn role_gated(
    session: &Session,
    required_role: UserRole,
) -> Result<Json<ApiResponse<DashboardResponse>>, (StatusCode, Json<ApiResponse<DashboardResponse>>)>
{
    if !is_authorized(session.role, required_role) {
        return Err(error_response(DomainError::Unauthorized(format!(
            "{} role required",
            required_role.as_str()
        ))));
    }
    Ok(dashboard_response(required_role))
}

/// Own dashboard
///
/// Returns the destination for the caller's role.
#[utoipa::path(
    get,
    path = "/api/v1/dashboard",
    tag = "Dashboard",
    responses(
        (status = 200, description = "Destination for the session's role", body = ApiResponse<DashboardResponse>),
        (status = 401, description = "Missing, invalid or expired session")
    ),
    security(("session_token" = []))
)]
pub async fn get_dashboard(
    Extension(session): Extension<Session>,
) -> Json<ApiResponse<DashboardResponse>> {
    dashboard_response(session.role)
}

macro_rules! role_dashboard {
    ($name:ident, $role:expr, $path:literal, $doc:literal) => {
        #[doc = $doc]
        #[utoipa::path(
            get,
            path = $path,
            tag = "Dashboard",
            responses(
                (status = 200, description = "Authorized", body = ApiResponse<DashboardResponse>),
                (status = 401, description = "Missing, invalid or expired session"),
                (status = 403, description = "Role not authorized")
            ),
            security(("session_token" = []))
        )]
        pub async fn $name(
            Extension(session): Extension<Session>,
        ) -> Result<
            Json<ApiResponse<DashboardResponse>>,
            (StatusCode, Json<ApiResponse<DashboardResponse>>),
        > {
            role_gated(&session, $role)
        }
    };
}

role_dashboard!(
    admin_dashboard,
    UserRole::Admin,
    "/api/v1/dashboard/admin",
    "Admin dashboard"
);
role_dashboard!(
    staff_dashboard,
    UserRole::Staff,
    "/api/v1/dashboard/staff",
    "Staff dashboard"
);
role_dashboard!(
    technician_dashboard,
    UserRole::Technician,
    "/api/v1/dashboard/technician",
    "Technician dashboard"
);
role_dashboard!(
    pm_dashboard,
    UserRole::ProductManager,
    "/api/v1/dashboard/pm",
    "Product manager dashboard"
);
role_dashboard!(
    wm_dashboard,
    UserRole::WarehouseManager,
    "/api/v1/dashboard/wm",
    "Warehouse manager dashboard"
);
role_dashboard!(
    customer_dashboard,
    UserRole::Customer,
    "/api/v1/dashboard/customer",
    "Customer dashboard"
);

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn session_with(role: UserRole) -> Session {
        Session {
            user_id: "user-1".to_string(),
            username: "alice".to_string(),
            role,
            created_at: Utc::now(),
            expires_at: Utc::now() + chrono::Duration::minutes(30),
        }
    }

    #[test]
    fn customer_cannot_open_admin_dashboard() {
        let result = role_gated(&session_with(UserRole::Customer), UserRole::Admin);
        let (status, _) = result.err().unwrap();
        assert_eq!(status, StatusCode::FORBIDDEN);
    }

    #[test]
    fn exact_role_passes_the_gate() {
        assert!(role_gated(&session_with(UserRole::Staff), UserRole::Staff).is_ok());
    }

    #[test]
    fn admin_passes_every_gate() {
        for role in [
            UserRole::Staff,
            UserRole::Technician,
            UserRole::ProductManager,
            UserRole::WarehouseManager,
            UserRole::Customer,
        ] {
            assert!(role_gated(&session_with(UserRole::Admin), role).is_ok());
        }
    }
}
