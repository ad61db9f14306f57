//! API Router with Swagger UI

use std::sync::Arc;

use axum::{
    extract::FromRef,
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::openapi::security::{ApiKey, ApiKeyValue, HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use crate::api::dto::*;
use crate::api::handlers::{auth, dashboard, health};
use crate::application::AuthService;
use crate::auth::middleware::{auth_middleware, AuthState};
use crate::session::SharedSessionStore;

/// Unified state for all API routes. Axum extracts the specific handler
/// state via `FromRef`.
#[derive(Clone)]
pub struct ApiUnifiedState {
    pub handlers: auth::AuthHandlerState,
    pub auth: AuthState,
}

impl FromRef<ApiUnifiedState> for auth::AuthHandlerState {
    fn from_ref(s: &ApiUnifiedState) -> Self {
        s.handlers.clone()
    }
}

impl FromRef<ApiUnifiedState> for AuthState {
    fn from_ref(s: &ApiUnifiedState) -> Self {
        s.auth.clone()
    }
}

/// Security scheme modifier for OpenAPI
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "session_token",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .description(Some("Opaque session token"))
                        .build(),
                ),
            );
            components.add_security_scheme(
                "session_cookie",
                SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::new("session_token"))),
            );
        }
    }
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        // Health
        health::health_check,
        // Auth
        auth::signup,
        auth::login,
        auth::logout,
        auth::get_current_user,
        auth::change_password,
        // Dashboards
        dashboard::get_dashboard,
        dashboard::admin_dashboard,
        dashboard::staff_dashboard,
        dashboard::technician_dashboard,
        dashboard::pm_dashboard,
        dashboard::wm_dashboard,
        dashboard::customer_dashboard,
    ),
    components(schemas(
        SignupRequest,
        LoginRequest,
        LoginResponse,
        ChangePasswordRequest,
        UserInfo,
        DashboardResponse,
        EmptyData,
        health::HealthResponse,
    )),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Service health"),
        (name = "Authentication", description = "Signup, login and session lifecycle"),
        (name = "Dashboard", description = "Role-routed dashboards")
    ),
    info(
        title = "Bytex Auth API",
        description = "Credential and session authority with role-based dashboard routing"
    )
)]
pub struct ApiDoc;

/// Build the API router.
pub fn create_api_router(
    service: Arc<AuthService>,
    sessions: SharedSessionStore,
    session_ttl_secs: i64,
) -> Router {
    health::mark_started();

    let state = ApiUnifiedState {
        handlers: auth::AuthHandlerState {
            service,
            session_ttl_secs,
        },
        auth: AuthState { sessions },
    };

    let public_routes = Router::new()
        .route("/api/v1/auth/signup", post(auth::signup))
        .route("/api/v1/auth/login", post(auth::login))
        .route("/api/v1/auth/logout", post(auth::logout));

    let protected_routes = Router::new()
        .route("/api/v1/auth/me", get(auth::get_current_user))
        .route("/api/v1/auth/change-password", post(auth::change_password))
        .route("/api/v1/dashboard", get(dashboard::get_dashboard))
        .route("/api/v1/dashboard/admin", get(dashboard::admin_dashboard))
        .route("/api/v1/dashboard/staff", get(dashboard::staff_dashboard))
        .route(
            "/api/v1/dashboard/technician",
            get(dashboard::technician_dashboard),
        )
        .route("/api/v1/dashboard/pm", get(dashboard::pm_dashboard))
        .route("/api/v1/dashboard/wm", get(dashboard::wm_dashboard))
        .route(
            "/api/v1/dashboard/customer",
            get(dashboard::customer_dashboard),
        )
        .route_layer(middleware::from_fn_with_state(
            state.auth.clone(),
            auth_middleware,
        ));

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health::health_check))
        .merge(public_routes)
        .merge(protected_routes)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
