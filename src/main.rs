//! Bytex Auth service entry point
//!
//! Credential and session authority over HTTP. Reads configuration from
//! a TOML file (~/.config/bytex-auth/config.toml).

use std::sync::Arc;
use std::time::Duration;

use sea_orm_migration::MigratorTrait;
use tracing::{error, info, warn};

use bytex_auth::application::AuthService;
use bytex_auth::config::AppConfig;
use bytex_auth::domain::UserRepositoryInterface;
use bytex_auth::infrastructure::database::migrator::Migrator;
use bytex_auth::session::SessionStore;
use bytex_auth::shared::ShutdownSignal;
use bytex_auth::{create_api_router, default_config_path, init_database, DatabaseConfig, UserRepository};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // ── Load configuration ─────────────────────────────────────
    let config_path = std::env::var("BYTEX_AUTH_CONFIG")
        .map(std::path::PathBuf::from)
        .unwrap_or_else(|_| default_config_path());
    let app_cfg = match AppConfig::load(&config_path) {
        Ok(cfg) => {
            tracing_subscriber::fmt()
                .with_env_filter(
                    tracing_subscriber::EnvFilter::try_from_default_env()
                        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cfg.logging.level)),
                )
                .init();
            info!("Configuration loaded from {}", config_path.display());
            cfg
        }
        Err(e) => {
            tracing_subscriber::fmt()
                .with_env_filter(tracing_subscriber::EnvFilter::new("info"))
                .init();
            warn!("Failed to load config: {}. Using defaults.", e);
            AppConfig::default()
        }
    };

    info!("Starting Bytex Auth service...");

    // ── Database ───────────────────────────────────────────────
    let db_config = DatabaseConfig {
        url: app_cfg.database.url.clone(),
        acquire_timeout: Duration::from_secs(app_cfg.database.acquire_timeout_secs),
    };
    let db = match init_database(&db_config).await {
        Ok(db) => db,
        Err(e) => {
            error!("Failed to connect to database: {}", e);
            return Err(e.into());
        }
    };

    info!("Running database migrations...");
    if let Err(e) = Migrator::up(&db, None).await {
        error!("Failed to run migrations: {}", e);
        return Err(e.into());
    }
    info!("Migrations completed");

    // ── Core services ──────────────────────────────────────────
    let repo: Arc<dyn UserRepositoryInterface> = Arc::new(UserRepository::new(db));

    create_default_admin(repo.as_ref(), &app_cfg).await;

    let sessions = SessionStore::shared(chrono::Duration::minutes(
        app_cfg.security.session_ttl_minutes,
    ));
    let service = Arc::new(AuthService::new(
        Arc::clone(&repo),
        Arc::clone(&sessions),
        app_cfg.security.bcrypt_cost,
    ));

    // ── Shutdown + session sweeper ─────────────────────────────
    let shutdown = ShutdownSignal::new();
    shutdown.start_signal_listener();
    sessions.start_sweeper(
        Duration::from_secs(app_cfg.security.sweep_interval_secs),
        shutdown.clone(),
    );

    // ── HTTP server ────────────────────────────────────────────
    let router = create_api_router(
        service,
        sessions,
        app_cfg.security.session_ttl_minutes * 60,
    );

    let addr = app_cfg.server.address();
    info!("Listening on http://{}", addr);
    info!("Swagger UI at http://{}/swagger-ui", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, router)
        .with_graceful_shutdown(async move { shutdown.wait().await })
        .await?;

    info!("Server stopped");
    Ok(())
}

/// Seed a default admin account when the store is empty, so a fresh
/// deployment has a way in. Credentials come from the `[admin]` config
/// section and must be rotated immediately.
async fn create_default_admin(repo: &dyn UserRepositoryInterface, app_cfg: &AppConfig) {
    use bytex_auth::domain::{NewUser, UserRole};
    use bytex_auth::infrastructure::crypto::hash_password_with_cost;

    let users_count = match repo.count_users().await {
        Ok(count) => count,
        Err(e) => {
            error!("Failed to count users: {}", e);
            return;
        }
    };

    if users_count == 0 {
        info!("Creating default admin user...");

        let password_hash =
            match hash_password_with_cost(&app_cfg.admin.password, app_cfg.security.bcrypt_cost) {
                Ok(hash) => hash,
                Err(e) => {
                    error!("Failed to hash admin password: {}", e);
                    return;
                }
            };

        let admin = NewUser {
            username: app_cfg.admin.username.clone(),
            email: app_cfg.admin.email.clone(),
            password_hash,
            full_name: "Administrator".to_string(),
            phone: None,
            role: UserRole::Admin,
        };

        match repo.create_user(admin).await {
            Ok(user) => {
                info!("Default admin created: {}", user.email);
                warn!("Please change the admin password immediately!");
            }
            Err(e) => {
                error!("Failed to create admin user: {}", e);
            }
        }
    }
}
