//! # Bytex Auth
//!
//! Credential and session authority with role-based dashboard routing.
//!
//! ## Architecture
//!
//! The project follows Clean Architecture principles:
//!
//! - **domain**: User model, role router, credential store port, errors
//! - **application**: Signup/login/logout orchestration
//! - **infrastructure**: Password hashing, token generation, SeaORM store
//! - **session**: Opaque-token session store with inactivity expiry
//! - **auth**: Session authentication middleware
//! - **api**: REST API with Swagger documentation

pub mod api;
pub mod application;
pub mod auth;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod session;
pub mod shared;

pub use config::{default_config_path, AppConfig};

// Re-export database types for easy access
pub use infrastructure::{init_database, DatabaseConfig, UserRepository};

// Re-export API router
pub use api::create_api_router;
