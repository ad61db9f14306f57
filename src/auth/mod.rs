pub mod middleware;

pub use middleware::{auth_middleware, token_from_headers, AuthState, SESSION_COOKIE};
