pub mod error;
pub mod repository;
pub mod routing;
pub mod user;

// Re-export commonly used types
pub use error::{DomainError, DomainResult};
pub use repository::UserRepositoryInterface;
pub use routing::{destination_for, is_authorized};
pub use user::{NewUser, User, UserRole};
