//! Credential store port

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::{DomainResult, NewUser, User};

/// Credential store contract.
///
/// Uniqueness of username and email is enforced by the implementation
/// atomically with insertion; `create_user` surfaces a violation as
/// `DuplicateUsername`/`DuplicateEmail`, never silently overwrites.
#[async_trait]
pub trait UserRepositoryInterface: Send + Sync {
    async fn create_user(&self, user: NewUser) -> DomainResult<User>;

    async fn find_by_username(&self, username: &str) -> DomainResult<Option<User>>;
    async fn find_by_email(&self, email: &str) -> DomainResult<Option<User>>;
    async fn find_by_id(&self, id: &str) -> DomainResult<Option<User>>;

    /// Find by username or email in a single lookup (login accepts either).
    async fn find_by_login(&self, login: &str) -> DomainResult<Option<User>>;

    async fn touch_last_login(&self, id: &str, at: DateTime<Utc>) -> DomainResult<()>;
    async fn update_password(&self, id: &str, new_password_hash: &str) -> DomainResult<()>;

    async fn count_users(&self) -> DomainResult<u64>;
}
