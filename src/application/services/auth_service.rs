//! Authentication service
//!
//! Orchestrates the credential store, verifier and session store for
//! signup, login, logout and password changes. Transient store failures
//! are retried with backoff; they never degrade into an authenticated
//! result.

use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};

use crate::domain::{
    DomainError, DomainResult, NewUser, User, UserRepositoryInterface, UserRole,
};
use crate::infrastructure::crypto::{hash_password_with_cost, verify_password};
use crate::session::{Session, SharedSessionStore};
use crate::shared::retry::{retry_with_backoff, RetryConfig};

/// Signup input. `requested_role` is accepted for payload compatibility
/// and always ignored: every signup is stored as Customer.
#[derive(Debug, Clone)]
pub struct SignupData {
    pub username: String,
    pub email: String,
    pub password: String,
    pub full_name: String,
    pub phone: Option<String>,
    pub requested_role: Option<UserRole>,
}

/// Result of a successful login.
pub struct LoginOutcome {
    pub user: User,
    pub token: String,
    pub destination: &'static str,
}

pub struct AuthService {
    repo: Arc<dyn UserRepositoryInterface>,
    sessions: SharedSessionStore,
    bcrypt_cost: u32,
    retry: RetryConfig,
}

impl AuthService {
    pub fn new(
        repo: Arc<dyn UserRepositoryInterface>,
        sessions: SharedSessionStore,
        bcrypt_cost: u32,
    ) -> Self {
        Self {
            repo,
            sessions,
            bcrypt_cost,
            retry: RetryConfig::default(),
        }
    }

    /// Register a new user. The stored role is always Customer; the
    /// unique indexes in the store are the final arbiter of duplicates.
    pub async fn signup(&self, data: SignupData) -> DomainResult<User> {
        if data.requested_role.is_some() {
            warn!(username = %data.username, "Ignoring role supplied in signup payload");
        }

        // Friendly fast path; the insert below is authoritative.
        if self.find_by_username(&data.username).await?.is_some() {
            return Err(DomainError::DuplicateUsername);
        }
        if self.find_by_email(&data.email).await?.is_some() {
            return Err(DomainError::DuplicateEmail);
        }

        let password_hash = hash_password_with_cost(&data.password, self.bcrypt_cost)
            .map_err(|e| DomainError::Validation(format!("Failed to hash password: {}", e)))?;

        let new_user = NewUser {
            username: data.username,
            email: data.email,
            password_hash,
            full_name: data.full_name,
            phone: data.phone,
            role: UserRole::Customer,
        };

        let repo = Arc::clone(&self.repo);
        let user = retry_with_backoff(
            self.retry.clone(),
            move || {
                let repo = Arc::clone(&repo);
                let new_user = new_user.clone();
                async move { repo.create_user(new_user).await }
            },
            DomainError::is_transient,
            "create_user",
        )
        .await?;

        info!(username = %user.username, "User registered");
        Ok(user)
    }

    /// Authenticate and issue a session. Accepts username or email.
    ///
    /// Fails closed: a missing user, a verifier error and a wrong
    /// password all collapse into `InvalidCredentials`.
    pub async fn login(&self, login: &str, password: &str) -> DomainResult<LoginOutcome> {
        let repo = Arc::clone(&self.repo);
        let lookup = login.to_string();
        let user = retry_with_backoff(
            self.retry.clone(),
            move || {
                let repo = Arc::clone(&repo);
                let lookup = lookup.clone();
                async move { repo.find_by_login(&lookup).await }
            },
            DomainError::is_transient,
            "find_by_login",
        )
        .await?;

        let Some(mut user) = user else {
            warn!(login = %login, "Login failed: unknown user");
            return Err(DomainError::InvalidCredentials);
        };

        let password_valid = verify_password(password, &user.password_hash).unwrap_or(false);
        if !password_valid {
            warn!(username = %user.username, "Login failed: bad password");
            return Err(DomainError::InvalidCredentials);
        }

        // Best effort; a failed touch must not fail the login.
        let now = Utc::now();
        match self.repo.touch_last_login(&user.id, now).await {
            Ok(()) => user.last_login = Some(now),
            Err(e) => {
                warn!(username = %user.username, error = %e, "Failed to update last_login")
            }
        }

        let token = self.sessions.issue(&user);
        let destination = crate::domain::destination_for(user.role);
        info!(username = %user.username, role = user.role.as_str(), "Login successful");

        Ok(LoginOutcome {
            user,
            token,
            destination,
        })
    }

    /// Invalidate a session. Idempotent.
    pub fn logout(&self, token: &str) {
        self.sessions.invalidate(token);
    }

    /// Validate a presented session token.
    pub fn validate_session(&self, token: &str) -> DomainResult<Session> {
        self.sessions.validate(token)
    }

    /// Load the full user record behind a session.
    pub async fn current_user(&self, session: &Session) -> DomainResult<User> {
        self.repo
            .find_by_id(&session.user_id)
            .await?
            .ok_or(DomainError::SessionInvalid)
    }

    /// Change a user's password after re-verifying the current one.
    pub async fn change_password(
        &self,
        user_id: &str,
        current_password: &str,
        new_password: &str,
    ) -> DomainResult<()> {
        let Some(user) = self.repo.find_by_id(user_id).await? else {
            return Err(DomainError::InvalidCredentials);
        };

        let current_valid =
            verify_password(current_password, &user.password_hash).unwrap_or(false);
        if !current_valid {
            warn!(username = %user.username, "Password change rejected: bad current password");
            return Err(DomainError::InvalidCredentials);
        }

        let new_hash = hash_password_with_cost(new_password, self.bcrypt_cost)
            .map_err(|e| DomainError::Validation(format!("Failed to hash password: {}", e)))?;
        self.repo.update_password(user_id, &new_hash).await?;

        info!(username = %user.username, "Password changed");
        Ok(())
    }

    async fn find_by_username(&self, username: &str) -> DomainResult<Option<User>> {
        let repo = Arc::clone(&self.repo);
        let username = username.to_string();
        retry_with_backoff(
            self.retry.clone(),
            move || {
                let repo = Arc::clone(&repo);
                let username = username.clone();
                async move { repo.find_by_username(&username).await }
            },
            DomainError::is_transient,
            "find_by_username",
        )
        .await
    }

    async fn find_by_email(&self, email: &str) -> DomainResult<Option<User>> {
        let repo = Arc::clone(&self.repo);
        let email = email.to_string();
        retry_with_backoff(
            self.retry.clone(),
            move || {
                let repo = Arc::clone(&repo);
                let email = email.clone();
                async move { repo.find_by_email(&email).await }
            },
            DomainError::is_transient,
            "find_by_email",
        )
        .await
    }
}
