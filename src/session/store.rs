//! In-memory session store
//!
//! Sessions live in a concurrent map for the lifetime of the process.
//! Expiry is checked lazily at validation time; the background sweeper
//! only reclaims memory for sessions that are never presented again.

use std::sync::Arc;
use std::time::Duration as StdDuration;

use chrono::{Duration, Utc};
use dashmap::DashMap;
use tracing::{debug, info};

use crate::domain::{DomainError, DomainResult, User};
use crate::infrastructure::crypto::{generate_session_token, hash_token};
use crate::shared::shutdown::ShutdownSignal;

use super::Session;

pub type SharedSessionStore = Arc<SessionStore>;

/// Issues, validates and invalidates opaque session tokens.
pub struct SessionStore {
    /// Active sessions indexed by token digest
    sessions: Arc<DashMap<String, Session>>,
    /// Inactivity window before a session expires
    ttl: Duration,
}

impl SessionStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            sessions: Arc::new(DashMap::new()),
            ttl,
        }
    }

    pub fn shared(ttl: Duration) -> SharedSessionStore {
        Arc::new(Self::new(ttl))
    }

    /// Issue a new session for an authenticated user. Returns the raw
    /// token; only its digest is retained.
    pub fn issue(&self, user: &User) -> String {
        let token = generate_session_token();
        let now = Utc::now();
        let session = Session {
            user_id: user.id.clone(),
            username: user.username.clone(),
            role: user.role,
            created_at: now,
            expires_at: now + self.ttl,
        };
        self.sessions.insert(hash_token(&token), session);
        debug!(user_id = %user.id, "Session issued");
        token
    }

    /// Validate a presented token. A hit inside the inactivity window
    /// extends the session; an expired entry is removed and reported as
    /// `SessionExpired`, an unknown token as `SessionInvalid`.
    pub fn validate(&self, token: &str) -> DomainResult<Session> {
        let key = hash_token(token);
        let now = Utc::now();

        let Some(mut entry) = self.sessions.get_mut(&key) else {
            return Err(DomainError::SessionInvalid);
        };

        if entry.is_expired(now) {
            drop(entry);
            self.sessions.remove(&key);
            return Err(DomainError::SessionExpired);
        }

        entry.expires_at = now + self.ttl;
        Ok(entry.clone())
    }

    /// Invalidate a token. Idempotent: unknown or already-invalidated
    /// tokens are a no-op.
    pub fn invalidate(&self, token: &str) {
        if self.sessions.remove(&hash_token(token)).is_some() {
            debug!("Session invalidated");
        }
    }

    /// Drop all expired sessions. Returns how many were removed.
    pub fn purge_expired(&self) -> usize {
        Self::purge(&self.sessions)
    }

    fn purge(sessions: &DashMap<String, Session>) -> usize {
        let now = Utc::now();
        let before = sessions.len();
        sessions.retain(|_, session| !session.is_expired(now));
        before - sessions.len()
    }

    pub fn active_count(&self) -> usize {
        self.sessions.len()
    }

    /// Spawn the periodic sweeper; stops when shutdown is triggered.
    pub fn start_sweeper(&self, interval: StdDuration, shutdown: ShutdownSignal) {
        let sessions = Arc::clone(&self.sessions);
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        let purged = Self::purge(&sessions);
                        if purged > 0 {
                            debug!(purged, "Expired sessions purged");
                        }
                    }
                    _ = shutdown.wait() => {
                        info!("Session sweeper stopped");
                        break;
                    }
                }
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};

    use crate::domain::UserRole;

    fn test_user(role: UserRole) -> User {
        User {
            id: "user-1".to_string(),
            username: "alice".to_string(),
            email: "a@x.com".to_string(),
            password_hash: "$2b$04$hash".to_string(),
            full_name: "Alice".to_string(),
            phone: None,
            role,
            created_at: Utc::now(),
            last_login: None,
        }
    }

    #[test]
    fn issued_token_validates() {
        let store = SessionStore::new(Duration::minutes(30));
        let token = store.issue(&test_user(UserRole::Customer));

        let session = store.validate(&token).unwrap();
        assert_eq!(session.user_id, "user-1");
        assert_eq!(session.role, UserRole::Customer);
    }

    #[test]
    fn unknown_token_is_invalid() {
        let store = SessionStore::new(Duration::minutes(30));
        assert!(matches!(
            store.validate("no-such-token"),
            Err(DomainError::SessionInvalid)
        ));
    }

    #[test]
    fn invalidated_token_is_rejected() {
        let store = SessionStore::new(Duration::minutes(30));
        let token = store.issue(&test_user(UserRole::Staff));

        store.invalidate(&token);
        assert!(matches!(
            store.validate(&token),
            Err(DomainError::SessionInvalid)
        ));

        // Idempotent under repeated invalidation
        store.invalidate(&token);
        store.invalidate(&token);
    }

    #[test]
    fn expired_token_is_rejected_and_removed() {
        let store = SessionStore::new(Duration::milliseconds(-1));
        let token = store.issue(&test_user(UserRole::Customer));

        assert!(matches!(
            store.validate(&token),
            Err(DomainError::SessionExpired)
        ));
        // Terminal: a second presentation no longer finds the entry
        assert!(matches!(
            store.validate(&token),
            Err(DomainError::SessionInvalid)
        ));
    }

    #[test]
    fn validation_extends_the_window() {
        let store = SessionStore::new(Duration::minutes(30));
        let token = store.issue(&test_user(UserRole::Customer));

        let first: DateTime<Utc> = store.validate(&token).unwrap().expires_at;
        std::thread::sleep(std::time::Duration::from_millis(10));
        let second = store.validate(&token).unwrap().expires_at;
        assert!(second >= first);
    }

    #[test]
    fn purge_removes_only_expired() {
        let expired = SessionStore::new(Duration::milliseconds(-1));
        let _ = expired.issue(&test_user(UserRole::Customer));
        assert_eq!(expired.purge_expired(), 1);
        assert_eq!(expired.active_count(), 0);

        let live = SessionStore::new(Duration::minutes(30));
        let _ = live.issue(&test_user(UserRole::Customer));
        assert_eq!(live.purge_expired(), 0);
        assert_eq!(live.active_count(), 1);
    }

    #[test]
    fn raw_tokens_are_not_stored() {
        let store = SessionStore::new(Duration::minutes(30));
        let token = store.issue(&test_user(UserRole::Customer));
        assert!(!store.sessions.contains_key(&token));
    }
}
