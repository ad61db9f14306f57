//! Session entity

use chrono::{DateTime, Utc};

use crate::domain::UserRole;

/// An issued session, bound to a user identity and role.
///
/// Stored keyed by the token digest; the raw token lives only with the
/// client. Expiry is a sliding inactivity window extended on each
/// successful validation.
#[derive(Clone, Debug)]
pub struct Session {
    pub user_id: String,
    pub username: String,
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl Session {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }
}
