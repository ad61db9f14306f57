//! User model and role enum

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// User role. Closed set; every stored user carries exactly one of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum UserRole {
    Admin,
    Staff,
    Technician,
    ProductManager,
    WarehouseManager,
    Customer,
}

impl Default for UserRole {
    fn default() -> Self {
        Self::Customer
    }
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Admin => "Admin",
            UserRole::Staff => "Staff",
            UserRole::Technician => "Technician",
            UserRole::ProductManager => "ProductManager",
            UserRole::WarehouseManager => "WarehouseManager",
            UserRole::Customer => "Customer",
        }
    }

    /// Parse a stored role string. Unknown values map to the
    /// least-privileged role rather than failing open.
    pub fn parse_or_default(value: &str) -> Self {
        match value {
            "Admin" => UserRole::Admin,
            "Staff" => UserRole::Staff,
            "Technician" => UserRole::Technician,
            "ProductManager" => UserRole::ProductManager,
            "WarehouseManager" => UserRole::WarehouseManager,
            _ => UserRole::Customer,
        }
    }
}

/// User model
#[derive(Clone, Debug)]
pub struct User {
    pub id: String,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub full_name: String,
    pub phone: Option<String>,
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
    pub last_login: Option<DateTime<Utc>>,
}

/// Payload for creating a user in the credential store.
///
/// Carries an already-hashed password; plaintext never crosses the
/// repository boundary.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub full_name: String,
    pub phone: Option<String>,
    pub role: UserRole,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_string_round_trip() {
        for role in [
            UserRole::Admin,
            UserRole::Staff,
            UserRole::Technician,
            UserRole::ProductManager,
            UserRole::WarehouseManager,
            UserRole::Customer,
        ] {
            assert_eq!(UserRole::parse_or_default(role.as_str()), role);
        }
    }

    #[test]
    fn unknown_role_maps_to_customer() {
        assert_eq!(UserRole::parse_or_default("SuperAdmin"), UserRole::Customer);
        assert_eq!(UserRole::parse_or_default(""), UserRole::Customer);
    }

    #[test]
    fn default_role_is_customer() {
        assert_eq!(UserRole::default(), UserRole::Customer);
    }
}
