//! Role router: role → dashboard destination, plus the authorization
//! predicate checked on every protected request.

use super::UserRole;

/// Dashboard destination for a role. Pure and total over the closed
/// role enum; the least-privileged destination is the Customer dashboard.
pub fn destination_for(role: UserRole) -> &'static str {
    match role {
        UserRole::Admin => "/admin/dashboard",
        UserRole::Staff => "/staff/dashboard",
        UserRole::Technician => "/technician/dashboard",
        UserRole::ProductManager => "/pm/dashboard",
        UserRole::WarehouseManager => "/wm/dashboard",
        UserRole::Customer => "/customer/dashboard",
    }
}

/// Whether a session with `session_role` may access a resource gated on
/// `required_role`. Exact match, with Admin authorized everywhere.
pub fn is_authorized(session_role: UserRole, required_role: UserRole) -> bool {
    session_role == required_role || session_role == UserRole::Admin
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_ROLES: [UserRole; 6] = [
        UserRole::Admin,
        UserRole::Staff,
        UserRole::Technician,
        UserRole::ProductManager,
        UserRole::WarehouseManager,
        UserRole::Customer,
    ];

    #[test]
    fn destination_is_stable_per_role() {
        for role in ALL_ROLES {
            assert_eq!(destination_for(role), destination_for(role));
        }
    }

    #[test]
    fn customer_never_gets_admin_route() {
        assert_ne!(
            destination_for(UserRole::Customer),
            destination_for(UserRole::Admin)
        );
    }

    #[test]
    fn destinations_are_distinct() {
        for a in ALL_ROLES {
            for b in ALL_ROLES {
                if a != b {
                    assert_ne!(destination_for(a), destination_for(b));
                }
            }
        }
    }

    #[test]
    fn exact_match_is_authorized() {
        for role in ALL_ROLES {
            assert!(is_authorized(role, role));
        }
    }

    #[test]
    fn admin_is_authorized_everywhere() {
        for role in ALL_ROLES {
            assert!(is_authorized(UserRole::Admin, role));
        }
    }

    #[test]
    fn customer_is_not_authorized_elsewhere() {
        assert!(!is_authorized(UserRole::Customer, UserRole::Admin));
        assert!(!is_authorized(UserRole::Customer, UserRole::Staff));
        assert!(!is_authorized(UserRole::Staff, UserRole::Admin));
        assert!(!is_authorized(UserRole::Technician, UserRole::WarehouseManager));
    }
}
