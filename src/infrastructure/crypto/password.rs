//! Password hashing utilities

use bcrypt::{hash, verify};

/// Hash a password using bcrypt with a per-hash random salt. The cost
/// factor is config-driven; tests use the minimum cost to stay fast.
pub fn hash_password_with_cost(
    password: &str,
    cost: u32,
) -> Result<String, bcrypt::BcryptError> {
    hash(password, cost)
}

/// Verify a password against a stored hash.
///
/// Fails closed: callers treat `Err` the same as `Ok(false)`.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, bcrypt::BcryptError> {
    verify(password, hash)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Minimum cost bcrypt accepts; keeps tests fast.
    const MIN_TEST_COST: u32 = 4;

    #[test]
    fn hash_then_verify_matches() {
        let hashed = hash_password_with_cost("s3cret-pass", MIN_TEST_COST).unwrap();
        assert!(verify_password("s3cret-pass", &hashed).unwrap());
    }

    #[test]
    fn wrong_password_does_not_verify() {
        let hashed = hash_password_with_cost("s3cret-pass", MIN_TEST_COST).unwrap();
        assert!(!verify_password("s3cret-pass2", &hashed).unwrap());
        assert!(!verify_password("", &hashed).unwrap());
    }

    #[test]
    fn hashes_are_salted() {
        let a = hash_password_with_cost("same-pass", MIN_TEST_COST).unwrap();
        let b = hash_password_with_cost("same-pass", MIN_TEST_COST).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn garbage_hash_fails_closed() {
        assert!(verify_password("anything", "not-a-bcrypt-hash").is_err());
    }
}
