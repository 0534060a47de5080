use crate::error::AppError;
use bcrypt::{hash, verify};

/// Hashes `password` with a fresh salt at the given bcrypt `cost`.
pub fn hash_password(password: &str, cost: u32) -> Result<String, AppError> {
    hash(password, cost)
        .map_err(|e| AppError::InternalServerError(format!("Failed to hash password: {}", e)))
}

/// Checks `password` against a stored bcrypt credential.
///
/// A malformed stored credential is reported as a mismatch, never as a match.
pub fn verify_password(password: &str, hashed_password: &str) -> bool {
    match verify(password, hashed_password) {
        Ok(matches) => matches,
        Err(e) => {
            log::warn!("stored password credential could not be verified: {}", e);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_COST: u32 = bcrypt::DEFAULT_COST - 8;

    #[test]
    fn test_password_hashing_and_verification() {
        let password = "test_password123";
        let hashed = hash_password(password, TEST_COST).unwrap();

        assert_ne!(hashed, password);
        assert!(verify_password(password, &hashed));
        assert!(!verify_password("wrong_password", &hashed));
    }

    #[test]
    fn test_hashes_are_salted() {
        let first = hash_password("pw", TEST_COST).unwrap();
        let second = hash_password("pw", TEST_COST).unwrap();
        assert_ne!(first, second);
        assert!(verify_password("pw", &first));
        assert!(verify_password("pw", &second));
    }

    #[test]
    fn test_verify_with_invalid_hash() {
        assert!(!verify_password("test_password123", "invalidhashformat"));
    }

    #[test]
    fn test_invalid_cost_is_an_error() {
        match hash_password("pw", 2) {
            Err(AppError::InternalServerError(msg)) => {
                assert!(msg.contains("Failed to hash password"))
            }
            other => panic!("Unexpected result: {:?}", other),
        }
    }
}
