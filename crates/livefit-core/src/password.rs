use bcrypt::{hash, verify};

use crate::errors::AppError;

/// bcrypt work factor used for stored password hashes.
pub const HASH_COST: u32 = 10;

pub fn hash_password(password: &str) -> Result<String, AppError> {
    hash(password, HASH_COST)
        .map_err(|e| AppError::internal_error(format!("Failed to hash password: {}", e)))
}

pub fn verify_password(password: &str, hash: &str) -> Result<bool, AppError> {
    verify(password, hash)
        .map_err(|e| AppError::internal_error(format!("Failed to verify password: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hashed = hash_password("Passw0rdOk").unwrap();
        assert_ne!(hashed, "Passw0rdOk");
        assert!(verify_password("Passw0rdOk", &hashed).unwrap());
        assert!(!verify_password("Passw0rdNo", &hashed).unwrap());
    }

    #[test]
    fn test_verify_rejects_malformed_hash() {
        assert!(verify_password("Passw0rdOk", "not-a-hash").is_err());
    }
}
