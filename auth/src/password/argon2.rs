use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::PasswordHash;
use argon2::password_hash::PasswordHasher as Argon2PasswordHasher;
use argon2::password_hash::PasswordVerifier;
use argon2::password_hash::SaltString;
use argon2::Argon2;

use super::errors::PasswordError;

/// Argon2id password hashing with per-password random salts.
///
/// Hashes are stored and compared in PHC string format, so algorithm
/// parameters travel with the hash.
pub struct PasswordHasher;

impl PasswordHasher {
    pub fn new() -> Self {
        Self
    }

    /// Hash a plaintext password for storage.
    ///
    /// # Errors
    /// * `HashingFailed` - The hashing operation itself failed
    pub fn hash(&self, password: &str) -> Result<String, PasswordError> {
        let salt = SaltString::generate(&mut OsRng);

        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| PasswordError::HashingFailed(e.to_string()))
    }

    /// Check a plaintext password against a stored PHC string hash.
    ///
    /// Returns `Ok(false)` for a wrong password; an error only means the
    /// stored hash could not be parsed.
    ///
    /// # Errors
    /// * `MalformedHash` - The stored hash is not a valid PHC string
    pub fn verify(&self, password: &str, stored_hash: &str) -> Result<bool, PasswordError> {
        let parsed = PasswordHash::new(stored_hash)
            .map_err(|e| PasswordError::MalformedHash(e.to_string()))?;

        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok())
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hasher = PasswordHasher::new();
        let password = "my_secure_password";

        let hash = hasher.hash(password).expect("Failed to hash password");

        assert!(hash.starts_with("$argon2"));
        assert!(hasher.verify(password, &hash).expect("Failed to verify"));
        assert!(!hasher
            .verify("wrong_password", &hash)
            .expect("Failed to verify"));
    }

    #[test]
    fn test_same_password_different_salts() {
        let hasher = PasswordHasher::new();

        let first = hasher.hash("password").expect("Failed to hash");
        let second = hasher.hash("password").expect("Failed to hash");

        assert_ne!(first, second);
    }

    #[test]
    fn test_verify_malformed_hash() {
        let hasher = PasswordHasher::new();
        let result = hasher.verify("password", "not_a_phc_string");
        assert!(matches!(result, Err(PasswordError::MalformedHash(_))));
    }
}
