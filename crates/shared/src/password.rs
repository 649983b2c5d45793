//! Password hashing utilities using Argon2id.
//!
//! Hashes are stored as self-describing PHC strings. Verification never
//! surfaces an error to business logic: a malformed digest simply fails to
//! match.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Algorithm, Argon2, Params, Version,
};
use thiserror::Error;

/// Error type for password operations.
#[derive(Debug, Error)]
pub enum PasswordError {
    #[error("Failed to hash password: {0}")]
    HashError(String),
}

/// Argon2id cost parameters, roughly 100ms per hash on commodity hardware.
/// - Memory: 19456 KiB (19 MiB)
/// - Iterations: 2
/// - Parallelism: 1
const MEMORY_COST: u32 = 19456;
const TIME_COST: u32 = 2;
const PARALLELISM: u32 = 1;
const OUTPUT_LEN: usize = 32;

fn create_argon2() -> Result<Argon2<'static>, PasswordError> {
    let params = Params::new(MEMORY_COST, TIME_COST, PARALLELISM, Some(OUTPUT_LEN))
        .map_err(|e| PasswordError::HashError(format!("Failed to create Argon2 params: {}", e)))?;

    Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
}

/// Well-formed PHC digest with production cost parameters that matches no
/// password. Verifying against it takes as long as verifying a real account.
const DUMMY_HASH: &str = "$argon2id$v=19$m=19456,t=2,p=1$78LEDZCIKVm09zWip2u/9A$/j8Iy7IYGYwOEac1c8gXb6mavVh2d5BTh17Mbtdr7BI";

/// Digest to verify against when the account does not exist, so unknown
/// usernames cost the same as wrong passwords.
pub fn dummy_hash() -> &'static str {
    DUMMY_HASH
}

/// Hashes a password using Argon2id with a fresh random salt.
///
/// # Example
/// ```
/// use shared::password::hash_password;
///
/// let hash = hash_password("my_secure_password").unwrap();
/// assert!(hash.starts_with("$argon2id$"));
/// ```
pub fn hash_password(password: &str) -> Result<String, PasswordError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = create_argon2()?;

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| PasswordError::HashError(e.to_string()))
}

/// Verifies a password against a stored PHC hash.
///
/// Returns `false` for a wrong password and for a digest that cannot be parsed.
///
/// # Example
/// ```
/// use shared::password::{hash_password, verify_password};
///
/// let hash = hash_password("my_password").unwrap();
/// assert!(verify_password("my_password", &hash));
/// assert!(!verify_password("wrong_password", &hash));
/// ```
pub fn verify_password(password: &str, hash: &str) -> bool {
    let Ok(parsed_hash) = PasswordHash::new(hash) else {
        return false;
    };

    // Parameters come from the stored hash itself
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_password_returns_phc_format() {
        let hash = hash_password("test_password").unwrap();
        assert!(hash.starts_with("$argon2id$v=19$m=19456,t=2,p=1$"));
    }

    #[test]
    fn test_hash_password_produces_unique_hashes() {
        let hash1 = hash_password("same_password").unwrap();
        let hash2 = hash_password("same_password").unwrap();
        assert_ne!(hash1, hash2);
    }

    #[test]
    fn test_verify_password_correct() {
        let hash = hash_password("pw123456789").unwrap();
        assert!(verify_password("pw123456789", &hash));
    }

    #[test]
    fn test_verify_password_incorrect() {
        let hash = hash_password("pw123456789").unwrap();
        assert!(!verify_password("pw123456780", &hash));
        assert!(!verify_password("", &hash));
    }

    #[test]
    fn test_verify_password_malformed_hash_fails_closed() {
        assert!(!verify_password("password", "invalid_hash_format"));
        assert!(!verify_password("password", ""));
        assert!(!verify_password("password", "$argon2id$v=19$garbage"));
    }

    #[test]
    fn test_hash_password_unicode() {
        let password = "密码123!пароль";
        let hash = hash_password(password).unwrap();
        assert!(verify_password(password, &hash));
        assert!(!verify_password("different", &hash));
    }

    #[test]
    fn test_dummy_hash_uses_production_cost() {
        assert!(dummy_hash().starts_with("$argon2id$v=19$m=19456,t=2,p=1$"));
        assert!(PasswordHash::new(dummy_hash()).is_ok());
    }

    #[test]
    fn test_dummy_hash_matches_nothing() {
        assert!(!verify_password("", dummy_hash()));
        assert!(!verify_password("password", dummy_hash()));
        assert!(!verify_password("pw123456789", dummy_hash()));
    }

    #[test]
    fn test_hash_does_not_contain_plaintext() {
        let hash = hash_password("visible-secret").unwrap();
        assert!(!hash.contains("visible-secret"));
    }
}
