//! Credential hashing using Argon2id
//!
//! PINs and passwords are never written to disk in the clear. Each secret is
//! stored as a self-describing PHC string (algorithm, parameters, salt and
//! hash), so verification does not need any extra settings.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

use crate::error::{KioskError, KioskResult};

/// Hash a secret into a PHC string with a fresh random salt
pub fn hash_secret(secret: &str) -> KioskResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = argon2()
        .hash_password(secret.as_bytes(), &salt)
        .map_err(|e| KioskError::Crypto(format!("Hashing failed: {}", e)))?;
    Ok(hash.to_string())
}

/// Check a secret against a stored PHC string
///
/// A malformed stored hash is an error; a wrong secret is `Ok(false)`.
pub fn verify_secret(secret: &str, phc: &str) -> KioskResult<bool> {
    let parsed = PasswordHash::new(phc)
        .map_err(|e| KioskError::Crypto(format!("Stored hash is malformed: {}", e)))?;
    Ok(argon2()
        .verify_password(secret.as_bytes(), &parsed)
        .is_ok())
}

#[cfg(not(test))]
fn argon2() -> Argon2<'static> {
    Argon2::default()
}

// Unit tests hash a lot of fixtures; keep them fast.
#[cfg(test)]
fn argon2() -> Argon2<'static> {
    let params = argon2::Params::new(1024, 1, 1, None).expect("valid test params");
    Argon2::new(argon2::Algorithm::Argon2id, argon2::Version::V0x13, params)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hash = hash_secret("1234").unwrap();
        assert!(hash.starts_with("$argon2id$"));
        assert!(verify_secret("1234", &hash).unwrap());
        assert!(!verify_secret("4321", &hash).unwrap());
    }

    #[test]
    fn test_same_secret_different_salt() {
        let a = hash_secret("admin123").unwrap();
        let b = hash_secret("admin123").unwrap();
        assert_ne!(a, b);
        assert!(verify_secret("admin123", &b).unwrap());
    }

    #[test]
    fn test_malformed_hash_is_error() {
        assert!(verify_secret("1234", "1234").is_err());
    }
}
