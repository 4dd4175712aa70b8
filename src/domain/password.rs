//! Password value object wrapping Argon2 hashing.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

use crate::config::MIN_PASSWORD_LENGTH;
use crate::errors::{AppError, AppResult};

/// Hash used when an account does not exist, so a failed sign-in costs the
/// same as a wrong password.
pub const DUMMY_HASH: &str =
    "$argon2id$v=19$m=19456,t=2,p=1$ZHVtbXlzYWx0MTIzNDU2$Vf0a6Lf3cdKVR3c5M4B5DnXo5jvG1qZ1bHwH1KeQmVE";

/// Hashed password. Never holds plain text.
#[derive(Clone, PartialEq, Eq)]
pub struct Password {
    hash: String,
}

impl std::fmt::Debug for Password {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Password")
            .field("hash", &"[REDACTED]")
            .finish()
    }
}

impl Password {
    /// Hash a plain text password.
    ///
    /// # Errors
    /// Returns a validation error if the password is shorter than
    /// [`MIN_PASSWORD_LENGTH`].
    pub fn new(plain_text: &str) -> AppResult<Self> {
        if plain_text.chars().count() < MIN_PASSWORD_LENGTH as usize {
            return Err(AppError::validation(format!(
                "Password must be at least {} characters",
                MIN_PASSWORD_LENGTH
            )));
        }

        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(plain_text.as_bytes(), &salt)
            .map_err(|e| AppError::internal(format!("Password hash failed: {}", e)))?
            .to_string();

        Ok(Self { hash })
    }

    /// Wrap a hash loaded from the database.
    pub fn from_hash(hash: String) -> Self {
        Self { hash }
    }

    pub fn as_str(&self) -> &str {
        &self.hash
    }

    pub fn into_string(self) -> String {
        self.hash
    }

    /// Verify a plain text password. A malformed stored hash never matches.
    pub fn verify(&self, plain_text: &str) -> bool {
        match PasswordHash::new(&self.hash) {
            Ok(parsed) => Argon2::default()
                .verify_password(plain_text.as_bytes(), &parsed)
                .is_ok(),
            Err(e) => {
                tracing::warn!("Stored password hash is malformed: {}", e);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_hash_and_verify() {
        let plain = "SecurePassword123!";
        let password = Password::new(plain).unwrap();

        assert!(password.verify(plain));
        assert!(!password.verify("WrongPassword123"));
    }

    #[test]
    fn test_password_from_hash() {
        let plain = "TestPassword123";
        let hash = Password::new(plain).unwrap().into_string();

        assert!(Password::from_hash(hash).verify(plain));
    }

    #[test]
    fn test_same_password_different_salts() {
        let pass1 = Password::new("SamePassword").unwrap();
        let pass2 = Password::new("SamePassword").unwrap();

        assert_ne!(pass1.as_str(), pass2.as_str());
        assert!(pass1.verify("SamePassword"));
        assert!(pass2.verify("SamePassword"));
    }

    #[test]
    fn test_password_too_short() {
        assert!(Password::new("abcd").is_err());
        assert!(Password::new("abcde").is_ok());
    }

    #[test]
    fn test_dummy_hash_never_verifies() {
        assert!(!Password::from_hash(DUMMY_HASH.to_string()).verify("anything"));
    }
}
