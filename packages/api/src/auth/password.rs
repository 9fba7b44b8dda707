//! # Password hashing and verification: Argon2id
//!
//! - [`hash_password`] salts with [`OsRng`] and returns a PHC-format string
//!   (`$argon2id$v=19$m=19456,t=2,p=1$...`) stored in `users.password_hash`.
//! - [`verify_password`] returns `Ok(false)` on mismatch and `Err` only when the
//!   stored hash itself is malformed.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

use std::sync::OnceLock;

use crate::error::AuthError;

/// Minimum accepted password length, in bytes.
pub const MIN_PASSWORD_LEN: usize = 8;

/// Hash a password using Argon2id. Returns a PHC-format string.
pub fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AuthError::Hashing(e.to_string()))
}

/// Verify a password against a PHC-format hash string.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, AuthError> {
    let parsed = PasswordHash::new(hash).map_err(|e| AuthError::Hashing(e.to_string()))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}

static UNKNOWN_ACCOUNT_HASH: OnceLock<Option<String>> = OnceLock::new();

/// Run a full Argon2 verification for an email with no account, so the
/// response takes as long as a wrong password does. Always `false`.
pub fn verify_unknown_account(password: &str) -> bool {
    let hash = UNKNOWN_ACCOUNT_HASH.get_or_init(|| hash_password("lead-desk-unknown-account").ok());
    if let Some(hash) = hash {
        let _ = verify_password(password, hash);
    }
    false
}

/// Normalized sign-up form.
#[derive(Debug, Clone, PartialEq)]
pub struct SignUp {
    pub email: String,
    pub company: String,
}

/// Check a sign-up form, returning the trimmed, lower-cased email and trimmed company.
pub fn validate_sign_up(email: &str, password: &str, company: &str) -> Result<SignUp, AuthError> {
    let email = email.trim().to_lowercase();
    let company = company.trim().to_string();

    if email.is_empty() || !email.contains('@') {
        return Err(AuthError::InvalidInput("Invalid email address".to_string()));
    }
    if password.len() < MIN_PASSWORD_LEN {
        return Err(AuthError::InvalidInput(format!(
            "Password must be at least {} characters",
            MIN_PASSWORD_LEN
        )));
    }
    if company.is_empty() {
        return Err(AuthError::InvalidInput("Company is required".to_string()));
    }

    Ok(SignUp { email, company })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_then_verify() {
        let hash = hash_password("correct horse").unwrap();
        assert!(hash.starts_with("$argon2id$"));
        assert!(verify_password("correct horse", &hash).unwrap());
        assert!(!verify_password("wrong horse", &hash).unwrap());
    }

    #[test]
    fn test_unknown_account_never_verifies() {
        assert!(!verify_unknown_account("lead-desk-unknown-account"));
        assert!(!verify_unknown_account("anything"));
        let hash = UNKNOWN_ACCOUNT_HASH.get().unwrap().as_deref().unwrap();
        assert!(hash.starts_with("$argon2id$"));
    }

    #[test]
    fn test_malformed_hash_is_an_error() {
        assert!(verify_password("anything", "not-a-phc-string").is_err());
    }

    #[test]
    fn test_sign_up_normalizes_and_rejects() {
        let form = validate_sign_up("  Jane@Acme.TEST ", "password1", " Acme ").unwrap();
        assert_eq!(form.email, "jane@acme.test");
        assert_eq!(form.company, "Acme");

        assert!(validate_sign_up("jane", "password1", "Acme").is_err());
        assert!(validate_sign_up("jane@acme.test", "short", "Acme").is_err());
        assert!(validate_sign_up("jane@acme.test", "password1", " ").is_err());
    }
}
