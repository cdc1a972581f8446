//! Password hashing. Argon2id with a per-user random salt; the encoded
//! hash string carries its own parameters, so verification needs no
//! additional state.

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};

use crate::error::{DomainError, DomainResult};

pub fn hash(password: &str) -> DomainResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|h| h.to_string())
        .map_err(|e| DomainError::Internal(format!("password hashing failed: {e}")))
}

/// One-way comparison of a candidate password against a stored hash.
pub fn verify(password: &str, stored_hash: &str) -> DomainResult<bool> {
    let parsed = PasswordHash::new(stored_hash)
        .map_err(|e| DomainError::Internal(format!("stored password hash malformed: {e}")))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}
