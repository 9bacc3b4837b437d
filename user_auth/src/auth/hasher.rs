//! Credential hashing.
//!
//! Salted one-way hashing of plaintext secrets. The salt is randomized per
//! invocation, so the same input produces a different digest on every call;
//! any digest verifies against the input that produced it.

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};

use super::errors::{AuthError, AuthResult};

/// Hash a plaintext secret with Argon2id and a fresh random salt.
///
/// The returned digest is a self-describing PHC string carrying the salt
/// and parameters needed for later verification.
pub fn hash_password(password: &str) -> AuthResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    Ok(argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|_| AuthError::HashingFailed)?
        .to_string())
}

/// Verify a plaintext secret against a stored digest.
///
/// Returns `true` iff `password` was the input that produced `digest`.
/// Malformed digests verify as `false`.
pub fn verify_password(password: &str, digest: &str) -> bool {
    let Ok(parsed_hash) = PasswordHash::new(digest) else {
        return false;
    };

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok()
}
