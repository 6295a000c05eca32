//! Password hashing.

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use thiserror::Error;

#[derive(Debug, Error)]
#[error("failed to hash password")]
pub struct PasswordHashError(#[source] argon2::password_hash::Error);

/// A well-formed hash with default parameters that no password matches.
/// Verifying against it costs the same as verifying a real admin's hash.
pub(crate) const UNMATCHABLE_HASH: &str =
    "$argon2id$v=19$m=19456,t=2,p=1$UL0IbX5ozzNuQEwKAtr74g$xm+zAkQnnPwtpurNEW5soCAABAgb8KoXe7m5V2m2SgU";

/// Hash a password with Argon2id and a fresh random salt. The result is a
/// self-describing PHC string.
///
/// # Errors
///
/// Returns an error if the hasher rejects the input.
pub fn hash_password(password: &str) -> Result<String, PasswordHashError> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(PasswordHashError)
}

/// Check a password against a stored PHC string. Malformed hashes never
/// verify.
#[must_use]
pub fn verify_password(password: &str, hash: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(hash) else {
        return false;
    };

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}
