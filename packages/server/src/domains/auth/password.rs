//! Password hashing.
//!
//! bcrypt with the library default cost. Verification failures and hash
//! errors are both reported as `anyhow::Error`; callers map them to the
//! uniform `InvalidCredentials` response.

use anyhow::{Context, Result};
use bcrypt::{hash, verify, DEFAULT_COST};

/// Minimum accepted password length.
pub const MIN_PASSWORD_LEN: usize = 8;

/// Hash a plaintext password for storage.
pub fn hash_password(plain: &str) -> Result<String> {
    hash(plain, DEFAULT_COST).context("Failed to hash password")
}

/// Check a plaintext password against a stored hash.
pub fn verify_password(plain: &str, hashed: &str) -> Result<bool> {
    verify(plain, hashed).context("Failed to verify password")
}
