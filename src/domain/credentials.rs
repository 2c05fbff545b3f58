//! Password hashing and verification.
//!
//! Passwords are hashed with bcrypt at cost 12. Verification against a
//! malformed stored hash reports a mismatch rather than an error, so login
//! failures never leak whether an account exists or its hash is corrupt.

use serde::{Deserialize, Serialize};

/// Bcrypt work factor for newly hashed passwords.
pub const BCRYPT_COST: u32 = 12;

/// Minimum accepted password length at signup.
pub const MIN_PASSWORD_LEN: usize = 8;

/// Errors raised while hashing credentials.
#[derive(Debug, thiserror::Error)]
pub enum CredentialsError {
    #[error("password must be at least {MIN_PASSWORD_LEN} characters")]
    PasswordTooShort,
    #[error("failed to hash password: {0}")]
    Hash(#[from] bcrypt::BcryptError),
}

/// An opaque bcrypt password hash.
///
/// The inner string is never logged or serialised into API responses; the
/// serde impls exist only for persistence adapters.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PasswordHash(String);

impl PasswordHash {
    /// Wrap a hash loaded from storage.
    pub fn from_stored(hash: impl Into<String>) -> Self {
        Self(hash.into())
    }

    /// Access the stored hash string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("PasswordHash(***)")
    }
}

/// Hash a plaintext password for storage.
pub fn hash_password(plaintext: &str) -> Result<PasswordHash, CredentialsError> {
    if plaintext.len() < MIN_PASSWORD_LEN {
        return Err(CredentialsError::PasswordTooShort);
    }
    Ok(PasswordHash(bcrypt::hash(plaintext, BCRYPT_COST)?))
}

/// Check a plaintext password against a stored hash.
///
/// Returns `false` for mismatches and for unparseable hashes.
pub fn verify_password(plaintext: &str, hash: &PasswordHash) -> bool {
    bcrypt::verify(plaintext, hash.as_str()).unwrap_or(false)
}
