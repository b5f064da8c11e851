// ============================
// ticklist-backend-lib/src/auth/password.rs
// ============================
//! Password hashing and verification.
//!
//! The digest is a plain unsalted MD5 hex string: deterministic, so
//! verification is a straight comparison against the stored value.
//! Existing stored credentials use this scheme.
use md5::{Digest, Md5};

/// Hash a password to its hex digest
pub fn hash_password(plain: &str) -> String {
    let mut hasher = Md5::new();
    hasher.update(plain.as_bytes());
    hex::encode(hasher.finalize())
}

/// Verify a password against a stored digest
pub fn verify_password(digest: &str, plain: &str) -> bool {
    hash_password(plain) == digest
}
