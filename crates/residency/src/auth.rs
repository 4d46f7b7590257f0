//! Legacy password digest.
//!
//! The mobile client compares logins against an unsalted SHA-256 hex digest.
//! This is only acceptable for seeded test accounts; it must not back any
//! production authentication path.

use sha2::{Digest, Sha256};

/// Hashes a password the way the mobile client expects it stored.
pub fn hash_password(password: &str) -> String {
    hex::encode(Sha256::digest(password.as_bytes()))
}

/// Checks a password against a stored legacy digest.
pub fn verify_password(password: &str, hash: &str) -> bool {
    hash_password(password).eq_ignore_ascii_case(hash)
}
