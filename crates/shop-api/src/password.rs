//! Client-side password hashing

use bitcoin::hashes::{sha256, Hash};

/// Hash a password before it leaves the device
///
/// Returns the hex encoded SHA-256 digest, or an empty string for an empty
/// password so that callers can skip the login request entirely.
pub fn hash_password(password: &str) -> String {
    if password.is_empty() {
        return String::new();
    }

    sha256::Hash::hash(password.as_bytes()).to_string()
}
