//! Salted password digests.
//!
//! `hash_password(password, salt) = hex(SHA-256(salt + ":" + password))`.
//! The same digest keyed by a user's salt also signs that user's sessions.

use rand::RngCore;
use sha2::{Digest, Sha256};

/// Salt length in random bytes (the hex form is twice as long).
pub const DEFAULT_SALT_BYTES: usize = 16;

/// Generate a random salt of `length` bytes, hex-encoded.
pub fn random_salt(length: usize) -> String {
    let mut rng = rand::rng();
    let mut bytes = vec![0u8; length];
    rng.fill_bytes(&mut bytes);
    hex::encode(bytes)
}

/// Digest a password with a hex salt.
pub fn hash_password(password: &str, salt_hex: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt_hex.as_bytes());
    hasher.update(b":");
    hasher.update(password.as_bytes());
    hex::encode(hasher.finalize())
}

/// Check a password against a stored digest.
pub fn verify_password(password: &str, salt_hex: &str, expected_hash: &str) -> bool {
    digests_match(&hash_password(password, salt_hex), expected_hash)
}

/// Constant-time comparison of two hex digests.
pub fn digests_match(a: &str, b: &str) -> bool {
    let (a, b) = (a.as_bytes(), b.as_bytes());
    if a.len() != b.len() {
        return false;
    }
    let mut diff = 0u8;
    for (x, y) in a.iter().zip(b.iter()) {
        diff |= x ^ y;
    }
    diff == 0
}
