//! Keccak-256 MAC for keystore authentication
//!
//! The MAC is computed over: mac_key || ciphertext, where mac_key is the
//! second half of the derived key. A passing check proves both that the
//! passphrase derived the right key and that the ciphertext is intact.

use alloy_primitives::Keccak256;

use super::error::{KeystoreError, KeystoreResult};

/// MAC length in bytes (keccak-256 output width)
pub const MAC_LENGTH: usize = 32;

/// Compute the MAC over mac_key || ciphertext
///
/// # Arguments
///
/// * `mac_key` - The MAC sub-key (second half of the derived key)
/// * `ciphertext` - The encrypted secret data
pub fn compute(mac_key: &[u8], ciphertext: &[u8]) -> [u8; MAC_LENGTH] {
    let mut hasher = Keccak256::new();
    hasher.update(mac_key);
    hasher.update(ciphertext);
    hasher.finalize().into()
}

/// Verify a stored MAC against the derived MAC sub-key and ciphertext
///
/// The comparison runs in constant time. Failure deliberately does not
/// reveal whether the passphrase or the ciphertext was at fault.
pub fn verify(mac_key: &[u8], ciphertext: &[u8], expected: &[u8]) -> KeystoreResult<()> {
    let computed = compute(mac_key, ciphertext);

    if constant_time_eq(&computed, expected) {
        Ok(())
    } else {
        Err(KeystoreError::AuthenticationFailed)
    }
}

/// Constant-time comparison to prevent timing attacks
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }

    let mut result = 0u8;
    for (x, y) in a.iter().zip(b.iter()) {
        result |= x ^ y;
    }
    result == 0
}
