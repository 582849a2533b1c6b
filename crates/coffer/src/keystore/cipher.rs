//! AES-128-CTR cipher implementation for keystore encryption
//!
//! Counter mode needs no padding and is its own inverse: applying the
//! keystream twice with the same (key, iv) returns the original bytes,
//! so decryption reuses the encryption primitive.

use aes::Aes128;
use cipher::{KeyIvInit, StreamCipher};
use ctr::Ctr128BE;
use serde::{Deserialize, Serialize};

use super::error::{KeystoreError, KeystoreResult};
use crate::entropy::{self, EntropyError};
use crate::secure::{IntoSecret, SecretBytes};

/// Cipher identifier stored in V3 records
pub const CIPHER_AES_128_CTR: &str = "aes-128-ctr";

/// AES-128 key length
pub const KEY_LENGTH: usize = 16;

/// IV (initialization vector) length for AES-128-CTR
pub const IV_LENGTH: usize = 16;

/// Type alias for AES-128-CTR with a big-endian counter
type Aes128Ctr = Ctr128BE<Aes128>;

/// XOR the AES-128-CTR keystream for (key, iv) into `data`
fn apply_keystream(key: &[u8], iv: &[u8], data: &mut [u8]) -> KeystoreResult<()> {
    let key: [u8; KEY_LENGTH] = key
        .try_into()
        .map_err(|_| KeystoreError::InvalidKeyLength {
            expected: KEY_LENGTH,
            actual: key.len(),
        })?;

    let iv: [u8; IV_LENGTH] = iv.try_into().map_err(|_| KeystoreError::InvalidIvLength {
        expected: IV_LENGTH,
        actual: iv.len(),
    })?;

    let mut cipher = Aes128Ctr::new(&key.into(), &iv.into());
    cipher.apply_keystream(data);
    Ok(())
}

/// Encrypt plaintext using AES-128-CTR
///
/// # Arguments
///
/// * `key` - 16-byte cipher key (the first half of the derived key)
/// * `iv` - 16-byte initialization vector
/// * `plaintext` - The secret data to encrypt
pub fn encrypt(key: &[u8], iv: &[u8], plaintext: &[u8]) -> KeystoreResult<Vec<u8>> {
    let mut ciphertext = plaintext.to_vec();
    apply_keystream(key, iv, &mut ciphertext)?;
    Ok(ciphertext)
}

/// Decrypt ciphertext using AES-128-CTR
///
/// Callers must verify the record MAC before treating the output as a
/// usable key; this primitive alone authenticates nothing.
pub fn decrypt(key: &[u8], iv: &[u8], ciphertext: &[u8]) -> KeystoreResult<SecretBytes> {
    let mut plaintext = ciphertext.to_vec();
    apply_keystream(key, iv, &mut plaintext)?;
    Ok(plaintext.into_secret())
}

/// Cipher parameters as stored in a V3 record's `cipherparams` field
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CipherParams {
    /// Initialization vector as hex string
    pub iv: String,
}

impl CipherParams {
    /// Build stored parameters from IV bytes
    pub fn new(iv: &[u8]) -> Self {
        Self {
            iv: hex::encode(iv),
        }
    }

    /// Get the IV bytes
    pub fn iv_bytes(&self) -> KeystoreResult<[u8; IV_LENGTH]> {
        let bytes = hex::decode(&self.iv)
            .map_err(|e| KeystoreError::MalformedRecord(format!("invalid IV hex: {}", e)))?;
        let actual = bytes.len();
        bytes
            .try_into()
            .map_err(|_| KeystoreError::InvalidIvLength {
                expected: IV_LENGTH,
                actual,
            })
    }
}

/// Generate a random IV from OS entropy
pub fn generate_iv() -> Result<[u8; IV_LENGTH], EntropyError> {
    entropy::random_bytes::<IV_LENGTH>()
}
