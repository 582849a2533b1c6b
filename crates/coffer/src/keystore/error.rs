//! Keystore error types

use thiserror::Error;

use crate::entropy::EntropyError;

/// Errors that can occur during keystore operations
#[derive(Error, Debug)]
pub enum KeystoreError {
    /// MAC verification failed. Deliberately does not distinguish a wrong
    /// passphrase from tampered ciphertext.
    #[error("authentication failed: wrong passphrase or corrupted data")]
    AuthenticationFailed,

    /// Record schema version is not the one this engine implements
    #[error("unsupported keystore version: {0}")]
    UnsupportedVersion(u32),

    /// Unsupported cipher identifier
    #[error("unsupported cipher: {0}")]
    UnsupportedCipher(String),

    /// Unsupported KDF identifier
    #[error("unsupported KDF: {0}")]
    UnsupportedKdf(String),

    /// Invalid KDF cost parameters
    #[error("invalid KDF parameters: {0}")]
    InvalidKdfParameters(String),

    /// Cipher key has the wrong size
    #[error("invalid cipher key length: expected {expected}, got {actual}")]
    InvalidKeyLength { expected: usize, actual: usize },

    /// Initialization vector has the wrong size
    #[error("invalid IV length: expected {expected}, got {actual}")]
    InvalidIvLength { expected: usize, actual: usize },

    /// Record failed to parse (missing fields, bad hex, bad JSON)
    #[error("malformed keystore record: {0}")]
    MalformedRecord(String),

    /// Secure random source failure during salt/IV generation
    #[error(transparent)]
    Entropy(#[from] EntropyError),
}

/// Result type for keystore operations
pub type KeystoreResult<T> = Result<T, KeystoreError>;
