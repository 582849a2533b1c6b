//! Passphrase-encrypted keystores for secp256k1 account keys
//!
//! This crate provides:
//! - secp256k1 keypair generation with Ethereum-style (keccak-256) addresses
//! - Web3 Secret Storage V3 keystores: scrypt KDF, AES-128-CTR, keccak-256 MAC
//! - A JSON codec interchangeable with other implementations of the format
//! - Zeroize-on-drop containers for every piece of secret material

pub mod entropy;
pub mod error;
pub mod keypair;
pub mod keystore;
pub mod secure;

// Keypair exports
pub use keypair::{
    KeyPair, PublicKey, SecretKey, Signature, PUBLIC_KEY_LENGTH, SECRET_KEY_LENGTH,
    SIGNATURE_LENGTH, UNCOMPRESSED_PUBLIC_KEY_LENGTH,
};

// Keystore exports
pub use keystore::{
    CipherParams, CryptoParams, KdfParams, KeystoreError, KeystoreRecord, KeystoreResult,
    ScryptConfig, ScryptParams, CIPHER_AES_128_CTR, KDF_SCRYPT, KEYSTORE_VERSION,
};

// Error exports
pub use entropy::EntropyError;
pub use error::CryptoError;

// Secure memory exports
pub use secure::{ExposeSecret, IntoSecret, SecretBytes};
