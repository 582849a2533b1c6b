//! Web3 Secret Storage V3 compatible keystore implementation
//!
//! This module encrypts secp256k1 account keys under a user passphrase
//! in the JSON format shared by Ethereum account managers. The format
//! supports:
//!
//! - Passphrase-based encryption using scrypt KDF
//! - AES-128-CTR symmetric encryption
//! - keccak-256 MAC verification
//! - JSON serialization for portability
//!
//! # Security Properties
//!
//! - Keys are encrypted at rest with a user passphrase
//! - scrypt KDF makes brute-force attacks expensive
//! - The MAC rejects both wrong passphrases and tampered ciphertext,
//!   without revealing which
//! - Cost parameters ride inside each record, so old records stay
//!   decryptable after defaults change
//!
//! # Example
//!
//! ```
//! use coffer::{KeyPair, KeystoreRecord, ScryptConfig};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // Encrypt a fresh key pair (light costs shown; default is N=2^18)
//! let keypair = KeyPair::generate()?;
//! let record =
//!     KeystoreRecord::encrypt_with(&keypair, "correct horse battery staple", &ScryptConfig::light())?;
//!
//! // Serialize, parse back, decrypt
//! let json = record.to_json_pretty()?;
//! let restored = KeystoreRecord::from_json(&json)?;
//! let secret = restored.decrypt("correct horse battery staple")?;
//! assert_eq!(*secret.to_bytes(), *keypair.secret_key.to_bytes());
//! # Ok(())
//! # }
//! ```

mod cipher;
mod engine;
mod error;
mod kdf;
mod mac;
mod record;

pub use cipher::{generate_iv, CipherParams, CIPHER_AES_128_CTR, IV_LENGTH, KEY_LENGTH};
pub use engine::MAC_KEY_LENGTH;
pub use error::{KeystoreError, KeystoreResult};
pub use kdf::{
    generate_salt, KdfParams, ScryptConfig, ScryptParams, DEFAULT_SCRYPT_DKLEN, DEFAULT_SCRYPT_N,
    DEFAULT_SCRYPT_P, DEFAULT_SCRYPT_R, KDF_SCRYPT, LIGHT_SCRYPT_N, LIGHT_SCRYPT_P, SALT_LENGTH,
};
pub use mac::{compute as compute_mac, verify as verify_mac, MAC_LENGTH};
pub use record::{CryptoParams, KeystoreRecord, KEYSTORE_VERSION};
