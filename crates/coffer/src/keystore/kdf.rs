//! Key Derivation Function (KDF) implementation
//!
//! Implements scrypt-based key derivation for Web3 Secret Storage V3
//! keystores. Default parameters use N=262144 (2^18); the light profile
//! (N=4096) trades brute-force resistance for interactive-use latency.
//!
//! scrypt is the only KDF this engine implements. Records naming any
//! other KDF must be rejected by the caller, never silently substituted.

use serde::{Deserialize, Serialize};

use super::error::{KeystoreError, KeystoreResult};
use crate::entropy::{self, EntropyError};
use crate::secure::{IntoSecret, SecretBytes};

/// KDF identifier stored in V3 records
pub const KDF_SCRYPT: &str = "scrypt";

/// Standard scrypt cost parameters for new records
pub const DEFAULT_SCRYPT_N: u32 = 262144; // 2^18
pub const DEFAULT_SCRYPT_R: u32 = 8; // block size
pub const DEFAULT_SCRYPT_P: u32 = 1; // parallelization
pub const DEFAULT_SCRYPT_DKLEN: u32 = 32; // derived key length

/// Light-profile cost parameters (interactive use, tests)
pub const LIGHT_SCRYPT_N: u32 = 4096;
pub const LIGHT_SCRYPT_P: u32 = 6;

/// Salt length in bytes for new records
pub const SALT_LENGTH: usize = 32;

/// scrypt cost configuration used when creating new records
///
/// Decryption never consults this: cost parameters ride inside each
/// record, so old records stay readable after defaults change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScryptConfig {
    /// CPU/memory cost parameter (must be a power of 2)
    pub n: u32,
    /// Block size parameter
    pub r: u32,
    /// Parallelization parameter
    pub p: u32,
    /// Derived key length in bytes
    pub dklen: u32,
}

impl Default for ScryptConfig {
    fn default() -> Self {
        Self {
            n: DEFAULT_SCRYPT_N,
            r: DEFAULT_SCRYPT_R,
            p: DEFAULT_SCRYPT_P,
            dklen: DEFAULT_SCRYPT_DKLEN,
        }
    }
}

impl ScryptConfig {
    /// Light-profile configuration (N=4096, p=6)
    pub fn light() -> Self {
        Self {
            n: LIGHT_SCRYPT_N,
            r: DEFAULT_SCRYPT_R,
            p: LIGHT_SCRYPT_P,
            dklen: DEFAULT_SCRYPT_DKLEN,
        }
    }

    /// Validate the cost parameters
    pub fn validate(&self) -> KeystoreResult<()> {
        // n must be a power of 2, at least 2
        if self.n < 2 || (self.n & (self.n - 1)) != 0 {
            return Err(KeystoreError::InvalidKdfParameters(
                "n must be a power of 2, at least 2".to_string(),
            ));
        }
        if self.r == 0 {
            return Err(KeystoreError::InvalidKdfParameters(
                "r must be positive".to_string(),
            ));
        }
        if self.p == 0 {
            return Err(KeystoreError::InvalidKdfParameters(
                "p must be positive".to_string(),
            ));
        }
        // the derived key is split into a 16-byte cipher key and a
        // 16-byte MAC key, so anything shorter cannot be used
        if self.dklen < 32 {
            return Err(KeystoreError::InvalidKdfParameters(
                "dklen must be at least 32".to_string(),
            ));
        }
        Ok(())
    }

    /// Derive a key from the given passphrase and salt
    pub fn derive(&self, passphrase: &str, salt: &[u8]) -> KeystoreResult<SecretBytes> {
        self.validate()?;

        // n is a validated power of 2, so trailing_zeros is exact
        let log_n = self.n.trailing_zeros() as u8;
        let params = scrypt::Params::new(log_n, self.r, self.p)
            .map_err(|e| KeystoreError::InvalidKdfParameters(e.to_string()))?;

        let mut output = vec![0u8; self.dklen as usize];
        scrypt::scrypt(passphrase.as_bytes(), salt, &params, &mut output)
            .map_err(|e| KeystoreError::InvalidKdfParameters(e.to_string()))?;

        Ok(output.into_secret())
    }
}

/// scrypt parameters as stored in a V3 record's `kdfparams` field
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScryptParams {
    /// Derived key length in bytes
    pub dklen: u32,
    /// CPU/memory cost parameter (must be a power of 2)
    pub n: u32,
    /// Block size parameter
    pub r: u32,
    /// Parallelization parameter
    pub p: u32,
    /// Salt as hex string
    pub salt: String,
}

impl ScryptParams {
    /// Build stored parameters from a cost configuration and salt
    pub fn new(config: &ScryptConfig, salt: &[u8]) -> Self {
        Self {
            dklen: config.dklen,
            n: config.n,
            r: config.r,
            p: config.p,
            salt: hex::encode(salt),
        }
    }

    /// Reconstruct the cost configuration these parameters describe
    pub fn config(&self) -> ScryptConfig {
        ScryptConfig {
            n: self.n,
            r: self.r,
            p: self.p,
            dklen: self.dklen,
        }
    }

    /// Get the salt bytes
    pub fn salt_bytes(&self) -> KeystoreResult<Vec<u8>> {
        hex::decode(&self.salt)
            .map_err(|e| KeystoreError::MalformedRecord(format!("invalid salt hex: {}", e)))
    }

    /// Derive a key from the given passphrase using the stored parameters
    pub fn derive(&self, passphrase: &str) -> KeystoreResult<SecretBytes> {
        let salt = self.salt_bytes()?;
        self.config().derive(passphrase, &salt)
    }
}

/// KDF parameters of a parsed record
///
/// Untagged: scrypt parameters deserialize into the typed variant; the
/// parameters of any other KDF land in `Foreign` so the record still
/// parses and the engine can reject it by KDF name instead of choking
/// on the schema.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum KdfParams {
    /// scrypt parameters
    Scrypt(ScryptParams),
    /// Parameters of a KDF this engine does not implement
    Foreign(serde_json::Value),
}

/// Generate a random salt from OS entropy
pub fn generate_salt() -> Result<Vec<u8>, EntropyError> {
    let mut salt = vec![0u8; SALT_LENGTH];
    entropy::fill_random(&mut salt)?;
    Ok(salt)
}
