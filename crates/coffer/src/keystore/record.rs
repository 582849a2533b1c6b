//! Web3 Secret Storage V3 record codec
//!
//! Defines the on-disk JSON layout shared with other implementations of
//! the format and nothing else: parsing, field-level hex validation, and
//! serialization. Whether a record can actually be decrypted (version,
//! cipher and KDF identifiers, MAC) is decided by the engine, so records
//! written by foreign tools always survive a parse/serialize round trip.

use alloy_primitives::Address;
use serde::{Deserialize, Serialize};

use super::cipher::CipherParams;
use super::error::{KeystoreError, KeystoreResult};
use super::kdf::KdfParams;

/// Schema version for Web3 Secret Storage records
pub const KEYSTORE_VERSION: u32 = 3;

/// A complete V3 keystore record
///
/// Contains the encrypted private key along with every parameter needed
/// for decryption. The `address` and `id` fields are metadata: absent in
/// some foreign records, never trusted for anything security-relevant.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct KeystoreRecord {
    /// Account address as hex string, no 0x prefix
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    /// Crypto parameters (cipher + KDF + MAC)
    pub crypto: CryptoParams,
    /// Unique identifier
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Schema version
    pub version: u32,
}

/// The `crypto` object of a V3 record
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CryptoParams {
    /// Cipher function identifier (e.g., "aes-128-ctr")
    pub cipher: String,
    /// Encrypted secret as hex string
    pub ciphertext: String,
    /// Cipher parameters
    pub cipherparams: CipherParams,
    /// KDF function identifier (e.g., "scrypt")
    pub kdf: String,
    /// KDF parameters
    pub kdfparams: KdfParams,
    /// MAC over mac_key || ciphertext as hex string
    pub mac: String,
}

impl KeystoreRecord {
    /// Parse a record from its JSON form
    pub fn from_json(json: &str) -> KeystoreResult<Self> {
        let record: Self = serde_json::from_str(json)
            .map_err(|e| KeystoreError::MalformedRecord(e.to_string()))?;
        record.validate()?;
        Ok(record)
    }

    /// Serialize to compact JSON
    pub fn to_json(&self) -> KeystoreResult<String> {
        serde_json::to_string(self).map_err(|e| KeystoreError::MalformedRecord(e.to_string()))
    }

    /// Serialize to pretty-printed JSON
    pub fn to_json_pretty(&self) -> KeystoreResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| KeystoreError::MalformedRecord(e.to_string()))
    }

    /// Check that every field required to be hex actually is
    pub fn validate(&self) -> KeystoreResult<()> {
        require_hex("ciphertext", &self.crypto.ciphertext)?;
        require_hex("mac", &self.crypto.mac)?;
        require_hex("iv", &self.crypto.cipherparams.iv)?;
        if let KdfParams::Scrypt(params) = &self.crypto.kdfparams {
            require_hex("salt", &params.salt)?;
        }
        if let Some(address) = &self.address {
            require_hex("address", address.trim_start_matches("0x"))?;
        }
        Ok(())
    }

    /// Get the ciphertext bytes
    pub fn ciphertext_bytes(&self) -> KeystoreResult<Vec<u8>> {
        hex::decode(&self.crypto.ciphertext)
            .map_err(|e| KeystoreError::MalformedRecord(format!("invalid ciphertext hex: {}", e)))
    }

    /// Get the MAC bytes
    pub fn mac_bytes(&self) -> KeystoreResult<Vec<u8>> {
        hex::decode(&self.crypto.mac)
            .map_err(|e| KeystoreError::MalformedRecord(format!("invalid mac hex: {}", e)))
    }

    /// Get the stored address, if present and well-formed
    ///
    /// Tolerates an optional 0x prefix. Returns None for records without
    /// an address or with one that is not 20 bytes of hex.
    pub fn parsed_address(&self) -> Option<Address> {
        let hex_str = self.address.as_ref()?.trim_start_matches("0x");
        let bytes = hex::decode(hex_str).ok()?;
        (bytes.len() == Address::len_bytes()).then(|| Address::from_slice(&bytes))
    }
}

fn require_hex(field: &str, value: &str) -> KeystoreResult<()> {
    hex::decode(value)
        .map(|_| ())
        .map_err(|e| KeystoreError::MalformedRecord(format!("invalid {} hex: {}", field, e)))
}
