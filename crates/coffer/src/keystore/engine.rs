//! Keystore engine: passphrase encryption and decryption of V3 records
//!
//! Encryption derives a 32-byte key from the passphrase via scrypt,
//! splits it into a cipher key (first half) and a MAC key (second half),
//! encrypts the secret with AES-128-CTR under a fresh IV, and seals the
//! ciphertext with keccak256(mac_key || ciphertext).
//!
//! Decryption re-derives and verifies the MAC before touching the
//! plaintext. Version, cipher and KDF identifiers are checked up front,
//! so incompatible records are rejected without paying for derivation.

use secrecy::ExposeSecret;
use uuid::Uuid;

use super::cipher::{self, generate_iv, CipherParams, CIPHER_AES_128_CTR, KEY_LENGTH};
use super::error::{KeystoreError, KeystoreResult};
use super::kdf::{generate_salt, KdfParams, ScryptConfig, ScryptParams, KDF_SCRYPT};
use super::mac;
use super::record::{CryptoParams, KeystoreRecord, KEYSTORE_VERSION};
use crate::keypair::{KeyPair, SecretKey, SECRET_KEY_LENGTH};

/// MAC sub-key length (second half of the derived key)
pub const MAC_KEY_LENGTH: usize = 16;

impl KeystoreRecord {
    /// Encrypt a key pair under a passphrase with default scrypt costs
    pub fn encrypt(keypair: &KeyPair, passphrase: &str) -> KeystoreResult<Self> {
        Self::encrypt_with(keypair, passphrase, &ScryptConfig::default())
    }

    /// Encrypt a key pair under a passphrase with the given scrypt costs
    ///
    /// Draws a fresh salt and IV on every call, so encrypting the same
    /// key twice never produces the same record.
    pub fn encrypt_with(
        keypair: &KeyPair,
        passphrase: &str,
        config: &ScryptConfig,
    ) -> KeystoreResult<Self> {
        config.validate()?;

        let salt = generate_salt()?;
        let iv = generate_iv()?;

        let derived = config.derive(passphrase, &salt)?;
        let (cipher_key, mac_key) = split_derived_key(derived.expose_secret())?;

        let secret_bytes = keypair.secret_key.to_bytes();
        let ciphertext = cipher::encrypt(cipher_key, &iv, secret_bytes.as_slice())?;
        let mac = mac::compute(mac_key, &ciphertext);

        Ok(Self {
            address: Some(hex::encode(keypair.address())),
            crypto: CryptoParams {
                cipher: CIPHER_AES_128_CTR.to_string(),
                ciphertext: hex::encode(&ciphertext),
                cipherparams: CipherParams::new(&iv),
                kdf: KDF_SCRYPT.to_string(),
                kdfparams: KdfParams::Scrypt(ScryptParams::new(config, &salt)),
                mac: hex::encode(mac),
            },
            id: Some(Uuid::new_v4().to_string()),
            version: KEYSTORE_VERSION,
        })
    }

    /// Decrypt the record and return the secret key
    ///
    /// The MAC is verified before decryption; a wrong passphrase and a
    /// tampered record are indistinguishable by design, both failing
    /// with [`KeystoreError::AuthenticationFailed`].
    pub fn decrypt(&self, passphrase: &str) -> KeystoreResult<SecretKey> {
        if self.version != KEYSTORE_VERSION {
            return Err(KeystoreError::UnsupportedVersion(self.version));
        }
        if self.crypto.cipher != CIPHER_AES_128_CTR {
            return Err(KeystoreError::UnsupportedCipher(self.crypto.cipher.clone()));
        }
        if self.crypto.kdf != KDF_SCRYPT {
            return Err(KeystoreError::UnsupportedKdf(self.crypto.kdf.clone()));
        }
        let KdfParams::Scrypt(kdfparams) = &self.crypto.kdfparams else {
            return Err(KeystoreError::InvalidKdfParameters(
                "scrypt parameters missing or malformed".to_string(),
            ));
        };

        let derived = kdfparams.derive(passphrase)?;
        let (cipher_key, mac_key) = split_derived_key(derived.expose_secret())?;

        let ciphertext = self.ciphertext_bytes()?;
        let stored_mac = self.mac_bytes()?;

        // MAC check comes before any use of the plaintext
        mac::verify(mac_key, &ciphertext, &stored_mac)?;

        let iv = self.crypto.cipherparams.iv_bytes()?;
        let plaintext = cipher::decrypt(cipher_key, &iv, &ciphertext)?;

        let secret = secret_key_from_plaintext(plaintext.expose_secret())?;
        self.check_address(&secret)?;
        Ok(secret)
    }

    /// Cross-check the recovered key against the stored address
    ///
    /// The V3 MAC does not cover cipherparams, so a tampered IV decrypts
    /// to a wrong key without failing MAC verification. Records written
    /// by this engine always carry an address, which pins the plaintext;
    /// foreign records without one skip the check.
    fn check_address(&self, secret: &SecretKey) -> KeystoreResult<()> {
        let Some(stored) = self.parsed_address() else {
            return Ok(());
        };
        if secret.public_key().address() != stored {
            return Err(KeystoreError::AuthenticationFailed);
        }
        Ok(())
    }
}

/// Split a derived key into (cipher key, MAC key)
fn split_derived_key(dk: &[u8]) -> KeystoreResult<(&[u8], &[u8])> {
    if dk.len() < KEY_LENGTH + MAC_KEY_LENGTH {
        return Err(KeystoreError::InvalidKdfParameters(format!(
            "derived key must be at least {} bytes, got {}",
            KEY_LENGTH + MAC_KEY_LENGTH,
            dk.len()
        )));
    }
    Ok((&dk[..KEY_LENGTH], &dk[KEY_LENGTH..KEY_LENGTH + MAC_KEY_LENGTH]))
}

/// Rebuild the secret key from decrypted plaintext
///
/// The MAC has passed at this point, so a plaintext that is not a valid
/// 32-byte scalar means the record itself is inconsistent. Reported as
/// an authentication failure rather than leaking what was recovered.
fn secret_key_from_plaintext(plaintext: &[u8]) -> KeystoreResult<SecretKey> {
    let bytes: &[u8; SECRET_KEY_LENGTH] = plaintext
        .try_into()
        .map_err(|_| KeystoreError::AuthenticationFailed)?;
    SecretKey::from_bytes(bytes).map_err(|_| KeystoreError::AuthenticationFailed)
}
