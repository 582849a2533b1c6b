//! secp256k1 account keys with Ethereum-style addresses
//!
//! This module provides:
//! - Key generation by rejection sampling over raw entropy draws
//! - Address derivation (keccak256(uncompressed_pubkey[1..])[12..])
//! - ECDSA signing and verification over keccak-256 digests
//!
//! Uses the k256 crate for secp256k1 curve operations.

use alloy_primitives::{keccak256, Address};
use k256::{
    ecdsa::{
        signature::hazmat::{PrehashSigner, PrehashVerifier},
        Signature as K256Signature, SigningKey, VerifyingKey,
    },
    elliptic_curve::sec1::ToEncodedPoint,
    SecretKey as K256SecretKey,
};
use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};
use zeroize::Zeroizing;

use crate::entropy::EntropyError;
use crate::error::CryptoError;

/// Raw secret key length (32 bytes scalar).
pub const SECRET_KEY_LENGTH: usize = 32;
/// Compressed SEC1 public key length.
pub const PUBLIC_KEY_LENGTH: usize = 33;
/// Uncompressed SEC1 public key length (with 0x04 prefix).
pub const UNCOMPRESSED_PUBLIC_KEY_LENGTH: usize = 65;
/// Compact ECDSA signature length (r || s).
pub const SIGNATURE_LENGTH: usize = 64;

/// Redraw bound for key generation. An honest entropy source rejects a
/// draw with probability below 2^-127, so reaching this bound means the
/// source is handing out a stuck or out-of-range stream.
const MAX_GENERATION_ATTEMPTS: u32 = 64;

/// Secp256k1 secret key (32 bytes scalar)
pub struct SecretKey(K256SecretKey);

impl SecretKey {
    /// Generate a new secret key from OS entropy
    pub fn generate() -> Result<Self, CryptoError> {
        Self::generate_with(&mut OsRng)
    }

    /// Generate a new secret key from the supplied RNG
    ///
    /// Draws 32-byte candidates and accepts the first that is a valid
    /// curve scalar (nonzero, below the group order), redrawing otherwise.
    /// Fails with [`CryptoError::EntropyExhausted`] once the redraw bound
    /// is hit.
    pub fn generate_with<R: CryptoRng + RngCore>(rng: &mut R) -> Result<Self, CryptoError> {
        for _ in 0..MAX_GENERATION_ATTEMPTS {
            let mut candidate = Zeroizing::new([0u8; SECRET_KEY_LENGTH]);
            rng.try_fill_bytes(candidate.as_mut_slice())
                .map_err(EntropyError::from)?;
            if let Ok(sk) = K256SecretKey::from_slice(candidate.as_slice()) {
                return Ok(Self(sk));
            }
        }
        Err(CryptoError::EntropyExhausted {
            attempts: MAX_GENERATION_ATTEMPTS,
        })
    }

    /// Load from raw bytes (32 bytes scalar)
    pub fn from_bytes(bytes: &[u8; SECRET_KEY_LENGTH]) -> Result<Self, CryptoError> {
        K256SecretKey::from_slice(bytes)
            .map(Self)
            .map_err(|_| CryptoError::InvalidSecretKey)
    }

    /// Serialize to bytes (32 bytes scalar), zeroized on drop
    pub fn to_bytes(&self) -> Zeroizing<[u8; SECRET_KEY_LENGTH]> {
        Zeroizing::new(self.0.to_bytes().into())
    }

    /// Get the corresponding public key
    pub fn public_key(&self) -> PublicKey {
        PublicKey(self.0.public_key())
    }

    /// Sign a message (hashed internally with keccak-256)
    ///
    /// The returned signature is low-s normalized.
    pub fn sign(&self, msg: &[u8]) -> Result<Signature, CryptoError> {
        let signing_key = SigningKey::from(&self.0);
        let digest = keccak256(msg);
        let sig: K256Signature = signing_key
            .sign_prehash(digest.as_slice())
            .map_err(|_| CryptoError::SigningFailed)?;
        let sig = sig.normalize_s().unwrap_or(sig);
        Ok(Signature(sig))
    }
}

impl std::fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SecretKey")
            .field("bytes", &"[REDACTED]")
            .finish()
    }
}

/// Secp256k1 public key
#[derive(Clone, PartialEq, Eq)]
pub struct PublicKey(k256::PublicKey);

impl PublicKey {
    /// Load from compressed bytes (33 bytes)
    pub fn from_bytes(bytes: &[u8; PUBLIC_KEY_LENGTH]) -> Result<Self, CryptoError> {
        k256::PublicKey::from_sec1_bytes(bytes)
            .map(Self)
            .map_err(|_| CryptoError::InvalidPublicKey)
    }

    /// Load from uncompressed bytes (65 bytes, with 0x04 prefix)
    pub fn from_uncompressed_bytes(
        bytes: &[u8; UNCOMPRESSED_PUBLIC_KEY_LENGTH],
    ) -> Result<Self, CryptoError> {
        k256::PublicKey::from_sec1_bytes(bytes)
            .map(Self)
            .map_err(|_| CryptoError::InvalidPublicKey)
    }

    /// Serialize to compressed bytes (33 bytes)
    pub fn to_bytes(&self) -> [u8; PUBLIC_KEY_LENGTH] {
        let encoded = self.0.to_encoded_point(true);
        let mut result = [0u8; PUBLIC_KEY_LENGTH];
        result.copy_from_slice(encoded.as_bytes());
        result
    }

    /// Serialize to uncompressed bytes (65 bytes, with 0x04 prefix)
    pub fn to_uncompressed_bytes(&self) -> [u8; UNCOMPRESSED_PUBLIC_KEY_LENGTH] {
        let encoded = self.0.to_encoded_point(false);
        let mut result = [0u8; UNCOMPRESSED_PUBLIC_KEY_LENGTH];
        result.copy_from_slice(encoded.as_bytes());
        result
    }

    /// Derive the account address from this public key
    ///
    /// Uses keccak256(uncompressed_pubkey[1..])[12..] (Ethereum address
    /// format, 20 bytes).
    pub fn address(&self) -> Address {
        let uncompressed = self.to_uncompressed_bytes();
        // Skip the 0x04 prefix byte
        let hash = keccak256(&uncompressed[1..]);
        Address::from_slice(&hash[12..])
    }

    /// Verify a signature (message hashed internally with keccak-256)
    pub fn verify(&self, msg: &[u8], sig: &Signature) -> bool {
        let verifying_key = VerifyingKey::from(&self.0);
        let digest = keccak256(msg);
        verifying_key.verify_prehash(digest.as_slice(), &sig.0).is_ok()
    }
}

impl std::fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let bytes = self.to_bytes();
        write!(f, "PublicKey({})", hex::encode(&bytes[..8]))
    }
}

/// Secp256k1 ECDSA signature (64 bytes: r || s)
#[derive(Clone)]
pub struct Signature(K256Signature);

impl Signature {
    /// Load from bytes (64 bytes: r || s)
    pub fn from_bytes(bytes: &[u8; SIGNATURE_LENGTH]) -> Result<Self, CryptoError> {
        K256Signature::from_slice(bytes)
            .map(Self)
            .map_err(|_| CryptoError::InvalidSignature)
    }

    /// Serialize to bytes (64 bytes: r || s)
    pub fn to_bytes(&self) -> [u8; SIGNATURE_LENGTH] {
        self.0.to_bytes().into()
    }

    /// Verify signature against public key
    pub fn verify(&self, msg: &[u8], pubkey: &PublicKey) -> bool {
        pubkey.verify(msg, self)
    }
}

impl std::fmt::Debug for Signature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let bytes = self.to_bytes();
        write!(f, "Signature({})", hex::encode(&bytes[..8]))
    }
}

impl PartialEq for Signature {
    fn eq(&self, other: &Self) -> bool {
        self.to_bytes() == other.to_bytes()
    }
}

impl Eq for Signature {}

/// Secp256k1 key pair (convenience wrapper)
pub struct KeyPair {
    pub secret_key: SecretKey,
    pub public_key: PublicKey,
}

impl KeyPair {
    /// Generate a new key pair from OS entropy
    pub fn generate() -> Result<Self, CryptoError> {
        Ok(Self::from_secret_key(SecretKey::generate()?))
    }

    /// Generate a new key pair from the supplied RNG
    pub fn generate_with<R: CryptoRng + RngCore>(rng: &mut R) -> Result<Self, CryptoError> {
        Ok(Self::from_secret_key(SecretKey::generate_with(rng)?))
    }

    /// Create from secret key
    pub fn from_secret_key(secret_key: SecretKey) -> Self {
        let public_key = secret_key.public_key();
        Self {
            secret_key,
            public_key,
        }
    }

    /// Create from raw secret key bytes
    pub fn from_secret_bytes(bytes: &[u8; SECRET_KEY_LENGTH]) -> Result<Self, CryptoError> {
        Ok(Self::from_secret_key(SecretKey::from_bytes(bytes)?))
    }

    /// Sign a message
    pub fn sign(&self, msg: &[u8]) -> Result<Signature, CryptoError> {
        self.secret_key.sign(msg)
    }

    /// Get the account address derived from this key pair
    pub fn address(&self) -> Address {
        self.public_key.address()
    }
}

impl std::fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyPair")
            .field("public_key", &self.public_key)
            .field("address", &self.address())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// RNG that hands out the same byte forever.
    struct ConstRng(u8);

    impl RngCore for ConstRng {
        fn next_u32(&mut self) -> u32 {
            u32::from_ne_bytes([self.0; 4])
        }

        fn next_u64(&mut self) -> u64 {
            u64::from_ne_bytes([self.0; 8])
        }

        fn fill_bytes(&mut self, dest: &mut [u8]) {
            dest.fill(self.0);
        }

        fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
            self.fill_bytes(dest);
            Ok(())
        }
    }

    impl CryptoRng for ConstRng {}

    /// RNG whose fallible path always fails.
    struct BrokenRng;

    impl RngCore for BrokenRng {
        fn next_u32(&mut self) -> u32 {
            0
        }

        fn next_u64(&mut self) -> u64 {
            0
        }

        fn fill_bytes(&mut self, _dest: &mut [u8]) {}

        fn try_fill_bytes(&mut self, _dest: &mut [u8]) -> Result<(), rand::Error> {
            Err(rand::Error::new("no entropy"))
        }
    }

    impl CryptoRng for BrokenRng {}

    #[test]
    fn test_key_generation() {
        let keypair = KeyPair::generate().unwrap();
        let bytes = keypair.secret_key.to_bytes();
        let restored = SecretKey::from_bytes(&bytes).unwrap();
        assert_eq!(*keypair.secret_key.to_bytes(), *restored.to_bytes());
    }

    #[test]
    fn test_generate_accepts_first_valid_draw() {
        let mut rng = ConstRng(7);
        let keypair = KeyPair::generate_with(&mut rng).unwrap();
        assert_eq!(*keypair.secret_key.to_bytes(), [7u8; SECRET_KEY_LENGTH]);
    }

    #[test]
    fn test_stuck_entropy_source_is_detected() {
        // all-zero candidates are never valid scalars
        let mut rng = ConstRng(0);
        match KeyPair::generate_with(&mut rng) {
            Err(CryptoError::EntropyExhausted { attempts }) => assert_eq!(attempts, 64),
            other => panic!("expected exhaustion, got {:?}", other),
        }

        // all-0xff candidates sit above the group order
        let mut rng = ConstRng(0xff);
        assert!(matches!(
            KeyPair::generate_with(&mut rng),
            Err(CryptoError::EntropyExhausted { .. })
        ));
    }

    #[test]
    fn test_unavailable_entropy_surfaces() {
        match KeyPair::generate_with(&mut BrokenRng) {
            Err(CryptoError::Entropy(_)) => {}
            other => panic!("expected entropy failure, got {:?}", other),
        }
    }

    #[test]
    fn test_zero_key_rejected() {
        assert!(matches!(
            SecretKey::from_bytes(&[0u8; SECRET_KEY_LENGTH]),
            Err(CryptoError::InvalidSecretKey)
        ));
    }

    #[test]
    fn test_group_order_rejected() {
        // the secp256k1 group order itself is out of range
        let order: [u8; SECRET_KEY_LENGTH] =
            hex::decode("fffffffffffffffffffffffffffffffebaaedce6af48a03bbfd25e8cd0364141")
                .unwrap()
                .try_into()
                .unwrap();
        assert!(matches!(
            SecretKey::from_bytes(&order),
            Err(CryptoError::InvalidSecretKey)
        ));
    }

    #[test]
    fn test_sign_verify() {
        let keypair = KeyPair::generate().unwrap();
        let msg = b"test message";
        let sig = keypair.sign(msg).unwrap();
        assert!(keypair.public_key.verify(msg, &sig));
    }

    #[test]
    fn test_wrong_message_fails() {
        let keypair = KeyPair::generate().unwrap();
        let sig = keypair.sign(b"correct message").unwrap();
        assert!(!keypair.public_key.verify(b"wrong message", &sig));
    }

    #[test]
    fn test_wrong_key_fails() {
        let keypair1 = KeyPair::generate().unwrap();
        let keypair2 = KeyPair::generate().unwrap();
        let msg = b"test message";
        let sig = keypair1.sign(msg).unwrap();
        assert!(!keypair2.public_key.verify(msg, &sig));
    }

    #[test]
    fn test_signature_serialization() {
        let keypair = KeyPair::generate().unwrap();
        let sig = keypair.sign(b"test").unwrap();
        let restored = Signature::from_bytes(&sig.to_bytes()).unwrap();
        assert_eq!(sig, restored);
    }

    #[test]
    fn test_address_derivation() {
        let keypair = KeyPair::generate().unwrap();
        let addr = keypair.address();

        // deterministic
        assert_eq!(addr, keypair.public_key.address());

        // distinct keys, distinct addresses
        let keypair2 = KeyPair::generate().unwrap();
        assert_ne!(addr, keypair2.address());

        assert_eq!(addr.len(), 20);
    }

    #[test]
    fn test_address_known_vector() {
        // Private key 0x...01 owns 0x7E5F4552091A69125d5DfCb7b8C2659029395Bdf
        let mut secret_bytes = [0u8; SECRET_KEY_LENGTH];
        secret_bytes[31] = 1;
        let keypair = KeyPair::from_secret_bytes(&secret_bytes).unwrap();

        let expected =
            Address::from_slice(&hex::decode("7E5F4552091A69125d5DfCb7b8C2659029395Bdf").unwrap());
        assert_eq!(keypair.address(), expected);
    }

    #[test]
    fn test_uncompressed_bytes() {
        let keypair = KeyPair::generate().unwrap();
        let uncompressed = keypair.public_key.to_uncompressed_bytes();

        assert_eq!(uncompressed[0], 0x04);
        assert_eq!(uncompressed.len(), 65);

        let restored = PublicKey::from_uncompressed_bytes(&uncompressed).unwrap();
        assert_eq!(keypair.public_key, restored);
    }

    #[test]
    fn test_debug_never_prints_secret() {
        let mut secret_bytes = [0u8; SECRET_KEY_LENGTH];
        secret_bytes[31] = 0x42;
        let keypair = KeyPair::from_secret_bytes(&secret_bytes).unwrap();

        let debug_out = format!("{:?} {:?}", keypair, keypair.secret_key);
        assert!(debug_out.contains("[REDACTED]"));
        assert!(!debug_out.contains(&hex::encode(secret_bytes)));
    }
}
