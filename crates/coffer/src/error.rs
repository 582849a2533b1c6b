//! Error types for key generation and signing.

use thiserror::Error;

use crate::entropy::EntropyError;

/// Errors from keypair construction, address derivation, and signing.
#[derive(Debug, Error)]
pub enum CryptoError {
    /// Bytes are not a valid secp256k1 scalar (zero or at least the group
    /// order).
    #[error("invalid secret key: not a valid curve scalar")]
    InvalidSecretKey,

    /// Bytes do not encode a point on the curve.
    #[error("invalid public key encoding")]
    InvalidPublicKey,

    /// Bytes do not encode a valid ECDSA signature.
    #[error("invalid signature encoding")]
    InvalidSignature,

    /// The ECDSA primitive rejected the signing request.
    #[error("signing failed")]
    SigningFailed,

    /// The entropy source never produced a valid scalar within the redraw
    /// bound.
    #[error("entropy exhausted: no valid secret key after {attempts} attempts")]
    EntropyExhausted { attempts: u32 },

    /// The entropy source could not be read at all.
    #[error(transparent)]
    Entropy(#[from] EntropyError),
}
