//! Containers for secret byte material.
//!
//! Decrypted keys and derived key material travel as [`SecretBytes`]: the
//! contents are zeroized on drop and reachable only through
//! [`ExposeSecret::expose_secret`], so a stray `Debug` or log line cannot
//! leak them.

use secrecy::SecretBox;

pub use secrecy::ExposeSecret;

/// Zeroize-on-drop byte buffer for key material.
pub type SecretBytes = SecretBox<Vec<u8>>;

/// Conversion into a zeroize-on-drop secret container.
pub trait IntoSecret {
    fn into_secret(self) -> SecretBytes;
}

impl IntoSecret for Vec<u8> {
    fn into_secret(self) -> SecretBytes {
        SecretBox::new(Box::new(self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_output_is_redacted() {
        let secret = vec![0xde, 0xad, 0xbe, 0xef].into_secret();
        let rendered = format!("{:?}", secret);
        assert!(rendered.contains("REDACTED"));
        assert!(!rendered.contains("222"));
    }

    #[test]
    fn test_expose_returns_contents() {
        let secret = vec![9u8; 4].into_secret();
        assert_eq!(secret.expose_secret().as_slice(), &[9u8; 4]);
    }
}
