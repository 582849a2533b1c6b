//! Secure randomness with an explicit failure surface.
//!
//! Every random draw in this crate funnels through here. There is no
//! fallback source: if the operating system CSPRNG cannot be read, callers
//! get an error instead of weaker randomness.

use rand::rngs::OsRng;
use rand::RngCore;
use thiserror::Error;

/// The secure random source could not produce bytes.
#[derive(Debug, Error)]
pub enum EntropyError {
    #[error("secure random source unavailable: {0}")]
    Unavailable(#[from] rand::Error),
}

/// Fills `buf` with cryptographically secure random bytes.
pub fn fill_random(buf: &mut [u8]) -> Result<(), EntropyError> {
    OsRng.try_fill_bytes(buf)?;
    Ok(())
}

/// Returns `N` cryptographically secure random bytes.
pub fn random_bytes<const N: usize>() -> Result<[u8; N], EntropyError> {
    let mut buf = [0u8; N];
    fill_random(&mut buf)?;
    Ok(buf)
}
