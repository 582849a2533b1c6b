//! Keystore export command implementation
//!
//! Prints public account details by default; the private key only with
//! an explicit flag.

use super::common::{get_passphrase, load_keystore};
use anyhow::Result;
use coffer::KeyPair;
use std::path::{Path, PathBuf};
use zeroize::Zeroizing;

/// Execute the export command
pub fn execute(keystore: &Path, passphrase_file: Option<PathBuf>, show_secret: bool) -> Result<()> {
    let record = load_keystore(keystore)?;

    let passphrase = get_passphrase(passphrase_file.as_deref(), "Enter passphrase: ", false)?;

    let secret = record.decrypt(&passphrase)?;
    let keypair = KeyPair::from_secret_key(secret);

    println!("  Address:     {}", keypair.address());
    println!(
        "  Public key:  0x{}",
        hex::encode(keypair.public_key.to_bytes())
    );

    if show_secret {
        let secret_bytes = keypair.secret_key.to_bytes();
        let secret_hex = Zeroizing::new(hex::encode(secret_bytes.as_slice()));

        eprintln!();
        eprintln!("WARNING: anyone holding the following key controls the account.");
        println!("  Private key: 0x{}", *secret_hex);
    }

    Ok(())
}
