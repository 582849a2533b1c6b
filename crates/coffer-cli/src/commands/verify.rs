//! Passphrase verification command implementation

use super::common::{get_passphrase, load_keystore};
use anyhow::Result;
use coffer::KeyPair;
use std::path::{Path, PathBuf};

/// Execute the verify command
pub fn execute(keystore: &Path, passphrase_file: Option<PathBuf>) -> Result<()> {
    let record = load_keystore(keystore)?;

    let passphrase = get_passphrase(passphrase_file.as_deref(), "Enter passphrase: ", false)?;

    let secret = record.decrypt(&passphrase)?;
    let keypair = KeyPair::from_secret_key(secret);

    println!("Keystore OK");
    println!();
    println!("  Address: {}", keypair.address());

    Ok(())
}
