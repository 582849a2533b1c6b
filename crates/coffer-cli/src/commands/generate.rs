//! Account generation command implementation

use super::common::{check_new_passphrase, get_passphrase, scrypt_config, write_new_keystore};
use anyhow::{Context, Result};
use coffer::KeyPair;
use std::path::{Path, PathBuf};

/// Execute the generate command
pub fn execute(
    keystore_dir: &Path,
    light_kdf: bool,
    passphrase_file: Option<PathBuf>,
) -> Result<()> {
    let passphrase = get_passphrase(
        passphrase_file.as_deref(),
        "Enter passphrase for the new keystore: ",
        passphrase_file.is_none(), // Only confirm when prompting
    )?;
    check_new_passphrase(&passphrase)?;

    let keypair = KeyPair::generate().context("Failed to generate key pair")?;
    let config = scrypt_config(light_kdf);

    if light_kdf {
        println!(
            "Using light scrypt costs (n={}); not suitable for real funds.",
            config.n
        );
    }

    let path = write_new_keystore(keystore_dir, &keypair, &passphrase, &config)?;

    println!();
    println!("New account created!");
    println!();
    println!("  Address:  {}", keypair.address());
    println!("  Keystore: {}", path.display());
    println!();
    println!("Remember your passphrase. Without it the key cannot be recovered.");

    Ok(())
}
