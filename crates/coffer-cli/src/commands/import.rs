//! Private key import command implementation

use super::common::{check_new_passphrase, get_passphrase, scrypt_config, write_new_keystore};
use anyhow::{anyhow, Context, Result};
use coffer::{KeyPair, SECRET_KEY_LENGTH};
use std::fs;
use std::path::{Path, PathBuf};
use zeroize::Zeroizing;

/// Execute the import command
pub fn execute(
    keystore_dir: &Path,
    keyfile: &Path,
    light_kdf: bool,
    passphrase_file: Option<PathBuf>,
) -> Result<()> {
    let keypair = read_keyfile(keyfile)?;

    let passphrase = get_passphrase(
        passphrase_file.as_deref(),
        "Enter passphrase for the imported keystore: ",
        passphrase_file.is_none(),
    )?;
    check_new_passphrase(&passphrase)?;

    let config = scrypt_config(light_kdf);
    let path = write_new_keystore(keystore_dir, &keypair, &passphrase, &config)?;

    println!();
    println!("Account imported!");
    println!();
    println!("  Address:  {}", keypair.address());
    println!("  Keystore: {}", path.display());
    println!();
    println!("Delete the plaintext key file once you have verified the keystore:");
    println!("  coffer verify {}", path.display());

    Ok(())
}

/// Read a hex-encoded private key from a file
fn read_keyfile(path: &Path) -> Result<KeyPair> {
    let content = Zeroizing::new(
        fs::read_to_string(path)
            .with_context(|| format!("Failed to read key file: {}", path.display()))?,
    );

    let hex_str = content.trim();
    let hex_str = hex_str.strip_prefix("0x").unwrap_or(hex_str);

    let bytes =
        Zeroizing::new(hex::decode(hex_str).map_err(|_| anyhow!("Key file is not valid hex"))?);

    let secret: &[u8; SECRET_KEY_LENGTH] = bytes.as_slice().try_into().map_err(|_| {
        anyhow!(
            "Private key must be {} bytes, got {}",
            SECRET_KEY_LENGTH,
            bytes.len()
        )
    })?;

    KeyPair::from_secret_bytes(secret)
        .map_err(|_| anyhow!("Key file does not contain a valid secp256k1 private key"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_read_keyfile_accepts_prefixed_hex() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("key.txt");

        fs::write(
            &path,
            "0x0000000000000000000000000000000000000000000000000000000000000001\n",
        )
        .unwrap();

        let keypair = read_keyfile(&path).unwrap();
        assert_eq!(
            hex::encode(keypair.address()),
            "7e5f4552091a69125d5dfcb7b8c2659029395bdf"
        );
    }

    #[test]
    fn test_read_keyfile_accepts_bare_hex() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("key.txt");

        fs::write(
            &path,
            "0000000000000000000000000000000000000000000000000000000000000001",
        )
        .unwrap();

        assert!(read_keyfile(&path).is_ok());
    }

    #[test]
    fn test_read_keyfile_rejects_bad_input() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("key.txt");

        fs::write(&path, "not hex at all").unwrap();
        assert!(read_keyfile(&path).is_err());

        fs::write(&path, "deadbeef").unwrap();
        assert!(read_keyfile(&path).is_err());

        // All-zero key is valid hex of the right length but not a valid key
        fs::write(&path, "00".repeat(SECRET_KEY_LENGTH)).unwrap();
        assert!(read_keyfile(&path).is_err());
    }
}
