//! Common utilities for keystore CLI commands

use anyhow::{anyhow, Context, Result};
use chrono::Utc;
use coffer::{KeyPair, KeystoreRecord, ScryptConfig};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use zeroize::Zeroizing;

/// Environment variable overriding the keystore directory
pub const KEYSTORE_DIR_ENV: &str = "COFFER_KEYSTORE_DIR";

/// Minimum passphrase length for newly created keystores
pub const MIN_PASSPHRASE_LENGTH: usize = 8;

/// Resolve the default keystore directory
///
/// Resolution order:
/// 1. `COFFER_KEYSTORE_DIR` environment variable (if set)
/// 2. `~/.coffer/keystores`
pub fn default_keystore_dir() -> PathBuf {
    if let Ok(dir) = std::env::var(KEYSTORE_DIR_ENV) {
        return PathBuf::from(dir);
    }

    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".coffer")
        .join("keystores")
}

/// Ensure the keystore directory exists with owner-only permissions
pub fn ensure_keystore_dir(dir: &Path) -> Result<()> {
    if !dir.exists() {
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create keystore directory: {}", dir.display()))?;

        // Restrict to owner on Unix
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let permissions = fs::Permissions::from_mode(0o700);
            fs::set_permissions(dir, permissions)
                .context("Failed to set keystore directory permissions")?;
        }
    }

    Ok(())
}

/// Read the passphrase from a file, or prompt for it interactively
pub fn get_passphrase(
    passphrase_file: Option<&Path>,
    prompt: &str,
    confirm: bool,
) -> Result<Zeroizing<String>> {
    if let Some(file) = passphrase_file {
        read_passphrase_from_file(file)
    } else {
        prompt_passphrase(prompt, confirm)
    }
}

/// Read a passphrase from a file, stripping trailing line endings
pub fn read_passphrase_from_file(path: &Path) -> Result<Zeroizing<String>> {
    let content = Zeroizing::new(
        fs::read_to_string(path)
            .with_context(|| format!("Failed to read passphrase file: {}", path.display()))?,
    );

    Ok(Zeroizing::new(
        content.trim_end_matches(['\r', '\n']).to_string(),
    ))
}

/// Prompt for a passphrase without echo, with optional confirmation
pub fn prompt_passphrase(prompt: &str, confirm: bool) -> Result<Zeroizing<String>> {
    let passphrase =
        Zeroizing::new(rpassword::prompt_password(prompt).context("Failed to read passphrase")?);

    if confirm {
        let confirmation = Zeroizing::new(
            rpassword::prompt_password("Confirm passphrase: ")
                .context("Failed to read passphrase confirmation")?,
        );

        if *passphrase != *confirmation {
            return Err(anyhow!("Passphrases do not match"));
        }
    }

    Ok(passphrase)
}

/// Enforce the passphrase policy for newly created keystores
///
/// Only applied when creating keystores; opening existing ones accepts
/// whatever passphrase they were encrypted under.
pub fn check_new_passphrase(passphrase: &str) -> Result<()> {
    if passphrase.len() < MIN_PASSPHRASE_LENGTH {
        return Err(anyhow!(
            "Passphrase must be at least {} characters",
            MIN_PASSPHRASE_LENGTH
        ));
    }

    Ok(())
}

/// Pick scrypt costs for new keystores
pub fn scrypt_config(light_kdf: bool) -> ScryptConfig {
    if light_kdf {
        ScryptConfig::light()
    } else {
        ScryptConfig::default()
    }
}

/// Default file name for a new keystore: `UTC--<timestamp>--<address>.json`
pub fn default_file_name(keypair: &KeyPair) -> String {
    format!(
        "UTC--{}--{}.json",
        Utc::now().format("%Y-%m-%dT%H-%M-%S%.9fZ"),
        hex::encode(keypair.address())
    )
}

/// Encrypt a key pair and write it into the keystore directory
///
/// Returns the path of the new file. Refuses to overwrite an existing
/// file.
pub fn write_new_keystore(
    keystore_dir: &Path,
    keypair: &KeyPair,
    passphrase: &str,
    config: &ScryptConfig,
) -> Result<PathBuf> {
    ensure_keystore_dir(keystore_dir)?;

    tracing::debug!(n = config.n, r = config.r, p = config.p, "scrypt costs");
    let record = KeystoreRecord::encrypt_with(keypair, passphrase, config)
        .context("Failed to encrypt key")?;
    let json = record.to_json_pretty()?;

    let path = keystore_dir.join(default_file_name(keypair));
    write_keystore_file(&path, json.as_bytes())?;

    tracing::debug!(path = %path.display(), "wrote keystore file");

    Ok(path)
}

/// Write a keystore file with owner-only permissions, never overwriting
pub fn write_keystore_file(path: &Path, contents: &[u8]) -> Result<()> {
    let mut options = fs::OpenOptions::new();
    options.write(true).create_new(true);

    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }

    let mut file = options
        .open(path)
        .with_context(|| format!("Failed to create keystore file: {}", path.display()))?;
    file.write_all(contents)
        .with_context(|| format!("Failed to write keystore file: {}", path.display()))?;

    Ok(())
}

/// Load and parse a keystore file
pub fn load_keystore(path: &Path) -> Result<KeystoreRecord> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("Failed to read keystore file: {}", path.display()))?;

    KeystoreRecord::from_json(&json)
        .with_context(|| format!("Failed to parse keystore file: {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_read_passphrase_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("passphrase.txt");

        fs::write(&path, "correct horse battery staple\n").unwrap();
        let passphrase = read_passphrase_from_file(&path).unwrap();
        assert_eq!(*passphrase, "correct horse battery staple");

        // Windows line endings are stripped too, inner whitespace kept
        fs::write(&path, "  spaced out  \r\n").unwrap();
        let passphrase = read_passphrase_from_file(&path).unwrap();
        assert_eq!(*passphrase, "  spaced out  ");
    }

    #[test]
    fn test_read_passphrase_missing_file() {
        let dir = TempDir::new().unwrap();
        let result = read_passphrase_from_file(&dir.path().join("nope.txt"));
        assert!(result.is_err());
    }

    #[test]
    fn test_check_new_passphrase() {
        assert!(check_new_passphrase("12345678").is_ok());
        assert!(check_new_passphrase("1234567").is_err());
        assert!(check_new_passphrase("").is_err());
    }

    #[test]
    fn test_scrypt_config_profiles() {
        assert_eq!(scrypt_config(false).n, 262144);
        assert_eq!(scrypt_config(true).n, 4096);
    }

    #[test]
    fn test_default_file_name() {
        let secret = [
            0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
            0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
            0x00, 0x00, 0x00, 0x01,
        ];
        let keypair = KeyPair::from_secret_bytes(&secret).unwrap();

        let name = default_file_name(&keypair);
        assert!(name.starts_with("UTC--"));
        assert!(name.ends_with("--7e5f4552091a69125d5dfcb7b8c2659029395bdf.json"));
    }

    #[test]
    fn test_ensure_keystore_dir_creates_missing() {
        let dir = TempDir::new().unwrap();
        let keystore_dir = dir.path().join("keystores");

        ensure_keystore_dir(&keystore_dir).unwrap();
        assert!(keystore_dir.is_dir());

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mode = fs::metadata(&keystore_dir).unwrap().permissions().mode();
            assert_eq!(mode & 0o777, 0o700);
        }

        // Idempotent on an existing directory
        ensure_keystore_dir(&keystore_dir).unwrap();
    }

    #[test]
    fn test_write_keystore_file_refuses_overwrite() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("keystore.json");

        write_keystore_file(&path, b"{}").unwrap();
        assert!(write_keystore_file(&path, b"{}").is_err());

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mode = fs::metadata(&path).unwrap().permissions().mode();
            assert_eq!(mode & 0o777, 0o600);
        }
    }
}
