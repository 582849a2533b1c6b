//! Keystore CLI commands
//!
//! This module provides command-line subcommands for keystore management:
//! - `generate`: Create a new account key inside an encrypted keystore
//! - `import`: Encrypt an existing raw private key into a keystore
//! - `inspect`: Show public keystore metadata without a passphrase
//! - `verify`: Check that a passphrase opens a keystore
//! - `export`: Decrypt a keystore and print account details
//!
//! # Security
//!
//! - Private keys are stored in passphrase-encrypted V3 keystore files
//! - Passphrases are read without echo when prompted interactively
//! - Keystore files and directories are created with owner-only permissions
//! - Secret material is wiped from memory when it goes out of scope

pub mod common;
pub mod export;
pub mod generate;
pub mod import;
pub mod inspect;
pub mod verify;

use anyhow::Result;
use clap::Subcommand;
use std::path::{Path, PathBuf};

/// Keystore management subcommands
#[derive(Subcommand)]
pub enum Command {
    /// Generate a new account key into an encrypted keystore
    ///
    /// Creates a fresh secp256k1 key pair, encrypts the private key under
    /// a passphrase, and writes a V3 keystore file into the keystore
    /// directory. The passphrase is asked for twice unless it is read from
    /// a file.
    Generate {
        /// Use light scrypt costs (faster, weaker; for test setups)
        #[arg(long)]
        light_kdf: bool,

        /// Read the passphrase from a file instead of prompting
        #[arg(long)]
        passphrase_file: Option<PathBuf>,
    },

    /// Import a raw private key into an encrypted keystore
    ///
    /// Reads a hex-encoded secp256k1 private key (with or without a 0x
    /// prefix) from the given file, encrypts it under a passphrase, and
    /// writes a V3 keystore file. Delete the plaintext key file after a
    /// successful import.
    Import {
        /// File containing the hex-encoded private key
        keyfile: PathBuf,

        /// Use light scrypt costs (faster, weaker; for test setups)
        #[arg(long)]
        light_kdf: bool,

        /// Read the passphrase from a file instead of prompting
        #[arg(long)]
        passphrase_file: Option<PathBuf>,
    },

    /// Show public metadata of a keystore file
    ///
    /// Prints the version, address, cipher, and KDF parameters. Does not
    /// ask for a passphrase and never touches key material.
    Inspect {
        /// Path to the keystore file
        keystore: PathBuf,
    },

    /// Verify that a passphrase opens a keystore
    ///
    /// Decrypts the keystore and reports the account address on success.
    /// The failure message does not reveal whether the passphrase was
    /// wrong or the file corrupted.
    Verify {
        /// Path to the keystore file
        keystore: PathBuf,

        /// Read the passphrase from a file instead of prompting
        #[arg(long)]
        passphrase_file: Option<PathBuf>,
    },

    /// Decrypt a keystore and print account details
    ///
    /// Prints the address and public key by default. The raw private key
    /// is only printed when --show-secret is given explicitly.
    Export {
        /// Path to the keystore file
        keystore: PathBuf,

        /// Read the passphrase from a file instead of prompting
        #[arg(long)]
        passphrase_file: Option<PathBuf>,

        /// Print the raw private key hex (handle with care)
        #[arg(long)]
        show_secret: bool,
    },
}

/// Execute a keystore command
pub fn execute(keystore_dir: &Path, command: Command) -> Result<()> {
    match command {
        Command::Generate {
            light_kdf,
            passphrase_file,
        } => generate::execute(keystore_dir, light_kdf, passphrase_file),
        Command::Import {
            keyfile,
            light_kdf,
            passphrase_file,
        } => import::execute(keystore_dir, &keyfile, light_kdf, passphrase_file),
        Command::Inspect { keystore } => inspect::execute(&keystore),
        Command::Verify {
            keystore,
            passphrase_file,
        } => verify::execute(&keystore, passphrase_file),
        Command::Export {
            keystore,
            passphrase_file,
            show_secret,
        } => export::execute(&keystore, passphrase_file, show_secret),
    }
}
