//! Keystore inspection command implementation
//!
//! Shows public metadata only and never asks for a passphrase.

use super::common::load_keystore;
use anyhow::Result;
use coffer::KdfParams;
use std::path::Path;

/// Execute the inspect command
pub fn execute(keystore: &Path) -> Result<()> {
    let record = load_keystore(keystore)?;

    println!("Keystore: {}", keystore.display());
    println!();
    println!("  Version: {}", record.version);

    match record.parsed_address() {
        Some(address) => println!("  Address: {}", address),
        None => println!("  Address: (not recorded)"),
    }

    println!("  Cipher:  {}", record.crypto.cipher);
    println!("  KDF:     {}", record.crypto.kdf);

    match &record.crypto.kdfparams {
        KdfParams::Scrypt(params) => {
            println!(
                "  Costs:   n={} r={} p={} dklen={}",
                params.n, params.r, params.p, params.dklen
            );
        }
        KdfParams::Foreign(_) => {
            println!("  Costs:   (parameters for an unsupported KDF)");
        }
    }

    if let Some(id) = &record.id {
        println!("  Id:      {}", id);
    }

    Ok(())
}
