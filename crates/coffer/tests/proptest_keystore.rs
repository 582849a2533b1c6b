//! Property-based tests for keystore encryption
//!
//! Uses proptest to verify the engine's invariants across many randomly
//! generated keys and passphrases. Cost parameters are kept low so the
//! scrypt work stays tolerable.

use coffer::{KeyPair, KeystoreRecord, ScryptConfig};
use proptest::prelude::*;

fn cheap_config() -> ScryptConfig {
    ScryptConfig {
        n: 1024,
        r: 8,
        p: 1,
        dklen: 32,
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))] // Reduced cases due to slow scrypt

    /// Property: Decrypt(Encrypt(k, p), p) == k
    #[test]
    fn prop_keystore_roundtrip(
        secret in prop::array::uniform32(any::<u8>()),
        passphrase in "[a-zA-Z0-9!@#$%^&*]{8,32}"
    ) {
        // Only valid curve scalars can be keys
        prop_assume!(coffer::SecretKey::from_bytes(&secret).is_ok());
        let keypair = KeyPair::from_secret_bytes(&secret).unwrap();

        let record = KeystoreRecord::encrypt_with(&keypair, &passphrase, &cheap_config())
            .expect("encryption should succeed");

        let decrypted = record.decrypt(&passphrase)
            .expect("decryption should succeed");

        prop_assert_eq!(*decrypted.to_bytes(), secret);
    }

    /// Property: a different passphrase never decrypts
    #[test]
    fn prop_wrong_passphrase_fails(
        passphrase1 in "[a-zA-Z]{8,16}",
        passphrase2 in "[0-9]{8,16}"
    ) {
        // Ensure passphrases are different (disjoint alphabets anyway)
        prop_assume!(passphrase1 != passphrase2);

        let keypair = KeyPair::generate().unwrap();
        let record = KeystoreRecord::encrypt_with(&keypair, &passphrase1, &cheap_config())
            .expect("encryption should succeed");

        let result = record.decrypt(&passphrase2);
        prop_assert!(result.is_err(), "decryption with wrong passphrase should fail");
    }

    /// Property: the JSON codec round-trips every record it writes
    #[test]
    fn prop_codec_roundtrip(passphrase in "[ -~]{1,24}") {
        let keypair = KeyPair::generate().unwrap();
        let record = KeystoreRecord::encrypt_with(&keypair, &passphrase, &cheap_config())
            .expect("encryption should succeed");

        let compact = KeystoreRecord::from_json(&record.to_json().unwrap()).unwrap();
        prop_assert_eq!(&record, &compact);

        let pretty = KeystoreRecord::from_json(&record.to_json_pretty().unwrap()).unwrap();
        prop_assert_eq!(&record, &pretty);
    }

    /// Property: encrypting twice never reuses salt, IV, or ciphertext
    #[test]
    fn prop_fresh_records_never_repeat(passphrase in "[a-z]{8,16}") {
        let keypair = KeyPair::generate().unwrap();

        let record1 = KeystoreRecord::encrypt_with(&keypair, &passphrase, &cheap_config()).unwrap();
        let record2 = KeystoreRecord::encrypt_with(&keypair, &passphrase, &cheap_config()).unwrap();

        prop_assert_ne!(&record1.crypto.kdfparams, &record2.crypto.kdfparams);
        prop_assert_ne!(&record1.crypto.cipherparams.iv, &record2.crypto.cipherparams.iv);
        prop_assert_ne!(&record1.crypto.ciphertext, &record2.crypto.ciphertext);
        prop_assert_ne!(&record1.crypto.mac, &record2.crypto.mac);

        // both decrypt to the same key regardless
        let secret1 = record1.decrypt(&passphrase).unwrap();
        let secret2 = record2.decrypt(&passphrase).unwrap();
        prop_assert_eq!(*secret1.to_bytes(), *secret2.to_bytes());
    }
}
