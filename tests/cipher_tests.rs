//! Integration tests for the PassVault cipher module.

use passvault::cipher::{
    derive_key_from_passphrase, generate_salt, AesGcmCipher, Argon2Params, Cipher, RotationCipher,
};
use passvault::errors::VaultError;

/// Cheap Argon2 params so the test suite stays fast.
fn test_params() -> Argon2Params {
    Argon2Params {
        memory_kib: 8_192,
        iterations: 1,
        parallelism: 1,
    }
}

// ---------------------------------------------------------------------------
// Rotation cipher
// ---------------------------------------------------------------------------

#[test]
fn rotation_roundtrip() {
    let cipher = RotationCipher::new();
    let input = "Ab3!def";

    let ciphertext = cipher.encrypt(input).expect("encrypt should succeed");
    assert_ne!(ciphertext, input.as_bytes(), "ciphertext must differ");

    let recovered = cipher.decrypt(&ciphertext).expect("decrypt should succeed");
    assert_eq!(recovered, input);
}

#[test]
fn rotation_roundtrip_over_whole_domain() {
    let cipher = RotationCipher::new();
    let all_printable: String = (0x20u8..=0x7E).map(|b| b as char).collect();

    let ciphertext = cipher.encrypt(&all_printable).unwrap();
    assert_eq!(cipher.decrypt(&ciphertext).unwrap(), all_printable);
}

#[test]
fn rotation_rejects_out_of_domain_plaintext() {
    let cipher = RotationCipher::new();

    let result = cipher.encrypt("tab\tcharacter");
    assert!(matches!(result, Err(VaultError::CipherDomain('\t'))));

    let result = cipher.encrypt("smörgås");
    assert!(matches!(result, Err(VaultError::CipherDomain(_))));
}

#[test]
fn rotation_rejects_out_of_domain_ciphertext() {
    let cipher = RotationCipher::new();
    let result = cipher.decrypt(&[0x10, 0x20, 0x30]);
    assert!(result.is_err(), "bytes below 0x20 are not valid ciphertext");
}

#[test]
fn rotation_instances_with_same_shift_are_interchangeable() {
    let a = RotationCipher::with_shift(41).unwrap();
    let b = RotationCipher::with_shift(41).unwrap();

    let ciphertext = a.encrypt("Xy9$abc").unwrap();
    assert_eq!(b.decrypt(&ciphertext).unwrap(), "Xy9$abc");
}

// ---------------------------------------------------------------------------
// AES-256-GCM cipher
// ---------------------------------------------------------------------------

#[test]
fn aes_gcm_roundtrip() {
    let cipher = AesGcmCipher::new(&[0xABu8; 32]);
    let input = "Ab3!def";

    let ciphertext = cipher.encrypt(input).expect("encrypt should succeed");

    // Ciphertext must be longer than plaintext (12-byte nonce + 16-byte tag).
    assert!(ciphertext.len() > input.len());

    assert_eq!(cipher.decrypt(&ciphertext).unwrap(), input);
}

#[test]
fn aes_gcm_produces_different_ciphertext_each_time() {
    let cipher = AesGcmCipher::new(&[0xCDu8; 32]);

    let ct1 = cipher.encrypt("same1!").expect("encrypt 1");
    let ct2 = cipher.encrypt("same1!").expect("encrypt 2");

    // Because each call generates a new random nonce, the output must differ.
    assert_ne!(ct1, ct2, "two encryptions of the same plaintext must differ");
}

#[test]
fn aes_gcm_rejects_out_of_domain_plaintext() {
    // Still a conforming strategy: the printable-ASCII domain applies.
    let cipher = AesGcmCipher::new(&[0x01u8; 32]);
    assert!(matches!(
        cipher.encrypt("Ab3!\u{7f}"),
        Err(VaultError::CipherDomain(_))
    ));
}

#[test]
fn aes_gcm_wrong_key_fails() {
    let cipher = AesGcmCipher::new(&[0x11u8; 32]);
    let wrong = AesGcmCipher::new(&[0x22u8; 32]);

    let ciphertext = cipher.encrypt("Top5ecret!").expect("encrypt");
    assert!(
        wrong.decrypt(&ciphertext).is_err(),
        "decryption with the wrong key must fail"
    );
}

#[test]
fn aes_gcm_truncated_data_fails() {
    // Anything shorter than 12 bytes (nonce length) should fail.
    let cipher = AesGcmCipher::new(&[0xAAu8; 32]);
    assert!(cipher.decrypt(&[0u8; 5]).is_err());
}

#[test]
fn aes_gcm_corrupted_ciphertext_fails() {
    let cipher = AesGcmCipher::new(&[0xBBu8; 32]);
    let mut ciphertext = cipher.encrypt("Val9&ue").expect("encrypt");

    // Flip a byte in the ciphertext portion (after the 12-byte nonce).
    if let Some(byte) = ciphertext.get_mut(15) {
        *byte ^= 0xFF;
    }

    assert!(
        cipher.decrypt(&ciphertext).is_err(),
        "corrupted ciphertext must fail the auth check"
    );
}

// ---------------------------------------------------------------------------
// Key derivation (Argon2id)
// ---------------------------------------------------------------------------

#[test]
fn derive_key_same_inputs_same_output() {
    let salt = generate_salt();

    let key1 = derive_key_from_passphrase(b"my-passphrase", &salt, &test_params()).expect("derive 1");
    let key2 = derive_key_from_passphrase(b"my-passphrase", &salt, &test_params()).expect("derive 2");

    assert_eq!(key1, key2, "same passphrase + salt must produce the same key");
}

#[test]
fn derive_key_different_salts_different_keys() {
    let salt1 = generate_salt();
    let salt2 = generate_salt();

    let key1 = derive_key_from_passphrase(b"same-passphrase", &salt1, &test_params()).unwrap();
    let key2 = derive_key_from_passphrase(b"same-passphrase", &salt2, &test_params()).unwrap();

    assert_ne!(key1, key2, "different salts must produce different keys");
}

#[test]
fn passphrase_cipher_roundtrip() {
    let salt = generate_salt();
    let cipher = AesGcmCipher::from_passphrase(b"vault passphrase", &salt, &test_params())
        .expect("build cipher");

    let ciphertext = cipher.encrypt("Qr7^stu").unwrap();
    assert_eq!(cipher.decrypt(&ciphertext).unwrap(), "Qr7^stu");
}
