//! Integration-level unit tests for the CryptoService public API.
//!
//! Exercises the service through its trait interface: round-trip sealing,
//! key handling, and input validation.

use ptdash::services::crypto_service::{CryptoService, CryptoServiceTrait};

#[test]
fn test_encrypt_decrypt_round_trip() {
    let service = CryptoService::new();
    let salt = service.generate_salt();
    let key = service.derive_key("store passphrase", &salt).unwrap();

    let plaintext = b"MoviePilot=abc123";
    let encrypted = service.encrypt_aes256gcm(plaintext, &key).unwrap();
    let decrypted = service.decrypt_aes256gcm(&encrypted, &key).unwrap();

    assert_eq!(decrypted, plaintext);
}

#[test]
fn test_decryption_with_wrong_key_fails() {
    let service = CryptoService::new();
    let salt = service.generate_salt();
    let correct_key = service.derive_key("correct", &salt).unwrap();
    let wrong_key = service.derive_key("wrong", &salt).unwrap();

    let encrypted = service.encrypt_aes256gcm(b"secret", &correct_key).unwrap();
    assert!(service.decrypt_aes256gcm(&encrypted, &wrong_key).is_err());
}

#[test]
fn test_same_plaintext_yields_fresh_ciphertext() {
    // A random nonce per operation means re-encrypting the same value must
    // not produce the same bytes.
    let service = CryptoService::new();
    let salt = service.generate_salt();
    let key = service.derive_key("passphrase", &salt).unwrap();

    let a = service.encrypt_aes256gcm(b"token", &key).unwrap();
    let b = service.encrypt_aes256gcm(b"token", &key).unwrap();

    assert_ne!(a.iv, b.iv);
    assert_ne!(a.ciphertext, b.ciphertext);
}

#[test]
fn test_encrypt_rejects_short_key() {
    let service = CryptoService::new();
    let short_key = vec![0u8; 16];
    assert!(service.encrypt_aes256gcm(b"data", &short_key).is_err());
}

#[test]
fn test_tampered_ciphertext_fails_decryption() {
    let service = CryptoService::new();
    let salt = service.generate_salt();
    let key = service.derive_key("passphrase", &salt).unwrap();

    let mut encrypted = service.encrypt_aes256gcm(b"payload", &key).unwrap();
    if let Some(byte) = encrypted.ciphertext.first_mut() {
        *byte ^= 0xff;
    }

    assert!(service.decrypt_aes256gcm(&encrypted, &key).is_err());
}

#[test]
fn test_generated_salts_differ() {
    let service = CryptoService::new();
    assert_ne!(service.generate_salt(), service.generate_salt());
}
