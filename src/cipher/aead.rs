//! AES-256-GCM cipher strategy.
//!
//! A stronger drop-in alternative to the rotation cipher.  Each call to
//! `encrypt` generates a fresh random 12-byte nonce and prepends it to
//! the ciphertext.  `decrypt` splits the nonce back out before
//! decrypting.
//!
//! Layout of the returned byte buffer:
//!   [ 12-byte nonce | ciphertext + 16-byte auth tag ]
//!
//! The printable-ASCII plaintext domain still applies so the strategy
//! stays interchangeable with the rotation cipher.

use aes_gcm::aead::{Aead, KeyInit, OsRng};
use aes_gcm::{AeadCore, Aes256Gcm, Key, Nonce};
use zeroize::Zeroize;

use crate::errors::{Result, VaultError};

use super::kdf::{derive_key_from_passphrase, Argon2Params, KEY_LEN};
use super::{check_domain, Cipher};

/// Size of the AES-256-GCM nonce in bytes.
const NONCE_LEN: usize = 12;

/// AES-256-GCM implementation of the `Cipher` trait.
pub struct AesGcmCipher {
    cipher: Aes256Gcm,
}

impl AesGcmCipher {
    /// Build a cipher from a raw 32-byte key.
    pub fn new(key: &[u8; KEY_LEN]) -> Self {
        let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(key));
        Self { cipher }
    }

    /// Build a cipher whose key is derived from a passphrase and salt
    /// with Argon2id.  The derived key is zeroized once the cipher is
    /// constructed.
    pub fn from_passphrase(
        passphrase: &[u8],
        salt: &[u8],
        params: &Argon2Params,
    ) -> Result<Self> {
        let mut key = derive_key_from_passphrase(passphrase, salt, params)?;
        let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(&key));
        key.zeroize();
        Ok(Self { cipher })
    }
}

impl Cipher for AesGcmCipher {
    fn encrypt(&self, plaintext: &str) -> Result<Vec<u8>> {
        check_domain(plaintext)?;

        // Generate a random 12-byte nonce.
        let nonce = Aes256Gcm::generate_nonce(&mut OsRng);

        // Encrypt and authenticate the plaintext.
        let ciphertext = self
            .cipher
            .encrypt(&nonce, plaintext.as_bytes())
            .map_err(|e| VaultError::EncryptionFailed(format!("encryption error: {e}")))?;

        // Prepend the nonce so the vault only stores one blob per site.
        let mut output = Vec::with_capacity(NONCE_LEN + ciphertext.len());
        output.extend_from_slice(&nonce);
        output.extend_from_slice(&ciphertext);
        Ok(output)
    }

    fn decrypt(&self, ciphertext_with_nonce: &[u8]) -> Result<String> {
        // Make sure we have at least a nonce worth of bytes.
        if ciphertext_with_nonce.len() < NONCE_LEN {
            return Err(VaultError::DecryptionFailed);
        }

        // Split nonce from ciphertext.
        let (nonce_bytes, ciphertext) = ciphertext_with_nonce.split_at(NONCE_LEN);
        let nonce = Nonce::from_slice(nonce_bytes);

        // Decrypt and verify the auth tag.
        let plaintext = self
            .cipher
            .decrypt(nonce, ciphertext)
            .map_err(|_| VaultError::DecryptionFailed)?;

        String::from_utf8(plaintext).map_err(|_| VaultError::DecryptionFailed)
    }
}
