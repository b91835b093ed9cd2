//! Pluggable cipher strategies for PassVault.
//!
//! This module provides:
//! - The `Cipher` capability trait the vault encrypts through
//! - A keyed rotation cipher over printable ASCII (`rotation`)
//! - An AES-256-GCM strategy with Argon2id key derivation (`aead`, `kdf`)

pub mod aead;
pub mod kdf;
pub mod rotation;

// Re-export the most commonly used items so callers can write:
//   use passvault::cipher::{Cipher, RotationCipher, ...};
pub use aead::AesGcmCipher;
pub use kdf::{derive_key_from_passphrase, generate_salt, Argon2Params};
pub use rotation::RotationCipher;

use crate::errors::{Result, VaultError};

/// Lowest code point in the cipher domain (space).
pub const DOMAIN_MIN: u8 = 0x20;

/// Highest code point in the cipher domain (tilde).
pub const DOMAIN_MAX: u8 = 0x7E;

/// A reversible transform over printable-ASCII plaintext.
///
/// Implementations must be exact inverses of each other on the same
/// instance: `decrypt(encrypt(s)) == s` for every string whose
/// characters all fall in `[DOMAIN_MIN, DOMAIN_MAX]`.  The vault is
/// agnostic to the concrete algorithm — it only ever calls these two
/// methods on whatever instance was injected at construction.
pub trait Cipher: Send + Sync {
    /// Encrypt a plaintext secret.
    ///
    /// Fails with `CipherDomain` if any character lies outside the
    /// printable ASCII range.
    fn encrypt(&self, plaintext: &str) -> Result<Vec<u8>>;

    /// Decrypt a ciphertext produced by `encrypt` on this instance.
    fn decrypt(&self, ciphertext: &[u8]) -> Result<String>;
}

/// Reject any plaintext character outside the cipher domain.
pub(crate) fn check_domain(plaintext: &str) -> Result<()> {
    match plaintext
        .chars()
        .find(|&c| !matches!(c as u32, 0x20..=0x7E))
    {
        Some(c) => Err(VaultError::CipherDomain(c)),
        None => Ok(()),
    }
}
