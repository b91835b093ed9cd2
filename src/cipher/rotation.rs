//! Keyed rotation cipher over the printable-ASCII range.
//!
//! Every character is shifted by a per-instance offset, wrapping modulo
//! the 95-character domain.  The shift is drawn once at construction
//! and reused for every operation on that instance, so two instances
//! are not interchangeable and ciphertexts carry no per-secret salt.
//! This is a pedagogical strategy, not a security guarantee — use
//! `AesGcmCipher` when real confidentiality is needed.

use rand::Rng;

use crate::errors::{Result, VaultError};

use super::{check_domain, Cipher, DOMAIN_MAX, DOMAIN_MIN};

/// Number of characters in the printable range (95).
const DOMAIN_SIZE: u8 = DOMAIN_MAX - DOMAIN_MIN + 1;

/// The illustrative rotation cipher.
pub struct RotationCipher {
    shift: u8,
}

impl RotationCipher {
    /// Create a cipher with a random shift in `[1, 94]`.
    pub fn new() -> Self {
        let shift = rand::rng().random_range(1..DOMAIN_SIZE);
        Self { shift }
    }

    /// Create a cipher with an explicit shift.
    ///
    /// Useful for tests and for rebuilding an instance whose shift was
    /// recorded alongside a state snapshot.
    pub fn with_shift(shift: u8) -> Result<Self> {
        if shift == 0 || shift >= DOMAIN_SIZE {
            return Err(VaultError::EncryptionFailed(format!(
                "rotation shift must be in 1..={} (got {shift})",
                DOMAIN_SIZE - 1
            )));
        }
        Ok(Self { shift })
    }

    /// The shift this instance was constructed with.
    pub fn shift(&self) -> u8 {
        self.shift
    }

    fn rotate(&self, byte: u8, forward: bool) -> Result<u8> {
        if !(DOMAIN_MIN..=DOMAIN_MAX).contains(&byte) {
            return Err(VaultError::CipherDomain(byte as char));
        }
        let pos = byte - DOMAIN_MIN;
        let rotated = if forward {
            (pos + self.shift) % DOMAIN_SIZE
        } else {
            (pos + DOMAIN_SIZE - self.shift) % DOMAIN_SIZE
        };
        Ok(DOMAIN_MIN + rotated)
    }
}

impl Default for RotationCipher {
    fn default() -> Self {
        Self::new()
    }
}

impl Cipher for RotationCipher {
    fn encrypt(&self, plaintext: &str) -> Result<Vec<u8>> {
        check_domain(plaintext)?;
        plaintext.bytes().map(|b| self.rotate(b, true)).collect()
    }

    fn decrypt(&self, ciphertext: &[u8]) -> Result<String> {
        let bytes = ciphertext
            .iter()
            .map(|&b| self.rotate(b, false))
            .collect::<Result<Vec<u8>>>()?;

        // Rotated bytes stay inside the printable range, so this is
        // always valid UTF-8.
        String::from_utf8(bytes).map_err(|_| VaultError::DecryptionFailed)
    }
}
