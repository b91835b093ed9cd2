use thiserror::Error;

/// All errors that can occur in PassVault.
#[derive(Debug, Error)]
pub enum VaultError {
    // --- Validation errors ---
    #[error("Invalid identifier — must be 6-12 lowercase ASCII letters")]
    InvalidIdentifier,

    #[error("Invalid secret — must be 6-15 printable ASCII characters with at least one letter, one digit, and one of !@#$%^&")]
    InvalidSecret,

    // --- Account errors ---
    #[error("Account '{0}' already registered")]
    DuplicateAccount(String),

    #[error("Account '{0}' not found")]
    AccountNotFound(String),

    #[error("Account '{0}' is locked after too many failed authentications")]
    AccountLocked(String),

    #[error("Authentication failed — master secret does not match")]
    AuthenticationFailed,

    // --- Site errors ---
    #[error("Site '{0}' already provisioned for this account")]
    DuplicateSite(String),

    #[error("Site '{0}' not found")]
    SiteNotFound(String),

    // --- Cipher errors ---
    #[error("Character {0:?} is outside the cipher's supported range")]
    CipherDomain(char),

    #[error("Encryption failed: {0}")]
    EncryptionFailed(String),

    #[error("Decryption failed — wrong key or corrupted ciphertext")]
    DecryptionFailed,

    #[error("Key derivation failed: {0}")]
    KeyDerivationFailed(String),

    // --- Config errors ---
    #[error("Config file error: {0}")]
    ConfigError(String),

    // --- Snapshot errors ---
    #[error("Snapshot error: {0}")]
    SnapshotError(String),

    // --- IO errors ---
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for PassVault results.
pub type Result<T> = std::result::Result<T, VaultError>;
