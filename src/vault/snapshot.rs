//! Serializable snapshot of registry state.
//!
//! The vault itself never touches the filesystem; a storage
//! collaborator serializes a `VaultSnapshot` (for example with
//! serde_json) and hands it back to `VaultRegistry::restore` later.
//! Ciphertexts serialize as base64 strings rather than raw byte arrays.
//!
//! A snapshot carries master secrets in the clear and ciphertexts that
//! only an equivalent cipher instance can reverse; treat it with the
//! same care as the live vault.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Current snapshot schema version.
pub const SNAPSHOT_VERSION: u8 = 1;

/// Full registry state: every account, sorted by username.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VaultSnapshot {
    /// Schema version.
    pub version: u8,

    /// When the snapshot was taken.
    pub taken_at: DateTime<Utc>,

    /// All registered accounts.
    pub accounts: Vec<AccountSnapshot>,
}

/// One account's state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountSnapshot {
    pub username: String,

    /// The master secret in the clear.
    pub master_secret: String,

    /// Consecutive failures at snapshot time — a locked account stays
    /// locked across restore.
    pub failed_attempts: u32,

    pub registered_at: DateTime<Utc>,

    /// Provisioned sites, sorted by name.
    pub sites: Vec<SiteSnapshot>,
}

/// One encrypted site entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteSnapshot {
    pub name: String,

    /// Ciphertext bytes, base64 in JSON/TOML for readability.
    #[serde(serialize_with = "base64_encode", deserialize_with = "base64_decode")]
    pub ciphertext: Vec<u8>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Serde helpers: Vec<u8> <-> base64 string
// ---------------------------------------------------------------------------

pub(crate) fn base64_encode<S>(data: &[u8], serializer: S) -> std::result::Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    let encoded = BASE64.encode(data);
    serializer.serialize_str(&encoded)
}

pub(crate) fn base64_decode<'de, D>(deserializer: D) -> std::result::Result<Vec<u8>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    BASE64.decode(&s).map_err(serde::de::Error::custom)
}
