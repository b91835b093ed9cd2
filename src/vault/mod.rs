//! Vault module — account registry, validation, secret generation.
//!
//! This module provides:
//! - Identifier and secret syntax rules (`validate`)
//! - Random secret generation (`generate`)
//! - Per-account state (`account`)
//! - A serializable state snapshot for storage collaborators (`snapshot`)
//! - The high-level `VaultRegistry` exposing the public operations (`registry`)

pub mod account;
pub mod generate;
pub mod registry;
pub mod snapshot;
pub mod validate;

// Re-export the most commonly used items.
pub use account::{AccountRecord, SiteMetadata, SiteSecret};
pub use generate::generate_secret;
pub use registry::VaultRegistry;
pub use snapshot::{AccountSnapshot, SiteSnapshot, VaultSnapshot};
pub use validate::{valid_identifier, valid_secret, SECRET_SYMBOLS};
