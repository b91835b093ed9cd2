use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::{Result, VaultError};

/// Vault tuning knobs, loadable from `passvault.toml`.
///
/// Every field has a sensible default so the vault works out-of-the-box
/// without any config file at all.  Identifier and secret syntax rules
/// are fixed invariants of the vault and are not configurable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VaultConfig {
    /// Consecutive authentication failures after which an account is
    /// locked (default: 3).
    #[serde(default = "default_lockout_threshold")]
    pub lockout_threshold: u32,
}

// ── Serde default helpers ────────────────────────────────────────────

fn default_lockout_threshold() -> u32 {
    3
}

// ── Implementation ───────────────────────────────────────────────────

impl Default for VaultConfig {
    fn default() -> Self {
        Self {
            lockout_threshold: default_lockout_threshold(),
        }
    }
}

impl VaultConfig {
    /// Name of the config file we look for.
    const FILE_NAME: &'static str = "passvault.toml";

    /// Load config from `<dir>/passvault.toml`.
    ///
    /// If the file does not exist, sensible defaults are returned.
    /// If the file exists but cannot be parsed, an error is returned.
    pub fn load(dir: &Path) -> Result<Self> {
        let config_path = dir.join(Self::FILE_NAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&config_path)?;

        Self::from_toml_str(&contents).map_err(|e| {
            VaultError::ConfigError(format!("Failed to parse {}: {e}", config_path.display()))
        })
    }

    /// Parse config from a TOML string.
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: VaultConfig = toml::from_str(contents)
            .map_err(|e| VaultError::ConfigError(e.to_string()))?;

        if config.lockout_threshold == 0 {
            return Err(VaultError::ConfigError(
                "lockout_threshold must be at least 1".into(),
            ));
        }

        Ok(config)
    }
}

// ── Tests ────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn default_config_locks_after_three_failures() {
        let c = VaultConfig::default();
        assert_eq!(c.lockout_threshold, 3);
    }

    #[test]
    fn load_returns_defaults_when_no_config_file() {
        let tmp = TempDir::new().unwrap();
        let config = VaultConfig::load(tmp.path()).unwrap();
        assert_eq!(config.lockout_threshold, 3);
    }

    #[test]
    fn load_parses_toml_file() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("passvault.toml"), "lockout_threshold = 5\n").unwrap();

        let config = VaultConfig::load(tmp.path()).unwrap();
        assert_eq!(config.lockout_threshold, 5);
    }

    #[test]
    fn load_uses_defaults_for_missing_fields() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("passvault.toml"), "\n").unwrap();

        let config = VaultConfig::load(tmp.path()).unwrap();
        assert_eq!(config.lockout_threshold, 3);
    }

    #[test]
    fn load_errors_on_invalid_toml() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("passvault.toml"), "not valid {{toml").unwrap();

        assert!(VaultConfig::load(tmp.path()).is_err());
    }

    #[test]
    fn zero_threshold_is_rejected() {
        let result = VaultConfig::from_toml_str("lockout_threshold = 0\n");
        assert!(result.is_err(), "a zero threshold would lock every account at birth");
    }
}
