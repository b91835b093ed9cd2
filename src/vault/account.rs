//! Per-account state: master secret, site ciphertexts, lockout counter.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use subtle::ConstantTimeEq;
use zeroize::Zeroize;

/// A master secret, zeroed on drop.
///
/// Comparison runs in constant time over the byte contents so a
/// mismatch reveals nothing about how much of the secret matched.
#[derive(Zeroize)]
#[zeroize(drop)]
pub struct MasterSecret(String);

impl MasterSecret {
    fn new(secret: &str) -> Self {
        Self(secret.to_string())
    }

    /// Constant-time equality against a caller-supplied candidate.
    fn matches(&self, candidate: &str) -> bool {
        self.0.as_bytes().ct_eq(candidate.as_bytes()).into()
    }

    /// Expose the raw secret, for snapshotting only.
    pub(crate) fn expose(&self) -> &str {
        &self.0
    }
}

/// One encrypted site secret plus its timestamps.
#[derive(Debug, Clone)]
pub struct SiteSecret {
    /// Opaque ciphertext as produced by the injected cipher.
    pub ciphertext: Vec<u8>,

    /// When this site was first provisioned.
    pub created_at: DateTime<Utc>,

    /// When this site's secret was last rotated.
    pub updated_at: DateTime<Utc>,
}

/// Lightweight metadata about a provisioned site (no ciphertext).
///
/// Returned by `VaultRegistry::list_sites` so callers can display site
/// names and timestamps without touching any secret material.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteMetadata {
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Everything the registry tracks for one username.
///
/// Owned exclusively by the `VaultRegistry` under its username key; all
/// mutation goes through the registry's authenticated operations.
pub struct AccountRecord {
    /// Set once at registration, compared but never rotated.
    master_secret: MasterSecret,

    /// Site name -> encrypted site secret.
    sites: HashMap<String, SiteSecret>,

    /// Consecutive authentication failures since the last success.
    failed_attempts: u32,

    /// When this account was registered.
    registered_at: DateTime<Utc>,
}

impl AccountRecord {
    pub(crate) fn new(master_secret: &str) -> Self {
        Self {
            master_secret: MasterSecret::new(master_secret),
            sites: HashMap::new(),
            failed_attempts: 0,
            registered_at: Utc::now(),
        }
    }

    /// Rebuild a record from snapshot parts.
    pub(crate) fn from_parts(
        master_secret: &str,
        failed_attempts: u32,
        registered_at: DateTime<Utc>,
        sites: HashMap<String, SiteSecret>,
    ) -> Self {
        Self {
            master_secret: MasterSecret::new(master_secret),
            sites,
            failed_attempts,
            registered_at,
        }
    }

    // ------------------------------------------------------------------
    // Authentication state
    // ------------------------------------------------------------------

    /// Constant-time check of a supplied master secret.
    pub(crate) fn verify_master(&self, candidate: &str) -> bool {
        self.master_secret.matches(candidate)
    }

    pub(crate) fn is_locked(&self, threshold: u32) -> bool {
        self.failed_attempts >= threshold
    }

    pub(crate) fn record_failure(&mut self) {
        self.failed_attempts += 1;
    }

    pub(crate) fn reset_failures(&mut self) {
        self.failed_attempts = 0;
    }

    /// Consecutive failures since the last successful authentication.
    pub fn failed_attempts(&self) -> u32 {
        self.failed_attempts
    }

    /// When this account was registered.
    pub fn registered_at(&self) -> DateTime<Utc> {
        self.registered_at
    }

    // ------------------------------------------------------------------
    // Site map
    // ------------------------------------------------------------------

    pub(crate) fn site(&self, name: &str) -> Option<&SiteSecret> {
        self.sites.get(name)
    }

    pub(crate) fn has_site(&self, name: &str) -> bool {
        self.sites.contains_key(name)
    }

    /// Insert or overwrite a ciphertext, preserving `created_at` when
    /// the site already exists.
    pub(crate) fn put_site(&mut self, name: &str, ciphertext: Vec<u8>) {
        let now = Utc::now();
        let created_at = self
            .sites
            .get(name)
            .map_or(now, |existing| existing.created_at);

        self.sites.insert(
            name.to_string(),
            SiteSecret {
                ciphertext,
                created_at,
                updated_at: now,
            },
        );
    }

    /// Remove a site entry.  Returns `false` if it was never there.
    pub(crate) fn delete_site(&mut self, name: &str) -> bool {
        self.sites.remove(name).is_some()
    }

    pub(crate) fn sites(&self) -> &HashMap<String, SiteSecret> {
        &self.sites
    }

    pub(crate) fn master_secret(&self) -> &MasterSecret {
        &self.master_secret
    }

    /// Metadata for all provisioned sites, sorted by name.
    pub fn site_metadata(&self) -> Vec<SiteMetadata> {
        let mut list: Vec<SiteMetadata> = self
            .sites
            .iter()
            .map(|(name, s)| SiteMetadata {
                name: name.clone(),
                created_at: s.created_at,
                updated_at: s.updated_at,
            })
            .collect();

        list.sort_by(|a, b| a.name.cmp(&b.name));
        list
    }

    /// Number of provisioned sites.
    pub fn site_count(&self) -> usize {
        self.sites.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn master_secret_matches_only_exact_value() {
        let record = AccountRecord::new("Ab3!def");
        assert!(record.verify_master("Ab3!def"));
        assert!(!record.verify_master("Ab3!deg"));
        assert!(!record.verify_master("Ab3!de"));
        assert!(!record.verify_master(""));
    }

    #[test]
    fn lockout_tracks_threshold() {
        let mut record = AccountRecord::new("Ab3!def");
        assert!(!record.is_locked(3));
        record.record_failure();
        record.record_failure();
        assert!(!record.is_locked(3));
        record.record_failure();
        assert!(record.is_locked(3));
    }

    #[test]
    fn put_site_preserves_created_at_on_overwrite() {
        let mut record = AccountRecord::new("Ab3!def");
        record.put_site("amazon", vec![1, 2, 3]);
        let before = record.site("amazon").unwrap().created_at;

        record.put_site("amazon", vec![4, 5, 6]);
        let after = record.site("amazon").unwrap();

        assert_eq!(after.created_at, before);
        assert_eq!(after.ciphertext, vec![4, 5, 6]);
    }
}
