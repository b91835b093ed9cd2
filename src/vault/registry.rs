//! The vault registry: account ownership, authentication, lockout.
//!
//! `VaultRegistry` owns every `AccountRecord` and is the only mutation
//! path into them.  Every operation re-validates identifiers,
//! authenticates the caller against the stored master secret
//! (consulting and updating the lockout counter), and only then reads
//! or writes site ciphertexts through the injected cipher.

use std::collections::HashMap;

use chrono::Utc;

use crate::cipher::Cipher;
use crate::config::VaultConfig;
use crate::errors::{Result, VaultError};

use super::account::{AccountRecord, SiteMetadata, SiteSecret};
use super::generate::generate_secret;
use super::snapshot::{AccountSnapshot, SiteSnapshot, VaultSnapshot, SNAPSHOT_VERSION};
use super::validate::{valid_identifier, valid_secret};

/// The main vault handle.  Create one with `VaultRegistry::new`
/// (injecting the cipher strategy), then use its methods to register
/// accounts and manage per-site secrets.
///
/// Operations take `&mut self`, so each one is atomic with respect to
/// observers: no caller can see a partially updated failure counter or
/// site map.  Callers that share a registry across threads wrap it in
/// their own lock.
pub struct VaultRegistry {
    /// Username -> account state.
    accounts: HashMap<String, AccountRecord>,

    /// The injected cipher strategy; all ciphertexts in `accounts`
    /// belong to this instance.
    cipher: Box<dyn Cipher>,

    config: VaultConfig,
}

impl VaultRegistry {
    // ------------------------------------------------------------------
    // Construction
    // ------------------------------------------------------------------

    /// Create an empty registry around the given cipher strategy.
    pub fn new(cipher: Box<dyn Cipher>) -> Self {
        Self::with_config(cipher, VaultConfig::default())
    }

    /// Create an empty registry with explicit configuration.
    pub fn with_config(cipher: Box<dyn Cipher>, config: VaultConfig) -> Self {
        Self {
            accounts: HashMap::new(),
            cipher,
            config,
        }
    }

    // ------------------------------------------------------------------
    // Registration
    // ------------------------------------------------------------------

    /// Register a new account under `username` with the given master
    /// secret.  The account starts unlocked with an empty site map.
    pub fn register(&mut self, username: &str, master_secret: &str) -> Result<()> {
        if !valid_identifier(username) {
            return Err(VaultError::InvalidIdentifier);
        }
        if !valid_secret(master_secret) {
            return Err(VaultError::InvalidSecret);
        }
        if self.accounts.contains_key(username) {
            return Err(VaultError::DuplicateAccount(username.to_string()));
        }

        self.accounts
            .insert(username.to_string(), AccountRecord::new(master_secret));
        Ok(())
    }

    // ------------------------------------------------------------------
    // Site operations
    // ------------------------------------------------------------------

    /// Provision a fresh secret for `site`, store it encrypted, and
    /// hand the plaintext back to the caller — the only moment a site
    /// secret leaves the vault at creation.
    pub fn provision_site(
        &mut self,
        username: &str,
        master_secret: &str,
        site: &str,
    ) -> Result<String> {
        let threshold = self.config.lockout_threshold;
        let account =
            Self::authenticate(&mut self.accounts, username, master_secret, threshold)?;

        if account.has_site(site) {
            return Err(VaultError::DuplicateSite(site.to_string()));
        }
        if !valid_identifier(site) {
            return Err(VaultError::InvalidIdentifier);
        }

        let secret = generate_secret();
        let ciphertext = self.cipher.encrypt(&secret)?;
        account.put_site(site, ciphertext);
        Ok(secret)
    }

    /// Replace the secret stored for an existing `site` with a freshly
    /// generated one and return the new plaintext.  The old value is
    /// gone for good.
    pub fn rotate_site(
        &mut self,
        username: &str,
        master_secret: &str,
        site: &str,
    ) -> Result<String> {
        let threshold = self.config.lockout_threshold;
        let account =
            Self::authenticate(&mut self.accounts, username, master_secret, threshold)?;

        if !account.has_site(site) {
            return Err(VaultError::SiteNotFound(site.to_string()));
        }

        let secret = generate_secret();
        let ciphertext = self.cipher.encrypt(&secret)?;
        account.put_site(site, ciphertext);
        Ok(secret)
    }

    /// Decrypt and return the plaintext secret stored for `site`.
    pub fn retrieve_site(
        &mut self,
        username: &str,
        master_secret: &str,
        site: &str,
    ) -> Result<String> {
        let threshold = self.config.lockout_threshold;
        let account =
            Self::authenticate(&mut self.accounts, username, master_secret, threshold)?;

        let entry = account
            .site(site)
            .ok_or_else(|| VaultError::SiteNotFound(site.to_string()))?;

        self.cipher.decrypt(&entry.ciphertext)
    }

    /// Remove a site entry and its ciphertext.
    pub fn remove_site(&mut self, username: &str, master_secret: &str, site: &str) -> Result<()> {
        let threshold = self.config.lockout_threshold;
        let account =
            Self::authenticate(&mut self.accounts, username, master_secret, threshold)?;

        if !account.delete_site(site) {
            return Err(VaultError::SiteNotFound(site.to_string()));
        }
        Ok(())
    }

    /// List metadata for every site the account has provisioned,
    /// sorted by name.  Never exposes ciphertext or plaintext.
    pub fn list_sites(&mut self, username: &str, master_secret: &str) -> Result<Vec<SiteMetadata>> {
        let threshold = self.config.lockout_threshold;
        let account =
            Self::authenticate(&mut self.accounts, username, master_secret, threshold)?;

        Ok(account.site_metadata())
    }

    // ------------------------------------------------------------------
    // Authentication
    // ------------------------------------------------------------------

    /// The shared authentication protocol for every operation that
    /// touches an existing account:
    ///
    /// 1. locate the account, else `AccountNotFound`;
    /// 2. if locked, fail with `AccountLocked` without touching the
    ///    counter or consulting the supplied secret;
    /// 3. compare the supplied secret against the stored master secret
    ///    in constant time — on mismatch, increment the counter and
    ///    fail; on match, reset the counter to 0 and proceed.
    ///
    /// Site-existence checks deliberately run *after* this protocol in
    /// every operation, so an unauthenticated caller cannot probe which
    /// sites an account holds.
    fn authenticate<'a>(
        accounts: &'a mut HashMap<String, AccountRecord>,
        username: &str,
        master_secret: &str,
        threshold: u32,
    ) -> Result<&'a mut AccountRecord> {
        let account = accounts
            .get_mut(username)
            .ok_or_else(|| VaultError::AccountNotFound(username.to_string()))?;

        if account.is_locked(threshold) {
            return Err(VaultError::AccountLocked(username.to_string()));
        }

        if !account.verify_master(master_secret) {
            account.record_failure();
            return Err(VaultError::AuthenticationFailed);
        }

        account.reset_failures();
        Ok(account)
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    /// Returns `true` if an account is registered under `username`.
    ///
    /// This is a metadata-only check — no authentication runs and the
    /// failure counter is untouched.
    pub fn contains_account(&self, username: &str) -> bool {
        self.accounts.contains_key(username)
    }

    /// Number of registered accounts.
    pub fn account_count(&self) -> usize {
        self.accounts.len()
    }

    /// Consecutive authentication failures recorded for `username`, or
    /// `None` if no such account exists.  Metadata-only.
    pub fn failed_attempts(&self, username: &str) -> Option<u32> {
        self.accounts.get(username).map(|a| a.failed_attempts())
    }

    /// Returns `true` if `username` exists and has reached the lockout
    /// threshold.  Metadata-only.
    pub fn is_locked(&self, username: &str) -> bool {
        self.accounts
            .get(username)
            .is_some_and(|a| a.is_locked(self.config.lockout_threshold))
    }

    // ------------------------------------------------------------------
    // Snapshots
    // ------------------------------------------------------------------

    /// Capture the full registry state as a serializable snapshot.
    ///
    /// Accounts and sites are sorted by name for deterministic output.
    pub fn snapshot(&self) -> VaultSnapshot {
        let mut accounts: Vec<AccountSnapshot> = self
            .accounts
            .iter()
            .map(|(username, record)| {
                let mut sites: Vec<SiteSnapshot> = record
                    .sites()
                    .iter()
                    .map(|(name, s)| SiteSnapshot {
                        name: name.clone(),
                        ciphertext: s.ciphertext.clone(),
                        created_at: s.created_at,
                        updated_at: s.updated_at,
                    })
                    .collect();
                sites.sort_by(|a, b| a.name.cmp(&b.name));

                AccountSnapshot {
                    username: username.clone(),
                    master_secret: record.master_secret().expose().to_string(),
                    failed_attempts: record.failed_attempts(),
                    registered_at: record.registered_at(),
                    sites,
                }
            })
            .collect();
        accounts.sort_by(|a, b| a.username.cmp(&b.username));

        VaultSnapshot {
            version: SNAPSHOT_VERSION,
            taken_at: Utc::now(),
            accounts,
        }
    }

    /// Rebuild a registry from a snapshot.
    ///
    /// Identifiers and master secrets are re-validated — a snapshot
    /// that was edited into an invalid state is rejected, not loaded.
    /// Ciphertexts are opaque here; they only decrypt under a cipher
    /// equivalent to the one that produced them (for the rotation
    /// cipher, one rebuilt with the same shift).
    pub fn restore(
        snapshot: VaultSnapshot,
        cipher: Box<dyn Cipher>,
        config: VaultConfig,
    ) -> Result<Self> {
        if snapshot.version != SNAPSHOT_VERSION {
            return Err(VaultError::SnapshotError(format!(
                "unsupported snapshot version {}",
                snapshot.version
            )));
        }

        let mut accounts = HashMap::with_capacity(snapshot.accounts.len());
        for acct in snapshot.accounts {
            if !valid_identifier(&acct.username) {
                return Err(VaultError::InvalidIdentifier);
            }
            if !valid_secret(&acct.master_secret) {
                return Err(VaultError::InvalidSecret);
            }

            let mut sites = HashMap::with_capacity(acct.sites.len());
            for site in acct.sites {
                if !valid_identifier(&site.name) {
                    return Err(VaultError::InvalidIdentifier);
                }
                sites.insert(
                    site.name,
                    SiteSecret {
                        ciphertext: site.ciphertext,
                        created_at: site.created_at,
                        updated_at: site.updated_at,
                    },
                );
            }

            accounts.insert(
                acct.username,
                AccountRecord::from_parts(
                    &acct.master_secret,
                    acct.failed_attempts,
                    acct.registered_at,
                    sites,
                ),
            );
        }

        Ok(Self {
            accounts,
            cipher,
            config,
        })
    }
}
