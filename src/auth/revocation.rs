//! Revocation list
//!
//! Tokens logged out before their natural expiry, keyed by the SHA-256 of
//! the token. Each entry remembers the latest instant its token could still
//! be valid; past that [`RevocationList::sweep_expired`] may drop it.

use chrono::{DateTime, Utc};
use dashmap::{mapref::entry::Entry, DashMap};
use sha2::{Digest, Sha256};

#[derive(Debug, Default)]
pub struct RevocationList {
    entries: DashMap<String, DateTime<Utc>>,
}

impl RevocationList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a token invalid. Returns true only for the call that inserted
    /// the entry; revoking an already revoked token changes nothing.
    pub fn revoke(&self, token: &str, valid_until: DateTime<Utc>) -> bool {
        match self.entries.entry(fingerprint(token)) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(valid_until);
                true
            }
        }
    }

    pub fn is_revoked(&self, token: &str) -> bool {
        self.entries.contains_key(&fingerprint(token))
    }

    /// Drop entries whose token has expired on its own. Returns how many
    /// were removed.
    pub fn sweep_expired(&self, now: DateTime<Utc>) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, valid_until| *valid_until > now);
        before.saturating_sub(self.entries.len())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn fingerprint(token: &str) -> String {
    hex::encode(Sha256::digest(token.as_bytes()))
}
