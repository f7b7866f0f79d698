use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::algorithm::{Algorithm, UsageFlags};
use super::user_identity::UserIdentity;

/// One existing subkey row from the keyring.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubkeyRow {
    pub key_id: u64,
    pub algorithm: Algorithm,
    pub usage: UsageFlags,
    #[serde(default)]
    pub revoked: bool,
    /// Stored expiry instant; absent means the key never expires.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires: Option<DateTime<Utc>>,
}

/// Read-only snapshot of a keyring's current user id and subkey rows.
///
/// This is the external input the edit model merges pending operations
/// against. It is never mutated here; applying a committed transaction
/// is the storage layer's job.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct KeyringSnapshot {
    pub identities: Vec<UserIdentity>,
    pub subkeys: Vec<SubkeyRow>,
}

impl KeyringSnapshot {
    /// Look up a user id row by its raw string.
    pub fn identity(&self, raw: &str) -> Option<&UserIdentity> {
        self.identities.iter().find(|identity| identity.raw == raw)
    }

    /// Look up a subkey row by key id.
    pub fn subkey(&self, key_id: u64) -> Option<&SubkeyRow> {
        self.subkeys.iter().find(|subkey| subkey.key_id == key_id)
    }

    /// Identities shown by default: revoked ones are filtered out,
    /// though they stay addressable through `identity`.
    pub fn visible_identities(&self) -> impl Iterator<Item = &UserIdentity> {
        self.identities.iter().filter(|identity| !identity.revoked)
    }

    /// User id rows currently flagged primary. A well-formed keyring has
    /// at most one; extras are surfaced by the edit model's conflict check.
    pub fn stored_primaries(&self) -> impl Iterator<Item = &UserIdentity> {
        self.identities.iter().filter(|identity| identity.primary)
    }
}
