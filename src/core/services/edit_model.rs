use chrono::{DateTime, Utc};

use crate::core::errors::{KeywrightError, Result};
use crate::core::models::algorithm::{Algorithm, KeyRole, UsageFlags};
use crate::core::models::keyring::KeyringSnapshot;
use crate::core::models::subkey::{Expiry, KeyParam, SubkeyAddRequest};
use crate::core::models::transaction::KeyringEditTransaction;
use crate::core::models::user_identity::UserIdentity;
use crate::core::services::subkey_changes::SubkeyChangeSet;
use crate::core::services::user_id_changes::UserIdChangeSet;

/// The pending edits for one keyring edit session.
///
/// Created empty when a session opens, mutated one operation at a time,
/// and finally flattened into a transaction or discarded. Each mutation
/// validates first and leaves the model untouched on error, so no
/// half-applied operation is ever visible. The model itself is never
/// persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyringEditModel {
    snapshot: KeyringSnapshot,
    user_ids: UserIdChangeSet,
    subkeys: SubkeyChangeSet,
}

/// A consistency problem the operator must resolve before the edits make
/// sense. Surfaced, never auto-fixed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditConflict {
    /// The pending primary target is revoked on disk or about to be.
    PrimaryTargetRevoked { user_id: String },
    /// The stored keyring already carries more than one primary user id.
    MultipleStoredPrimaries { user_ids: Vec<String> },
}

impl std::fmt::Display for EditConflict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EditConflict::PrimaryTargetRevoked { user_id } => {
                write!(f, "pending primary user id '{user_id}' is revoked")
            }
            EditConflict::MultipleStoredPrimaries { user_ids } => {
                write!(
                    f,
                    "keyring already has {} primary user ids: {}",
                    user_ids.len(),
                    user_ids.join(", ")
                )
            }
        }
    }
}

impl KeyringEditModel {
    /// Open an edit session over a read-only snapshot of the keyring.
    pub fn new(snapshot: KeyringSnapshot) -> Self {
        KeyringEditModel {
            snapshot,
            user_ids: UserIdChangeSet::default(),
            subkeys: SubkeyChangeSet::default(),
        }
    }

    pub fn snapshot(&self) -> &KeyringSnapshot {
        &self.snapshot
    }

    // ─── Mutation surface ───────────────────────────────────────────

    /// Queue a brand-new user id. Rejects ids already on the keyring or
    /// already queued for addition.
    pub fn add_user_id(&mut self, user_id: &str) -> Result<()> {
        let already_queued = self
            .user_ids
            .pending_adds()
            .iter()
            .any(|pending| pending == user_id);
        if self.snapshot.identity(user_id).is_some() || already_queued {
            return Err(KeywrightError::DuplicateUserId {
                user_id: user_id.to_string(),
            });
        }
        self.user_ids.add(user_id);
        Ok(())
    }

    /// Queue a revocation of an existing user id. Idempotent, and a
    /// no-op-but-recorded for ids already revoked on disk.
    pub fn revoke_user_id(&mut self, user_id: &str) -> Result<()> {
        if self.snapshot.identity(user_id).is_none() {
            return Err(KeywrightError::UnknownUserId {
                user_id: user_id.to_string(),
            });
        }
        self.user_ids.revoke(user_id);
        Ok(())
    }

    /// Queue a primary change to an existing user id, replacing any
    /// earlier pending target.
    pub fn set_primary_user_id(&mut self, user_id: &str) -> Result<()> {
        if self.snapshot.identity(user_id).is_none() {
            return Err(KeywrightError::UnknownUserId {
                user_id: user_id.to_string(),
            });
        }
        self.user_ids.set_primary(user_id);
        Ok(())
    }

    /// Validate and queue a new subkey. On any validation error nothing
    /// is queued.
    pub fn propose_subkey(
        &mut self,
        algorithm: Algorithm,
        param: KeyParam,
        usage: UsageFlags,
        expiry: Expiry,
        now: DateTime<Utc>,
    ) -> Result<()> {
        let request =
            SubkeyChangeSet::propose(algorithm, param, usage, expiry, KeyRole::Subkey, now)?;
        self.subkeys.queue_add(request);
        Ok(())
    }

    /// Queue a revocation of an existing subkey. Idempotent.
    pub fn revoke_subkey(&mut self, key_id: u64) -> Result<()> {
        if self.snapshot.subkey(key_id).is_none() {
            return Err(KeywrightError::UnknownSubkey { key_id });
        }
        self.subkeys.revoke(key_id);
        Ok(())
    }

    /// Queue an expiry change for an existing subkey, replacing any
    /// earlier pending change for the same key.
    pub fn change_subkey_expiry(
        &mut self,
        key_id: u64,
        expiry: Expiry,
        now: DateTime<Utc>,
    ) -> Result<()> {
        if self.snapshot.subkey(key_id).is_none() {
            return Err(KeywrightError::UnknownSubkey { key_id });
        }
        self.subkeys.change_expiry(key_id, expiry, now)
    }

    // ─── Query surface ──────────────────────────────────────────────

    pub fn is_dirty(&self) -> bool {
        !(self.user_ids.is_empty() && self.subkeys.is_empty())
    }

    /// Effective primary flag for an identity with pending edits applied.
    pub fn is_effective_primary(&self, identity: &UserIdentity) -> bool {
        self.user_ids.is_primary_pending(identity)
    }

    /// Effective revoked flag: revoked on disk, or a revocation pending.
    pub fn is_effectively_revoked(&self, identity: &UserIdentity) -> bool {
        identity.revoked || self.user_ids.is_revocation_pending(&identity.raw)
    }

    pub fn is_user_id_revocation_pending(&self, user_id: &str) -> bool {
        self.user_ids.is_revocation_pending(user_id)
    }

    pub fn pending_primary(&self) -> Option<&str> {
        self.user_ids.pending_primary()
    }

    pub fn pending_user_id_adds(&self) -> &[String] {
        self.user_ids.pending_adds()
    }

    pub fn pending_subkey_adds(&self) -> &[SubkeyAddRequest] {
        self.subkeys.pending_adds()
    }

    pub fn is_subkey_revocation_pending(&self, key_id: u64) -> bool {
        self.subkeys.is_revocation_pending(key_id)
    }

    pub fn pending_subkey_expiry(&self, key_id: u64) -> Option<Expiry> {
        self.subkeys.pending_expiry(key_id)
    }

    /// Consistency problems the pending edits would create, plus any the
    /// stored keyring already contains. The model reports them and leaves
    /// resolution to the operator.
    pub fn conflicts(&self) -> Vec<EditConflict> {
        let mut conflicts = Vec::new();

        if let Some(target) = self.user_ids.pending_primary() {
            let revoked_on_disk = self
                .snapshot
                .identity(target)
                .is_some_and(|identity| identity.revoked);
            if revoked_on_disk || self.user_ids.is_revocation_pending(target) {
                conflicts.push(EditConflict::PrimaryTargetRevoked {
                    user_id: target.to_string(),
                });
            }
        }

        let stored_primaries: Vec<String> = self
            .snapshot
            .stored_primaries()
            .map(|identity| identity.raw.clone())
            .collect();
        if stored_primaries.len() > 1 {
            conflicts.push(EditConflict::MultipleStoredPrimaries {
                user_ids: stored_primaries,
            });
        }

        conflicts
    }

    // ─── Commit surface ─────────────────────────────────────────────

    /// Flatten every pending operation into a transaction for the
    /// mutation backend: user id operations in queue order, then subkey
    /// operations in queue order.
    ///
    /// Content validation happened when each operation was queued, so
    /// commit itself cannot fail; only the backend's own availability
    /// can, and that belongs to the backend.
    pub fn commit(&self) -> KeyringEditTransaction {
        let mut ops = Vec::new();
        self.user_ids.flatten_into(&mut ops);
        self.subkeys.flatten_into(&mut ops);
        KeyringEditTransaction { ops }
    }

    /// Drop every pending operation, returning the session to its clean
    /// starting state. Safe to call at any point.
    pub fn discard(&mut self) {
        self.user_ids.clear();
        self.subkeys.clear();
    }
}
