use crate::core::models::transaction::EditOp;
use crate::core::models::user_identity::UserIdentity;

/// Pending user-identity operations for one edit session.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct UserIdChangeSet {
    adds: Vec<String>,
    revokes: Vec<String>,
    new_primary: Option<String>,
}

impl UserIdChangeSet {
    /// Queue a brand-new user id. Duplicate checks against the stored
    /// keyring are the edit model's job.
    pub fn add(&mut self, user_id: &str) {
        self.adds.push(user_id.to_string());
    }

    /// Queue a revocation. Revoking twice, or revoking an id already
    /// revoked on disk, records exactly one pending entry.
    pub fn revoke(&mut self, user_id: &str) {
        if !self.revokes.iter().any(|pending| pending == user_id) {
            self.revokes.push(user_id.to_string());
        }
    }

    /// Set the pending primary target, replacing any previous target.
    /// Overwriting is not an error; the last call wins.
    pub fn set_primary(&mut self, user_id: &str) {
        self.new_primary = Some(user_id.to_string());
    }

    pub fn pending_adds(&self) -> &[String] {
        &self.adds
    }

    pub fn pending_primary(&self) -> Option<&str> {
        self.new_primary.as_deref()
    }

    pub fn is_revocation_pending(&self, user_id: &str) -> bool {
        self.revokes.iter().any(|pending| pending == user_id)
    }

    /// Effective primary flag for `identity` once pending edits apply.
    ///
    /// A pending change-primary overrides the stored primary flag for
    /// every identity, not just the targeted one: the old primary reads
    /// false and only the target reads true. With nothing pending, the
    /// stored flag passes through.
    pub fn is_primary_pending(&self, identity: &UserIdentity) -> bool {
        match &self.new_primary {
            Some(target) => identity.raw == *target,
            None => identity.primary,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.adds.is_empty() && self.revokes.is_empty() && self.new_primary.is_none()
    }

    pub fn clear(&mut self) {
        self.adds.clear();
        self.revokes.clear();
        self.new_primary = None;
    }

    /// Append this change set's operations to a flattened transaction:
    /// additions first, then revocations, then the primary change.
    pub(crate) fn flatten_into(&self, ops: &mut Vec<EditOp>) {
        for user_id in &self.adds {
            ops.push(EditOp::AddUserId {
                user_id: user_id.clone(),
            });
        }
        for user_id in &self.revokes {
            ops.push(EditOp::RevokeUserId {
                user_id: user_id.clone(),
            });
        }
        if let Some(user_id) = &self.new_primary {
            ops.push(EditOp::ChangePrimaryUserId {
                user_id: user_id.clone(),
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::user_identity::VerificationStatus;

    fn identity(raw: &str, primary: bool) -> UserIdentity {
        UserIdentity {
            raw: raw.to_string(),
            revoked: false,
            primary,
            verification: VerificationStatus::SelfSigned,
        }
    }

    #[test]
    fn pending_primary_overrides_every_stored_flag() {
        let mut changes = UserIdChangeSet::default();
        changes.set_primary("Bob <bob@example.org>");

        let stored_primary = identity("Alice <alice@example.org>", true);
        let target = identity("Bob <bob@example.org>", false);
        let other = identity("Carol <carol@example.org>", false);

        assert!(!changes.is_primary_pending(&stored_primary));
        assert!(changes.is_primary_pending(&target));
        assert!(!changes.is_primary_pending(&other));
    }

    #[test]
    fn stored_primary_flag_passes_through_when_nothing_pending() {
        let changes = UserIdChangeSet::default();
        assert!(changes.is_primary_pending(&identity("Alice <alice@example.org>", true)));
        assert!(!changes.is_primary_pending(&identity("Bob <bob@example.org>", false)));
    }

    #[test]
    fn setting_primary_twice_keeps_only_the_last_target() {
        let mut changes = UserIdChangeSet::default();
        changes.set_primary("Alice <alice@example.org>");
        changes.set_primary("Bob <bob@example.org>");

        assert_eq!(changes.pending_primary(), Some("Bob <bob@example.org>"));

        let mut ops = Vec::new();
        changes.flatten_into(&mut ops);
        assert_eq!(ops.len(), 1);
    }

    #[test]
    fn revoking_twice_records_one_entry() {
        let mut changes = UserIdChangeSet::default();
        changes.revoke("Alice <alice@example.org>");
        changes.revoke("Alice <alice@example.org>");

        assert!(changes.is_revocation_pending("Alice <alice@example.org>"));
        let mut ops = Vec::new();
        changes.flatten_into(&mut ops);
        assert_eq!(ops.len(), 1);
    }

    #[test]
    fn clear_empties_everything() {
        let mut changes = UserIdChangeSet::default();
        changes.add("Dave <dave@example.org>");
        changes.revoke("Alice <alice@example.org>");
        changes.set_primary("Bob <bob@example.org>");
        assert!(!changes.is_empty());

        changes.clear();
        assert!(changes.is_empty());
        assert_eq!(changes.pending_primary(), None);
        assert!(!changes.is_revocation_pending("Alice <alice@example.org>"));
    }
}
