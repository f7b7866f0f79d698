use chrono::{DateTime, Duration, Utc};

use crate::core::errors::{KeywrightError, Result};
use crate::core::models::algorithm::{Algorithm, KeyRole, UsageFlags};
use crate::core::models::subkey::{Expiry, KeyParam, SubkeyAddRequest};
use crate::core::models::transaction::EditOp;
use crate::core::services::key_params;

/// Pending subkey operations for one edit session: generation requests,
/// revocations, and expiry changes, each queued in call order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SubkeyChangeSet {
    adds: Vec<SubkeyAddRequest>,
    revokes: Vec<u64>,
    expiry_changes: Vec<(u64, Expiry)>,
}

impl SubkeyChangeSet {
    /// Validate one proposed subkey and produce the immutable request.
    ///
    /// Checks run in order: at least one capability selected, every
    /// capability legal for the algorithm and role, strength parameter of
    /// the right kind and in range, expiry far enough in the future.
    /// Pure: no change set is touched; the caller decides whether to
    /// queue the result.
    pub fn propose(
        algorithm: Algorithm,
        param: KeyParam,
        usage: UsageFlags,
        expiry: Expiry,
        role: KeyRole,
        now: DateTime<Utc>,
    ) -> Result<SubkeyAddRequest> {
        if usage.is_empty() {
            return Err(KeywrightError::NoUsageFlagSelected);
        }

        for flag in usage.iter() {
            if !key_params::is_usage_legal(algorithm, flag, role) {
                return Err(KeywrightError::IllegalUsageFlag { algorithm, flag });
            }
        }

        let (key_size, curve) = match (param, algorithm.uses_curve()) {
            (KeyParam::Size(requested), false) => {
                let normalized = key_params::proper_key_length(algorithm, requested).ok_or(
                    KeywrightError::InvalidKeyLength {
                        algorithm,
                        requested,
                    },
                )?;
                (Some(normalized), None)
            }
            (KeyParam::Curve(curve), true) => (None, Some(curve)),
            (KeyParam::Size(_), true) => {
                return Err(KeywrightError::ParameterMismatch {
                    algorithm,
                    expected: "curve",
                    given: "key size",
                });
            }
            (KeyParam::Curve(_), false) => {
                return Err(KeywrightError::ParameterMismatch {
                    algorithm,
                    expected: "key size",
                    given: "curve",
                });
            }
        };

        validate_expiry(expiry, now)?;

        Ok(SubkeyAddRequest {
            algorithm,
            key_size,
            curve,
            usage,
            expiry,
        })
    }

    /// Queue a validated generation request.
    pub fn queue_add(&mut self, request: SubkeyAddRequest) {
        self.adds.push(request);
    }

    /// Queue a revocation. Revoking the same key id twice records exactly
    /// one pending entry.
    pub fn revoke(&mut self, key_id: u64) {
        if !self.revokes.contains(&key_id) {
            self.revokes.push(key_id);
        }
    }

    /// Queue an expiry change, replacing any earlier pending change for
    /// the same key id.
    pub fn change_expiry(&mut self, key_id: u64, expiry: Expiry, now: DateTime<Utc>) -> Result<()> {
        validate_expiry(expiry, now)?;
        match self.expiry_changes.iter_mut().find(|(id, _)| *id == key_id) {
            Some(entry) => entry.1 = expiry,
            None => self.expiry_changes.push((key_id, expiry)),
        }
        Ok(())
    }

    pub fn pending_adds(&self) -> &[SubkeyAddRequest] {
        &self.adds
    }

    pub fn is_revocation_pending(&self, key_id: u64) -> bool {
        self.revokes.contains(&key_id)
    }

    pub fn pending_expiry(&self, key_id: u64) -> Option<Expiry> {
        self.expiry_changes
            .iter()
            .find(|(id, _)| *id == key_id)
            .map(|(_, expiry)| *expiry)
    }

    pub fn is_empty(&self) -> bool {
        self.adds.is_empty() && self.revokes.is_empty() && self.expiry_changes.is_empty()
    }

    pub fn clear(&mut self) {
        self.adds.clear();
        self.revokes.clear();
        self.expiry_changes.clear();
    }

    /// Append this change set's operations to a flattened transaction,
    /// generation requests first, then revocations, then expiry changes.
    pub(crate) fn flatten_into(&self, ops: &mut Vec<EditOp>) {
        for request in &self.adds {
            ops.push(EditOp::AddSubkey { request: *request });
        }
        for key_id in &self.revokes {
            ops.push(EditOp::RevokeSubkey { key_id: *key_id });
        }
        for (key_id, expiry) in &self.expiry_changes {
            ops.push(EditOp::ChangeSubkeyExpiry {
                key_id: *key_id,
                expiry: *expiry,
            });
        }
    }
}

/// New expiry dates must sit at least one day past `now`; `Never` always
/// passes.
pub(crate) fn validate_expiry(expiry: Expiry, now: DateTime<Utc>) -> Result<()> {
    match expiry {
        Expiry::Never => Ok(()),
        Expiry::On(at) if at >= now + Duration::days(1) => Ok(()),
        Expiry::On(at) => Err(KeywrightError::InvalidExpiry { requested: at }),
    }
}
