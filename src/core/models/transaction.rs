use serde::Serialize;

use super::subkey::{Expiry, SubkeyAddRequest};

/// A single pending operation, in the order it was queued.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum EditOp {
    AddUserId {
        user_id: String,
    },
    RevokeUserId {
        user_id: String,
    },
    ChangePrimaryUserId {
        user_id: String,
    },
    AddSubkey {
        #[serde(flatten)]
        request: SubkeyAddRequest,
    },
    RevokeSubkey {
        key_id: u64,
    },
    ChangeSubkeyExpiry {
        key_id: u64,
        expiry: Expiry,
    },
}

impl std::fmt::Display for EditOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EditOp::AddUserId { user_id } => write!(f, "add user id '{user_id}'"),
            EditOp::RevokeUserId { user_id } => write!(f, "revoke user id '{user_id}'"),
            EditOp::ChangePrimaryUserId { user_id } => {
                write!(f, "set primary user id to '{user_id}'")
            }
            EditOp::AddSubkey { request } => {
                write!(f, "add {} subkey [{}]", request.algorithm, request.usage)
            }
            EditOp::RevokeSubkey { key_id } => write!(f, "revoke subkey 0x{key_id:016X}"),
            EditOp::ChangeSubkeyExpiry { key_id, expiry } => {
                write!(f, "change subkey 0x{key_id:016X} expiry to {expiry}")
            }
        }
    }
}

/// Flattened, order-preserving snapshot of every pending edit, ready to
/// hand to a mutation backend.
///
/// Content validation happened when each operation was queued, so a
/// transaction is internally consistent by construction: revocations are
/// deduplicated, and at most one change-primary and one expiry change per
/// subkey survive.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct KeyringEditTransaction {
    pub ops: Vec<EditOp>,
}

impl KeyringEditTransaction {
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }
}
