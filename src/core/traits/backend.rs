use crate::core::errors::Result;
use crate::core::models::transaction::KeyringEditTransaction;

/// Port for the backend that turns a committed transaction into actual
/// key material changes.
///
/// Implementations live in `adapters::backends`. The core validates
/// operation content at propose time, so `apply` fails only for
/// availability reasons owned by the backend itself.
pub trait MutationBackend: Send + Sync {
    /// Apply a committed transaction.
    fn apply(&self, transaction: &KeyringEditTransaction) -> Result<()>;

    /// Human-readable name of this backend (e.g. "json").
    fn name(&self) -> &str;
}
