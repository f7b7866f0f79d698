use std::path::PathBuf;

use crate::core::errors::{KeywrightError, Result};
use crate::core::models::transaction::KeyringEditTransaction;
use crate::core::traits::backend::MutationBackend;

/// Backend that exports committed transactions as pretty-printed JSON,
/// to a file or to stdout.
///
/// This is the hand-off format for whatever generates the actual key
/// material; keywright itself never touches keys.
pub struct JsonBackend {
    /// Write here instead of stdout when set.
    pub output: Option<PathBuf>,
}

impl JsonBackend {
    pub fn to_stdout() -> Self {
        JsonBackend { output: None }
    }

    pub fn to_file(path: PathBuf) -> Self {
        JsonBackend { output: Some(path) }
    }
}

impl MutationBackend for JsonBackend {
    fn apply(&self, transaction: &KeyringEditTransaction) -> Result<()> {
        let json = serde_json::to_string_pretty(transaction).map_err(|e| {
            KeywrightError::BackendUnavailable {
                backend: self.name().to_string(),
                detail: e.to_string(),
            }
        })?;

        match &self.output {
            Some(path) => std::fs::write(path, json)?,
            None => println!("{json}"),
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "json"
    }
}
