use std::path::Path;

use serde::Deserialize;

use crate::core::errors::{KeywrightError, Result};
use crate::core::models::keyring::{KeyringSnapshot, SubkeyRow};
use crate::core::models::user_identity::UserIdentity;

/// Parses keyring snapshot files.
///
/// A snapshot is the read-only export of a keyring's current rows,
/// produced by whatever owns the actual key storage:
///
/// ```toml
/// [[user_id]]
/// raw = "Alice Example (work) <alice@example.org>"
/// primary = true
/// verification = "secret"
///
/// [[subkey]]
/// key_id = 12345678
/// algorithm = "rsa"
/// usage = ["encrypt"]
/// expires = "2030-01-01T00:00:00Z"   # omit for a key that never expires
/// ```
pub struct SnapshotParser;

#[derive(Debug, Deserialize)]
struct SnapshotFile {
    #[serde(default, rename = "user_id")]
    user_ids: Vec<UserIdentity>,
    #[serde(default, rename = "subkey")]
    subkeys: Vec<SubkeyRow>,
}

impl SnapshotParser {
    /// Parse raw TOML content into a snapshot.
    pub fn parse(&self, content: &str, origin: &Path) -> Result<KeyringSnapshot> {
        let file: SnapshotFile =
            toml::from_str(content).map_err(|e| KeywrightError::ParseError {
                file: origin.to_path_buf(),
                detail: e.to_string(),
            })?;

        Ok(KeyringSnapshot {
            identities: file.user_ids,
            subkeys: file.subkeys,
        })
    }

    /// Read and parse a snapshot file from disk.
    pub fn load(&self, path: &Path) -> Result<KeyringSnapshot> {
        if !path.exists() {
            return Err(KeywrightError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        let content = std::fs::read_to_string(path)?;
        self.parse(&content, path)
    }
}
