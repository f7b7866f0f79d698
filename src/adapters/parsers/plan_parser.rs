use std::path::Path;

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::core::errors::{KeywrightError, Result};
use crate::core::models::algorithm::{Algorithm, Curve, UsageFlags};
use crate::core::models::subkey::{
    DEFAULT_ALGORITHM, DEFAULT_CURVE, DEFAULT_RSA_KEY_SIZE, Expiry, KeyParam,
};
use crate::core::services::edit_model::KeyringEditModel;

/// A declarative edit plan: the operations one session wants to queue.
///
/// ```toml
/// add_user_ids = ["Carol <carol@example.org>"]
/// revoke_user_ids = ["Old Alice <old@example.org>"]
/// primary_user_id = "Alice (work) <alice@example.org>"
///
/// [[add_subkey]]
/// algorithm = "rsa"
/// key_size = 3072                     # or curve = "nist-p256" for EC keys
/// usage = ["sign"]
/// expires = "2030-01-01T00:00:00Z"    # omit for a key that never expires
///
/// [[revoke_subkey]]
/// key_id = 42
///
/// [[change_expiry]]
/// key_id = 43
/// expires = "2031-01-01T00:00:00Z"    # omit to clear the expiry
/// ```
///
/// The plan is input only. Replaying it builds a fresh in-memory edit
/// model; nothing about the model itself is ever written back.
#[derive(Debug, Default, Deserialize)]
pub struct EditPlan {
    #[serde(default)]
    pub add_user_ids: Vec<String>,
    #[serde(default)]
    pub revoke_user_ids: Vec<String>,
    pub primary_user_id: Option<String>,
    #[serde(default, rename = "add_subkey")]
    pub add_subkeys: Vec<AddSubkeyEntry>,
    #[serde(default, rename = "revoke_subkey")]
    pub revoke_subkeys: Vec<RevokeSubkeyEntry>,
    #[serde(default, rename = "change_expiry")]
    pub change_expiries: Vec<ChangeExpiryEntry>,
}

#[derive(Debug, Deserialize)]
pub struct AddSubkeyEntry {
    /// Defaults to RSA when omitted.
    pub algorithm: Option<Algorithm>,
    pub key_size: Option<u32>,
    pub curve: Option<Curve>,
    pub usage: UsageFlags,
    pub expires: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
pub struct RevokeSubkeyEntry {
    pub key_id: u64,
}

#[derive(Debug, Deserialize)]
pub struct ChangeExpiryEntry {
    pub key_id: u64,
    pub expires: Option<DateTime<Utc>>,
}

impl AddSubkeyEntry {
    fn algorithm(&self) -> Algorithm {
        self.algorithm.unwrap_or(DEFAULT_ALGORITHM)
    }

    /// Resolve the strength parameter, applying the default selection
    /// policy when the plan names neither a size nor a curve: RSA keys
    /// default to 4096 bits, EC keys to NIST P-256. DSA and ElGamal have
    /// no default; their entries must name a size.
    fn key_param(&self) -> Result<KeyParam> {
        let algorithm = self.algorithm();
        match (self.key_size, self.curve) {
            (Some(_), Some(_)) => Err(KeywrightError::ParameterMismatch {
                algorithm,
                expected: "key size or curve",
                given: "both",
            }),
            (Some(size), None) => Ok(KeyParam::Size(size)),
            (None, Some(curve)) => Ok(KeyParam::Curve(curve)),
            (None, None) => match algorithm {
                Algorithm::Rsa => Ok(KeyParam::Size(DEFAULT_RSA_KEY_SIZE)),
                Algorithm::Ecdsa | Algorithm::Ecdh => Ok(KeyParam::Curve(DEFAULT_CURVE)),
                Algorithm::Dsa | Algorithm::ElGamal => Err(KeywrightError::InvalidKeyLength {
                    algorithm,
                    requested: 0,
                }),
            },
        }
    }
}

/// Parses edit plan files and replays them into an edit model.
pub struct PlanParser;

impl PlanParser {
    /// Parse raw TOML content into a plan.
    pub fn parse(&self, content: &str, origin: &Path) -> Result<EditPlan> {
        toml::from_str(content).map_err(|e| KeywrightError::ParseError {
            file: origin.to_path_buf(),
            detail: e.to_string(),
        })
    }

    /// Read and parse a plan file from disk.
    pub fn load(&self, path: &Path) -> Result<EditPlan> {
        if !path.exists() {
            return Err(KeywrightError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        let content = std::fs::read_to_string(path)?;
        self.parse(&content, path)
    }
}

impl EditPlan {
    /// Replay every operation into `model`, in the order the categories
    /// appear in the file format. The first validation failure aborts the
    /// replay; the caller discards the model in that case.
    pub fn apply_to(&self, model: &mut KeyringEditModel, now: DateTime<Utc>) -> Result<()> {
        for user_id in &self.add_user_ids {
            model.add_user_id(user_id)?;
        }
        for user_id in &self.revoke_user_ids {
            model.revoke_user_id(user_id)?;
        }
        if let Some(user_id) = &self.primary_user_id {
            model.set_primary_user_id(user_id)?;
        }
        for entry in &self.add_subkeys {
            model.propose_subkey(
                entry.algorithm(),
                entry.key_param()?,
                entry.usage,
                Expiry::from(entry.expires),
                now,
            )?;
        }
        for entry in &self.revoke_subkeys {
            model.revoke_subkey(entry.key_id)?;
        }
        for entry in &self.change_expiries {
            model.change_subkey_expiry(entry.key_id, Expiry::from(entry.expires), now)?;
        }
        Ok(())
    }

    /// Number of operations this plan describes.
    pub fn op_count(&self) -> usize {
        self.add_user_ids.len()
            + self.revoke_user_ids.len()
            + usize::from(self.primary_user_id.is_some())
            + self.add_subkeys.len()
            + self.revoke_subkeys.len()
            + self.change_expiries.len()
    }
}
