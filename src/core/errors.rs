use std::path::PathBuf;

use chrono::{DateTime, Utc};

use crate::core::models::algorithm::{Algorithm, KeyUsage};

/// All domain errors for Keywright.
///
/// Every validation failure is local: the call that produced it returns
/// the error and leaves the edit model unchanged.
#[derive(Debug, thiserror::Error)]
pub enum KeywrightError {
    #[error(
        "Invalid key length for {algorithm}: {requested} bits\n\n  \
         Legal ranges:\n    \
         → RSA: more than 1024 and at most 16384 bits\n    \
         → DSA: 512 to 1024 bits\n  \
         Lengths inside the range are rounded up to the algorithm's block size."
    )]
    InvalidKeyLength { algorithm: Algorithm, requested: u32 },

    #[error("The '{flag}' capability is not available for {algorithm} keys")]
    IllegalUsageFlag { algorithm: Algorithm, flag: KeyUsage },

    #[error(
        "No key capability selected\n\n  \
         Select at least one of: certify, sign, encrypt, authenticate."
    )]
    NoUsageFlagSelected,

    #[error(
        "Expiry date {requested} is too early\n\n  \
         An expiry date must be at least one day in the future,\n  \
         or omitted entirely for a key that never expires."
    )]
    InvalidExpiry { requested: DateTime<Utc> },

    #[error("{algorithm} keys take a {expected}, but a {given} was given")]
    ParameterMismatch {
        algorithm: Algorithm,
        expected: &'static str,
        given: &'static str,
    },

    #[error("User id '{user_id}' does not exist on this keyring")]
    UnknownUserId { user_id: String },

    #[error("User id '{user_id}' already exists on this keyring or is already queued")]
    DuplicateUserId { user_id: String },

    #[error("Subkey 0x{key_id:016X} does not exist on this keyring")]
    UnknownSubkey { key_id: u64 },

    #[error(
        "File not found: {path}\n\n  \
         Check that the path is correct and the file exists."
    )]
    FileNotFound { path: PathBuf },

    #[error("Parse error in {file}: {detail}")]
    ParseError { file: PathBuf, detail: String },

    #[error("Backend '{backend}' unavailable: {detail}")]
    BackendUnavailable { backend: String, detail: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, KeywrightError>;
