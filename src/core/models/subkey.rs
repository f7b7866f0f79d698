use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::algorithm::{Algorithm, Curve, UsageFlags};

/// Defaults offered by selection UIs, named by value rather than by
/// position in some display list.
pub const DEFAULT_ALGORITHM: Algorithm = Algorithm::Rsa;
pub const DEFAULT_RSA_KEY_SIZE: u32 = 4096;
pub const DEFAULT_CURVE: Curve = Curve::NistP256;

/// When a key stops being usable: at a concrete instant, or never.
///
/// The wire form handed to backends is epoch seconds, with `0` standing
/// for "never expires".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Expiry {
    #[default]
    Never,
    On(DateTime<Utc>),
}

impl Expiry {
    /// Epoch seconds as the backend expects them; 0 means never.
    pub fn as_epoch_seconds(self) -> i64 {
        match self {
            Expiry::Never => 0,
            Expiry::On(at) => at.timestamp(),
        }
    }

    pub fn is_never(self) -> bool {
        matches!(self, Expiry::Never)
    }
}

impl From<Option<DateTime<Utc>>> for Expiry {
    fn from(value: Option<DateTime<Utc>>) -> Self {
        match value {
            Some(at) => Expiry::On(at),
            None => Expiry::Never,
        }
    }
}

impl std::fmt::Display for Expiry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Expiry::Never => write!(f, "never"),
            Expiry::On(at) => write!(f, "{}", at.format("%Y-%m-%d")),
        }
    }
}

impl Serialize for Expiry {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_i64(self.as_epoch_seconds())
    }
}

impl<'de> Deserialize<'de> for Expiry {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let seconds = i64::deserialize(deserializer)?;
        if seconds == 0 {
            return Ok(Expiry::Never);
        }
        match DateTime::from_timestamp(seconds, 0) {
            Some(at) => Ok(Expiry::On(at)),
            None => Err(serde::de::Error::custom(format!(
                "expiry timestamp out of range: {seconds}"
            ))),
        }
    }
}

/// Strength parameter for a new key: a bit length for RSA/DSA/ElGamal,
/// a named curve for ECDSA/ECDH. Exactly one applies per algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyParam {
    Size(u32),
    Curve(Curve),
}

/// A fully validated request to generate one new subkey (or primary key).
///
/// Only `SubkeyChangeSet::propose` builds these, so holding one means the
/// algorithm/strength/capability/expiry combination already passed
/// validation. `key_size` is the normalized length, not the requested one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SubkeyAddRequest {
    pub algorithm: Algorithm,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key_size: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub curve: Option<Curve>,
    pub usage: UsageFlags,
    pub expiry: Expiry,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn never_expiry_is_the_zero_sentinel() {
        assert_eq!(Expiry::Never.as_epoch_seconds(), 0);
        assert!(Expiry::Never.is_never());
    }

    #[test]
    fn dated_expiry_serializes_as_epoch_seconds() {
        let at = DateTime::from_timestamp(1_900_000_000, 0).unwrap();
        let json = serde_json::to_string(&Expiry::On(at)).unwrap();
        assert_eq!(json, "1900000000");

        let back: Expiry = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Expiry::On(at));
    }

    #[test]
    fn zero_deserializes_as_never() {
        let back: Expiry = serde_json::from_str("0").unwrap();
        assert_eq!(back, Expiry::Never);
    }
}
