use serde::{Deserialize, Serialize};

/// Public-key algorithms a new key may be generated with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Algorithm {
    Rsa,
    Dsa,
    ElGamal,
    Ecdsa,
    Ecdh,
}

impl Algorithm {
    /// True when key strength is chosen by named curve rather than by
    /// bit length.
    pub fn uses_curve(self) -> bool {
        matches!(self, Algorithm::Ecdsa | Algorithm::Ecdh)
    }
}

impl std::fmt::Display for Algorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Algorithm::Rsa => "RSA",
            Algorithm::Dsa => "DSA",
            Algorithm::ElGamal => "ElGamal",
            Algorithm::Ecdsa => "ECDSA",
            Algorithm::Ecdh => "ECDH",
        };
        write!(f, "{name}")
    }
}

/// Named elliptic curves supported for ECDSA/ECDH keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Curve {
    #[serde(rename = "nist-p256")]
    NistP256,
    #[serde(rename = "nist-p384")]
    NistP384,
    #[serde(rename = "nist-p521")]
    NistP521,
}

impl std::fmt::Display for Curve {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Curve::NistP256 => "NIST P-256",
            Curve::NistP384 => "NIST P-384",
            Curve::NistP521 => "NIST P-521",
        };
        write!(f, "{name}")
    }
}

/// A single key capability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyUsage {
    Certify,
    Sign,
    Encrypt,
    Authenticate,
}

impl std::fmt::Display for KeyUsage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            KeyUsage::Certify => "certify",
            KeyUsage::Sign => "sign",
            KeyUsage::Encrypt => "encrypt",
            KeyUsage::Authenticate => "authenticate",
        };
        write!(f, "{name}")
    }
}

/// Whether the key under construction will be the keyring's primary key
/// or a subkey. Widens the capability table for algorithms that may
/// certify only from the primary slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyRole {
    Primary,
    Subkey,
}

impl KeyRole {
    pub fn is_primary(self) -> bool {
        matches!(self, KeyRole::Primary)
    }
}

/// The set of capabilities carried by a key.
///
/// Serialized as a list of capability names (`["sign", "encrypt"]`) in
/// both the TOML inputs and the exported transaction JSON.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UsageFlags {
    pub certify: bool,
    pub sign: bool,
    pub encrypt: bool,
    pub authenticate: bool,
}

impl UsageFlags {
    /// No capabilities at all. Illegal on any subkey-add; callers must
    /// set at least one flag before proposing.
    pub const fn empty() -> Self {
        UsageFlags {
            certify: false,
            sign: false,
            encrypt: false,
            authenticate: false,
        }
    }

    pub fn is_empty(&self) -> bool {
        !(self.certify || self.sign || self.encrypt || self.authenticate)
    }

    pub fn contains(&self, usage: KeyUsage) -> bool {
        match usage {
            KeyUsage::Certify => self.certify,
            KeyUsage::Sign => self.sign,
            KeyUsage::Encrypt => self.encrypt,
            KeyUsage::Authenticate => self.authenticate,
        }
    }

    /// Builder-style setter, mainly for tests and defaults.
    pub fn with(mut self, usage: KeyUsage) -> Self {
        match usage {
            KeyUsage::Certify => self.certify = true,
            KeyUsage::Sign => self.sign = true,
            KeyUsage::Encrypt => self.encrypt = true,
            KeyUsage::Authenticate => self.authenticate = true,
        }
        self
    }

    /// Iterate over the set flags, in fixed certify/sign/encrypt/authenticate order.
    pub fn iter(&self) -> impl Iterator<Item = KeyUsage> + '_ {
        [
            KeyUsage::Certify,
            KeyUsage::Sign,
            KeyUsage::Encrypt,
            KeyUsage::Authenticate,
        ]
        .into_iter()
        .filter(|usage| self.contains(*usage))
    }
}

impl FromIterator<KeyUsage> for UsageFlags {
    fn from_iter<I: IntoIterator<Item = KeyUsage>>(iter: I) -> Self {
        iter.into_iter()
            .fold(UsageFlags::empty(), |flags, usage| flags.with(usage))
    }
}

impl Serialize for UsageFlags {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}

impl<'de> Deserialize<'de> for UsageFlags {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let usages = Vec::<KeyUsage>::deserialize(deserializer)?;
        Ok(usages.into_iter().collect())
    }
}

impl std::fmt::Display for UsageFlags {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<String> = self.iter().map(|usage| usage.to_string()).collect();
        write!(f, "{}", names.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_flags_contain_nothing() {
        let flags = UsageFlags::empty();
        assert!(flags.is_empty());
        assert_eq!(flags.iter().count(), 0);
    }

    #[test]
    fn with_sets_single_flags() {
        let flags = UsageFlags::empty().with(KeyUsage::Sign).with(KeyUsage::Encrypt);
        assert!(flags.contains(KeyUsage::Sign));
        assert!(flags.contains(KeyUsage::Encrypt));
        assert!(!flags.contains(KeyUsage::Certify));
        assert!(!flags.is_empty());
    }

    #[test]
    fn iter_uses_fixed_order() {
        let flags = UsageFlags::empty()
            .with(KeyUsage::Authenticate)
            .with(KeyUsage::Certify);
        let order: Vec<KeyUsage> = flags.iter().collect();
        assert_eq!(order, vec![KeyUsage::Certify, KeyUsage::Authenticate]);
    }

    #[test]
    fn flags_round_trip_as_name_list() {
        let flags = UsageFlags::empty().with(KeyUsage::Sign).with(KeyUsage::Authenticate);
        let json = serde_json::to_string(&flags).unwrap();
        assert_eq!(json, r#"["sign","authenticate"]"#);

        let back: UsageFlags = serde_json::from_str(&json).unwrap();
        assert_eq!(back, flags);
    }
}
