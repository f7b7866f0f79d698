use serde::{Deserialize, Serialize};

/// Trust tier of a user id's binding signature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VerificationStatus {
    /// Certified by a secret key we hold.
    #[serde(rename = "secret")]
    VerifiedBySecret,
    /// Carries only its own self-signature.
    #[serde(rename = "self")]
    SelfSigned,
    /// No valid binding signature.
    #[serde(rename = "invalid")]
    Invalid,
}

impl std::fmt::Display for VerificationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            VerificationStatus::VerifiedBySecret => "verified",
            VerificationStatus::SelfSigned => "self-signed",
            VerificationStatus::Invalid => "invalid",
        };
        write!(f, "{name}")
    }
}

/// One user id row from the keyring, as loaded from storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserIdentity {
    /// The raw user id string, e.g. `Alice (work) <alice@example.org>`.
    /// This is the key every pending operation references it by.
    pub raw: String,
    #[serde(default)]
    pub revoked: bool,
    #[serde(default)]
    pub primary: bool,
    pub verification: VerificationStatus,
}

impl UserIdentity {
    /// Split the raw string into its display parts.
    pub fn split(&self) -> SplitUserId {
        split_user_id(&self.raw)
    }
}

/// Name, comment, and email parts split out of a raw OpenPGP user id.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SplitUserId {
    pub name: Option<String>,
    pub comment: Option<String>,
    pub email: Option<String>,
}

/// Split a raw user id of the form `Name (Comment) <email>` into its
/// parts. Every part is optional; malformed trailing sections are left
/// attached to the name rather than guessed at.
pub fn split_user_id(raw: &str) -> SplitUserId {
    let mut rest = raw.trim();

    // Trailing ` <email>` section.
    let mut email = None;
    if rest.ends_with('>') {
        if let Some(start) = rest.rfind(" <") {
            email = Some(rest[start + 2..rest.len() - 1].to_string());
            rest = &rest[..start];
        }
    }

    // Trailing ` (comment)` section, before the email.
    let mut comment = None;
    if rest.ends_with(')') {
        if let Some(start) = rest.rfind(" (") {
            comment = Some(rest[start + 2..rest.len() - 1].to_string());
            rest = &rest[..start];
        }
    }

    let name = if rest.is_empty() {
        None
    } else {
        Some(rest.to_string())
    };

    SplitUserId {
        name,
        comment,
        email,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_full_user_id() {
        let parts = split_user_id("Alice Example (work) <alice@example.org>");
        assert_eq!(parts.name.as_deref(), Some("Alice Example"));
        assert_eq!(parts.comment.as_deref(), Some("work"));
        assert_eq!(parts.email.as_deref(), Some("alice@example.org"));
    }

    #[test]
    fn splits_name_and_email() {
        let parts = split_user_id("Bob <bob@example.org>");
        assert_eq!(parts.name.as_deref(), Some("Bob"));
        assert_eq!(parts.comment, None);
        assert_eq!(parts.email.as_deref(), Some("bob@example.org"));
    }

    #[test]
    fn splits_name_only() {
        let parts = split_user_id("Carol");
        assert_eq!(parts.name.as_deref(), Some("Carol"));
        assert_eq!(parts.comment, None);
        assert_eq!(parts.email, None);
    }

    #[test]
    fn bare_angle_brackets_stay_in_the_name() {
        // No space before `<`, so there is no email section to split off.
        let parts = split_user_id("<dave@example.org>");
        assert_eq!(parts.name.as_deref(), Some("<dave@example.org>"));
        assert_eq!(parts.email, None);
    }

    #[test]
    fn comment_without_email() {
        let parts = split_user_id("Erin (backup)");
        assert_eq!(parts.name.as_deref(), Some("Erin"));
        assert_eq!(parts.comment.as_deref(), Some("backup"));
        assert_eq!(parts.email, None);
    }

    #[test]
    fn empty_string_has_no_parts() {
        assert_eq!(split_user_id(""), SplitUserId::default());
    }
}
