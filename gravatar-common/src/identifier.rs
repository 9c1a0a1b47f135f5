//! Opaque identifiers used to address profiles and avatars.

use std::fmt;

use crate::hash::hash_email;

/// Identifies a Gravatar profile.
///
/// Emails are hashed on construction, so the raw address never leaves this
/// value. The resulting [`id`](ProfileIdentifier::id) is what goes into the
/// request path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProfileIdentifier {
    kind: IdentifierKind,
    id: String,
}

/// How a [`ProfileIdentifier`] was built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IdentifierKind {
    /// Hash of a normalized email address.
    Email,
    /// A precomputed identifier hash.
    HashId,
    /// A profile username (slug).
    Username,
}

impl ProfileIdentifier {
    /// Identify a profile by email. The email is normalized and hashed.
    pub fn email(email: impl AsRef<str>) -> Self {
        Self {
            kind: IdentifierKind::Email,
            id: hash_email(email.as_ref()),
        }
    }

    /// Identify a profile by an already computed hash.
    pub fn hash_id(hash: impl Into<String>) -> Self {
        Self {
            kind: IdentifierKind::HashId,
            id: hash.into(),
        }
    }

    /// Identify a profile by its username.
    pub fn username(username: impl Into<String>) -> Self {
        Self {
            kind: IdentifierKind::Username,
            id: username.into(),
        }
    }

    /// The value used as a path segment or query value.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// How this identifier was built.
    pub fn kind(&self) -> IdentifierKind {
        self.kind
    }
}

impl fmt::Display for ProfileIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.id)
    }
}
