use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque bearer credential issued by the identity provider.
///
/// The value never appears in `Debug` output so it cannot leak into logs.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionToken(String);

impl SessionToken {
    /// Wrap a raw token string.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Borrow the raw token, e.g. for an `Authorization` header.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SessionToken(<redacted>)")
    }
}

/// Identity resolved by the provider for a token.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserIdentity {
    /// Display handle, unique per provider account.
    pub handle: String,
    /// Payment-routable address.
    pub paymail: String,
}

impl UserIdentity {
    /// Build an identity from its parts.
    pub fn new(handle: impl Into<String>, paymail: impl Into<String>) -> Self {
        Self {
            handle: handle.into(),
            paymail: paymail.into(),
        }
    }
}

/// Identity and the token it was resolved from, as persisted between reloads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthenticatedSession {
    /// Who is signed in.
    pub user: UserIdentity,
    /// Provider token the identity was resolved from.
    pub token: SessionToken,
}

impl AuthenticatedSession {
    /// Pair an identity with its token.
    #[must_use]
    pub const fn new(user: UserIdentity, token: SessionToken) -> Self {
        Self { user, token }
    }
}
