//! Authenticated identity and issued token primitives.

use chrono::{DateTime, Duration, Utc};

use super::Email;

/// Validity window for issued identity tokens.
pub const TOKEN_LIFETIME_DAYS: i64 = 365;

/// Validity window for issued identity tokens as a [`Duration`].
pub fn token_lifetime() -> Duration {
    Duration::days(TOKEN_LIFETIME_DAYS)
}

/// Identity decoded from a valid token.
///
/// Tokens assert an email and nothing else; there are no roles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    email: Email,
}

impl Identity {
    /// Wrap an already validated email.
    pub fn new(email: Email) -> Self {
        Self { email }
    }

    /// The authenticated email.
    pub fn email(&self) -> &Email {
        &self.email
    }
}

/// Freshly signed token plus the instant it stops validating.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedToken {
    token: String,
    expires_at: DateTime<Utc>,
}

impl IssuedToken {
    /// Pair a compact token with its expiry.
    pub fn new(token: impl Into<String>, expires_at: DateTime<Utc>) -> Self {
        Self {
            token: token.into(),
            expires_at,
        }
    }

    /// Compact token string suitable for the `token` cookie.
    pub fn token(&self) -> &str {
        self.token.as_str()
    }

    /// Instant at which validation starts failing.
    pub fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }
}
