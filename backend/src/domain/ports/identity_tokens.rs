//! Port for issuing and validating signed identity tokens.
//!
//! Validation is synchronous so that the ownership decision always sees its
//! outcome.

use crate::domain::{Email, Identity, IssuedToken};

use super::define_port_error;

define_port_error! {
    /// Errors raised by identity token adapters.
    pub enum IdentityTokenError {
        /// Token could not be decoded or its signature did not verify.
        Invalid { message: String } => "identity token rejected: {message}",
        /// Token was valid once but its expiry has passed.
        Expired => "identity token expired",
        /// Signing a new token failed.
        Signing { message: String } => "identity token signing failed: {message}",
    }
}

/// Issue and validate identity tokens asserting a caller email.
#[cfg_attr(test, mockall::automock)]
pub trait IdentityTokens: Send + Sync {
    /// Sign a token for `email` valid for the configured lifetime.
    fn issue(&self, email: &Email) -> Result<IssuedToken, IdentityTokenError>;

    /// Verify a compact token and return the identity it asserts.
    fn validate(&self, token: &str) -> Result<Identity, IdentityTokenError>;
}
