//! HS256 JWT implementation of the identity token port.
//!
//! Tokens carry `{ email, iat, exp }`. Expiry is checked against the injected
//! clock rather than the library's wall-clock check, so tests can move time.

use std::sync::Arc;

use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::ports::{IdentityTokenError, IdentityTokens};
use crate::domain::{Email, Identity, IssuedToken, token_lifetime};

/// Claims embedded in every identity token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct IdentityClaims {
    pub email: String,
    pub iat: i64,
    pub exp: i64,
}

/// JWT signing and verification keys derived from one shared secret.
struct Keys {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl Keys {
    fn new(secret: &[u8]) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
        }
    }
}

/// Signs and validates identity tokens with a server-held HMAC secret.
pub struct JwtIdentityTokens {
    keys: Keys,
    validation: Validation,
    clock: Arc<dyn Clock>,
}

impl JwtIdentityTokens {
    /// Build the adapter from raw secret bytes.
    ///
    /// The caller keeps ownership of `secret` and is expected to zeroize it.
    pub fn new(secret: &[u8], clock: Arc<dyn Clock>) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp"]);
        Self {
            keys: Keys::new(secret),
            validation,
            clock,
        }
    }
}

impl std::fmt::Debug for JwtIdentityTokens {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtIdentityTokens").finish_non_exhaustive()
    }
}

impl IdentityTokens for JwtIdentityTokens {
    fn issue(&self, email: &Email) -> Result<IssuedToken, IdentityTokenError> {
        let now = self.clock.utc();
        let expires_at = now + token_lifetime();
        let claims = IdentityClaims {
            email: email.to_string(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        };
        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.keys.encoding)
            .map_err(|err| IdentityTokenError::signing(err.to_string()))?;
        Ok(IssuedToken::new(token, expires_at))
    }

    fn validate(&self, token: &str) -> Result<Identity, IdentityTokenError> {
        let data = decode::<IdentityClaims>(token, &self.keys.decoding, &self.validation)
            .map_err(|err| {
                debug!(error = %err, "identity token failed verification");
                IdentityTokenError::invalid(err.to_string())
            })?;
        let claims = data.claims;
        if self.clock.utc().timestamp() >= claims.exp {
            return Err(IdentityTokenError::expired());
        }
        let email = Email::new(&claims.email)
            .map_err(|err| IdentityTokenError::invalid(format!("embedded email: {err}")))?;
        Ok(Identity::new(email))
    }
}
