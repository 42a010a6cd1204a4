//! Ownership guard for owner-scoped routes.
//!
//! [`AuthenticatedIdentity`] is an extractor: it reads the `token` cookie and
//! validates it before the handler body runs. Handlers then call
//! [`AuthenticatedIdentity::require_owner`] with the email from the path.
//! Every failure is the same `401 unauthorized access`.

use actix_web::{FromRequest, HttpRequest, dev::Payload, web};
use futures_util::future::{Ready, ready};
use tracing::{debug, error};

use crate::domain::{Email, Error, Identity, UNAUTHORIZED_MESSAGE, ensure_owner};

use super::identity_cookie::TOKEN_COOKIE;
use super::state::HttpState;

/// Identity resolved from a valid `token` cookie.
#[derive(Debug, Clone)]
pub struct AuthenticatedIdentity(Identity);

impl AuthenticatedIdentity {
    /// Return the owner email when it matches the token exactly.
    ///
    /// # Errors
    /// `401 unauthorized access` on any mismatch.
    pub fn require_owner(&self, requested_owner: &str) -> Result<Email, Error> {
        ensure_owner(&self.0, requested_owner)
    }
}

fn unauthorized() -> Error {
    Error::unauthorized(UNAUTHORIZED_MESSAGE)
}

fn authenticate(req: &HttpRequest) -> Result<AuthenticatedIdentity, Error> {
    let Some(state) = req.app_data::<web::Data<HttpState>>() else {
        error!("http state missing from app data");
        return Err(Error::internal("http state is not configured"));
    };

    let Some(cookie) = req.cookie(TOKEN_COOKIE) else {
        debug!("identity cookie absent");
        return Err(unauthorized());
    };
    if cookie.value().is_empty() {
        debug!("identity cookie empty");
        return Err(unauthorized());
    }

    state
        .tokens
        .validate(cookie.value())
        .map(AuthenticatedIdentity)
        .map_err(|err| {
            debug!(error = %err, "identity token rejected");
            Error::from(err)
        })
}

impl FromRequest for AuthenticatedIdentity {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(authenticate(req))
    }
}

#[cfg(test)]
mod tests;
