//! Ownership rule shared by every owner-scoped listing.
//!
//! A caller may read a collection slice only when the owner named in the
//! route is exactly the email in their token. There is no other
//! authorization dimension.

use tracing::debug;

use super::{Email, Error, Identity};

/// Message returned for every ownership or authentication failure.
pub const UNAUTHORIZED_MESSAGE: &str = "unauthorized access";

/// Return the owner email when `requested_owner` matches the identity.
///
/// The comparison is on the raw path value, so a malformed path email can
/// never match and is rejected with the same `401` as a mismatch.
///
/// # Errors
/// Returns an [`ErrorCode::Unauthorized`](super::ErrorCode::Unauthorized)
/// error on any mismatch.
///
/// # Examples
/// ```
/// use volunteer_backend::domain::{ensure_owner, Email, Identity};
///
/// let identity = Identity::new(Email::new("a@x.com").unwrap());
/// assert!(ensure_owner(&identity, "a@x.com").is_ok());
/// assert!(ensure_owner(&identity, "b@x.com").is_err());
/// ```
pub fn ensure_owner(identity: &Identity, requested_owner: &str) -> Result<Email, Error> {
    if identity.email().as_ref() == requested_owner {
        Ok(identity.email().clone())
    } else {
        debug!(
            token_email = %identity.email(),
            requested_owner,
            "ownership check rejected"
        );
        Err(Error::unauthorized(UNAUTHORIZED_MESSAGE))
    }
}
