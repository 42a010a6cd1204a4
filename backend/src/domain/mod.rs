//! Domain primitives and aggregates.
//!
//! Purpose: Define strongly typed domain entities used by the API and
//! persistence layers. Keep types immutable and document invariants and
//! serialisation contracts (serde) in each type's Rustdoc.
//!
//! Public surface:
//! - Error (alias to `error::Error`) — API error response payload.
//! - Email — ownership key carried by identity tokens.
//! - VolunteerPost / VolunteerRequest — the two stored aggregates.
//! - ensure_owner — the owner-scoped listing rule.

pub mod contact;
pub mod email;
pub mod error;
pub mod identity;
pub mod ownership;
pub mod ports;
pub mod trace_id;
pub mod volunteer_post;
pub mod volunteer_request;

pub use self::contact::{CONTACT_NAME_MAX, Contact, ContactValidationError};
pub use self::email::{EMAIL_MAX, Email, EmailValidationError};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::identity::{Identity, IssuedToken, TOKEN_LIFETIME_DAYS, token_lifetime};
pub use self::ownership::{UNAUTHORIZED_MESSAGE, ensure_owner};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::volunteer_post::{
    DESCRIPTION_MAX, PostId, PostValidationError, TITLE_MAX, VolunteerPost, VolunteerPostDraft,
};
pub use self::volunteer_request::{
    ParseRequestStatusError, RequestId, RequestStatus, RequestValidationError, SUGGESTION_MAX,
    VolunteerRequest, VolunteerRequestDraft,
};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use volunteer_backend::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<()> {
///     Err(Error::unauthorized("unauthorized access"))
/// }
/// assert!(handler().is_err());
/// ```
pub type ApiResult<T> = Result<T, Error>;
