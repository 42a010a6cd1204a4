//! Shared validation helpers for inbound HTTP adapters.
//!
//! Every helper produces an `invalid_request` error whose `details` carry the
//! offending `field` and a stable `code`, so clients can highlight inputs
//! without parsing messages.

use chrono::{DateTime, SubsecRound, Utc};
use serde_json::json;
use uuid::Uuid;

use crate::domain::{
    ContactValidationError, Email, EmailValidationError, Error, PostValidationError,
    RequestValidationError,
};

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    MissingField,
    InvalidUuid,
    InvalidTimestamp,
    InvalidEmail,
    InvalidField,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::MissingField => "missing_field",
            ErrorCode::InvalidUuid => "invalid_uuid",
            ErrorCode::InvalidTimestamp => "invalid_timestamp",
            ErrorCode::InvalidEmail => "invalid_email",
            ErrorCode::InvalidField => "invalid_field",
        }
    }
}

/// Newtype wrapper for HTTP field names to provide type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(&self) -> &str {
        self.0
    }
}

/// Builder for validation errors with field context.
struct ValidationError {
    field: String,
    message: String,
}

impl ValidationError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }

    fn with_code(self, code: ErrorCode) -> Error {
        Error::invalid_request(self.message).with_details(json!({
            "field": self.field,
            "code": code.as_str(),
        }))
    }

    fn with_value(self, code: ErrorCode, value: impl Into<String>) -> Error {
        Error::invalid_request(self.message).with_details(json!({
            "field": self.field,
            "value": value.into(),
            "code": code.as_str(),
        }))
    }
}

pub(crate) fn invalid_uuid_error(field: FieldName, value: &str) -> Error {
    let field = field.as_str();
    ValidationError::new(field, format!("{field} must be a valid UUID"))
        .with_value(ErrorCode::InvalidUuid, value)
}

pub(crate) fn parse_uuid(value: &str, field: FieldName) -> Result<Uuid, Error> {
    Uuid::parse_str(value).map_err(|_| invalid_uuid_error(field, value))
}

pub(crate) fn invalid_timestamp_error(field: FieldName, value: &str) -> Error {
    let field = field.as_str();
    ValidationError::new(field, format!("{field} must be an RFC 3339 timestamp"))
        .with_value(ErrorCode::InvalidTimestamp, value)
}

/// Timestamps keep microsecond precision, the finest PostgreSQL stores.
pub(crate) fn parse_rfc3339_timestamp(
    value: &str,
    field: FieldName,
) -> Result<DateTime<Utc>, Error> {
    DateTime::parse_from_rfc3339(value)
        .map(|timestamp| timestamp.with_timezone(&Utc).trunc_subsecs(6))
        .map_err(|_| invalid_timestamp_error(field, value))
}

fn email_error(field: &str, err: &EmailValidationError) -> Error {
    let code = match err {
        EmailValidationError::Empty => ErrorCode::MissingField,
        EmailValidationError::TooLong { .. } | EmailValidationError::Malformed => {
            ErrorCode::InvalidEmail
        }
    };
    ValidationError::new(field, format!("{field}: {err}")).with_code(code)
}

pub(crate) fn parse_email(value: &str, field: FieldName) -> Result<Email, Error> {
    Email::new(value).map_err(|err| email_error(field.as_str(), &err))
}

/// Map a contact failure under `prefix` (`organizer` or `volunteer`).
pub(crate) fn contact_error(prefix: FieldName, err: &ContactValidationError) -> Error {
    match err {
        ContactValidationError::EmptyName => {
            let field = format!("{}.name", prefix.as_str());
            ValidationError::new(field.clone(), format!("{field}: {err}"))
                .with_code(ErrorCode::MissingField)
        }
        ContactValidationError::NameTooLong { .. } => {
            let field = format!("{}.name", prefix.as_str());
            ValidationError::new(field.clone(), format!("{field}: {err}"))
                .with_code(ErrorCode::InvalidField)
        }
        ContactValidationError::Email(inner) => {
            email_error(&format!("{}.email", prefix.as_str()), inner)
        }
    }
}

pub(crate) fn post_error(err: &PostValidationError) -> Error {
    match err {
        PostValidationError::Organizer(inner) => contact_error(FieldName::new("organizer"), inner),
        PostValidationError::Blank { field } => {
            ValidationError::new(*field, err.to_string()).with_code(ErrorCode::MissingField)
        }
        PostValidationError::TooLong { .. } | PostValidationError::NegativeCapacity { .. } => {
            ValidationError::new(err.field(), err.to_string()).with_code(ErrorCode::InvalidField)
        }
    }
}

pub(crate) fn request_error(err: &RequestValidationError) -> Error {
    ValidationError::new(err.field(), err.to_string()).with_code(ErrorCode::InvalidField)
}
