//! Email addresses identifying organizers and volunteers.
//!
//! The email is the only identity dimension in the service: tokens embed it,
//! postings and requests are owned by it, and the ownership guard compares
//! it verbatim.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Maximum accepted length for an email address.
pub const EMAIL_MAX: usize = 254;

/// Validation errors returned by [`Email::new`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EmailValidationError {
    /// Input was blank once trimmed.
    #[error("email must not be empty")]
    Empty,
    /// Input exceeded [`EMAIL_MAX`] characters.
    #[error("email must be at most {max} characters")]
    TooLong {
        /// Configured maximum length.
        max: usize,
    },
    /// Input did not look like `local@domain`.
    #[error("email must look like name@example.com")]
    Malformed,
}

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        // One `@`, non-empty parts, no whitespace anywhere.
        let pattern = r"^[^@\s]+@[^@\s]+$";
        Regex::new(pattern)
            .unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

/// Validated email address.
///
/// ## Invariants
/// - Surrounding whitespace is trimmed; the remainder is non-empty.
/// - Contains exactly one `@` with non-empty local and domain parts.
/// - Case is preserved. Equality is exact, which is what ownership checks
///   rely on.
///
/// # Examples
/// ```
/// use volunteer_backend::domain::Email;
///
/// let email = Email::new(" ada@example.com ").expect("valid email");
/// assert_eq!(email.as_ref(), "ada@example.com");
/// assert!(Email::new("not-an-email").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(try_from = "String", into = "String")]
#[schema(value_type = String, format = Email, example = "ada@example.com")]
pub struct Email(String);

impl Email {
    /// Validate and construct an [`Email`].
    ///
    /// # Errors
    /// Returns an [`EmailValidationError`] describing the first failed rule.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, EmailValidationError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(EmailValidationError::Empty);
        }
        if trimmed.chars().count() > EMAIL_MAX {
            return Err(EmailValidationError::TooLong { max: EMAIL_MAX });
        }
        if !email_regex().is_match(trimmed) {
            return Err(EmailValidationError::Malformed);
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<Email> for String {
    fn from(value: Email) -> Self {
        value.0
    }
}

impl TryFrom<String> for Email {
    type Error = EmailValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}
