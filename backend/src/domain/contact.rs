//! Name and email pair attached to postings and requests.

use serde::Serialize;
use utoipa::ToSchema;

use super::{Email, EmailValidationError};

/// Maximum accepted length for a contact name.
pub const CONTACT_NAME_MAX: usize = 120;

/// Validation errors returned by [`Contact::new`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ContactValidationError {
    #[error("name must not be empty")]
    EmptyName,
    #[error("name must be at most {max} characters")]
    NameTooLong { max: usize },
    #[error(transparent)]
    Email(#[from] EmailValidationError),
}

/// Organizer of a posting or volunteer behind a request.
///
/// The email is the ownership key for owner-scoped listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct Contact {
    name: String,
    email: Email,
}

impl Contact {
    /// Validate a name and raw email into a [`Contact`].
    ///
    /// # Errors
    /// Returns [`ContactValidationError`] when the name is blank or too long,
    /// or the email is rejected.
    pub fn new(
        name: impl AsRef<str>,
        email: impl AsRef<str>,
    ) -> Result<Self, ContactValidationError> {
        let name = name.as_ref().trim();
        if name.is_empty() {
            return Err(ContactValidationError::EmptyName);
        }
        if name.chars().count() > CONTACT_NAME_MAX {
            return Err(ContactValidationError::NameTooLong {
                max: CONTACT_NAME_MAX,
            });
        }
        let email = Email::new(email)?;
        Ok(Self {
            name: name.to_owned(),
            email,
        })
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    pub fn email(&self) -> &Email {
        &self.email
    }
}
