//! Volunteer postings published by organizers.
//!
//! A posting carries its remaining capacity in `volunteers_needed`. The
//! counter is decremented each time a request is accepted and is never
//! allowed below zero.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::{Contact, ContactValidationError};

/// Maximum accepted length for a posting title.
pub const TITLE_MAX: usize = 120;
/// Maximum accepted length for a posting description.
pub const DESCRIPTION_MAX: usize = 4000;

/// Identifier of a [`VolunteerPost`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
#[schema(value_type = String, format = Uuid)]
pub struct PostId(Uuid);

impl PostId {
    /// Generate a fresh random identifier.
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Validation errors returned by [`VolunteerPost::new`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PostValidationError {
    #[error("{field} must not be empty")]
    Blank { field: &'static str },
    #[error("{field} must be at most {max} characters")]
    TooLong { field: &'static str, max: usize },
    #[error("volunteersNeeded must not be negative (got {value})")]
    NegativeCapacity { value: i32 },
    #[error("organizer {0}")]
    Organizer(#[from] ContactValidationError),
}

impl PostValidationError {
    /// Name of the offending request field, as clients spell it.
    pub fn field(&self) -> &'static str {
        match self {
            Self::Blank { field } | Self::TooLong { field, .. } => field,
            Self::NegativeCapacity { .. } => "volunteersNeeded",
            Self::Organizer(_) => "organizer",
        }
    }
}

/// Input payload for [`VolunteerPost::new`].
#[derive(Debug, Clone)]
pub struct VolunteerPostDraft {
    pub thumbnail: String,
    pub title: String,
    pub description: String,
    pub category: String,
    pub location: String,
    pub volunteers_needed: i32,
    pub deadline: DateTime<Utc>,
    pub organizer: Contact,
}

/// A validated volunteer posting.
///
/// # Examples
/// ```
/// use chrono::Utc;
/// use volunteer_backend::domain::{Contact, PostId, VolunteerPost, VolunteerPostDraft};
///
/// let draft = VolunteerPostDraft {
///     thumbnail: "https://img.example/beach.png".into(),
///     title: "Beach clean-up".into(),
///     description: String::new(),
///     category: "environment".into(),
///     location: "Brighton".into(),
///     volunteers_needed: 4,
///     deadline: Utc::now(),
///     organizer: Contact::new("Ada", "ada@example.com").unwrap(),
/// };
/// let post = VolunteerPost::new(PostId::random(), draft).unwrap();
/// assert_eq!(post.volunteers_needed(), 4);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VolunteerPost {
    id: PostId,
    thumbnail: String,
    title: String,
    description: String,
    category: String,
    location: String,
    volunteers_needed: i32,
    deadline: DateTime<Utc>,
    organizer: Contact,
}

fn required(field: &'static str, value: String) -> Result<String, PostValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(PostValidationError::Blank { field });
    }
    Ok(trimmed.to_owned())
}

fn bounded(field: &'static str, value: String, max: usize) -> Result<String, PostValidationError> {
    if value.chars().count() > max {
        return Err(PostValidationError::TooLong { field, max });
    }
    Ok(value)
}

impl VolunteerPost {
    /// Validate a draft and bind it to `id`.
    ///
    /// # Errors
    /// Returns the first [`PostValidationError`] encountered, in field order.
    pub fn new(id: PostId, draft: VolunteerPostDraft) -> Result<Self, PostValidationError> {
        let VolunteerPostDraft {
            thumbnail,
            title,
            description,
            category,
            location,
            volunteers_needed,
            deadline,
            organizer,
        } = draft;

        let thumbnail = required("thumbnail", thumbnail)?;
        let title = bounded("title", required("title", title)?, TITLE_MAX)?;
        let description = bounded("description", description.trim().to_owned(), DESCRIPTION_MAX)?;
        let category = required("category", category)?;
        let location = required("location", location)?;
        if volunteers_needed < 0 {
            return Err(PostValidationError::NegativeCapacity {
                value: volunteers_needed,
            });
        }

        Ok(Self {
            id,
            thumbnail,
            title,
            description,
            category,
            location,
            volunteers_needed,
            deadline,
            organizer,
        })
    }

    pub fn id(&self) -> PostId {
        self.id
    }

    pub fn thumbnail(&self) -> &str {
        self.thumbnail.as_str()
    }

    pub fn title(&self) -> &str {
        self.title.as_str()
    }

    pub fn description(&self) -> &str {
        self.description.as_str()
    }

    pub fn category(&self) -> &str {
        self.category.as_str()
    }

    pub fn location(&self) -> &str {
        self.location.as_str()
    }

    /// Remaining capacity.
    pub fn volunteers_needed(&self) -> i32 {
        self.volunteers_needed
    }

    pub fn deadline(&self) -> DateTime<Utc> {
        self.deadline
    }

    pub fn organizer(&self) -> &Contact {
        &self.organizer
    }

    /// Whether at least one more request can be accepted.
    pub fn has_capacity(&self) -> bool {
        self.volunteers_needed > 0
    }

    /// Take one place, returning `false` when none are left.
    pub fn reserve_place(&mut self) -> bool {
        if !self.has_capacity() {
            return false;
        }
        self.volunteers_needed -= 1;
        true
    }

    /// Case-insensitive substring match on the title.
    ///
    /// An empty needle matches every posting.
    pub fn title_contains(&self, needle: &str) -> bool {
        needle.is_empty() || self.title.to_lowercase().contains(&needle.to_lowercase())
    }
}
