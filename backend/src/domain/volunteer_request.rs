//! Requests submitted by volunteers against a posting.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::{Contact, PostId};

/// Maximum accepted length for a request suggestion.
pub const SUGGESTION_MAX: usize = 2000;

/// Identifier of a [`VolunteerRequest`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
#[schema(value_type = String, format = Uuid)]
pub struct RequestId(Uuid);

impl RequestId {
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

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Lifecycle state of a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum RequestStatus {
    /// Submitted and holding a place on the posting.
    #[default]
    Requested,
}

impl RequestStatus {
    /// Stable storage representation.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Requested => "requested",
        }
    }
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown [`RequestStatus`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown request status: {0}")]
pub struct ParseRequestStatusError(pub String);

impl std::str::FromStr for RequestStatus {
    type Err = ParseRequestStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "requested" => Ok(Self::Requested),
            other => Err(ParseRequestStatusError(other.to_owned())),
        }
    }
}

/// Validation errors returned by [`VolunteerRequest::new`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RequestValidationError {
    #[error("suggestion must be at most {max} characters")]
    SuggestionTooLong { max: usize },
}

impl RequestValidationError {
    /// Name of the offending request field, as clients spell it.
    pub fn field(&self) -> &'static str {
        match self {
            Self::SuggestionTooLong { .. } => "suggestion",
        }
    }
}

/// Input payload for [`VolunteerRequest::new`].
#[derive(Debug, Clone)]
pub struct VolunteerRequestDraft {
    pub volunteer_post_id: PostId,
    pub volunteer: Contact,
    pub suggestion: String,
}

/// A volunteer's application against a posting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VolunteerRequest {
    id: RequestId,
    volunteer_post_id: PostId,
    volunteer: Contact,
    suggestion: String,
    status: RequestStatus,
    created_at: DateTime<Utc>,
}

impl VolunteerRequest {
    /// Validate a draft into a freshly submitted request.
    ///
    /// # Errors
    /// Returns [`RequestValidationError::SuggestionTooLong`] for oversized
    /// suggestions.
    pub fn new(
        id: RequestId,
        draft: VolunteerRequestDraft,
        created_at: DateTime<Utc>,
    ) -> Result<Self, RequestValidationError> {
        Self::restore(id, draft, RequestStatus::Requested, created_at)
    }

    /// Rebuild a request read back from storage.
    ///
    /// # Errors
    /// Applies the same validation as [`VolunteerRequest::new`].
    pub fn restore(
        id: RequestId,
        draft: VolunteerRequestDraft,
        status: RequestStatus,
        created_at: DateTime<Utc>,
    ) -> Result<Self, RequestValidationError> {
        let suggestion = draft.suggestion.trim().to_owned();
        if suggestion.chars().count() > SUGGESTION_MAX {
            return Err(RequestValidationError::SuggestionTooLong {
                max: SUGGESTION_MAX,
            });
        }
        Ok(Self {
            id,
            volunteer_post_id: draft.volunteer_post_id,
            volunteer: draft.volunteer,
            suggestion,
            status,
            created_at,
        })
    }

    pub fn id(&self) -> RequestId {
        self.id
    }

    pub fn volunteer_post_id(&self) -> PostId {
        self.volunteer_post_id
    }

    pub fn volunteer(&self) -> &Contact {
        &self.volunteer
    }

    pub fn suggestion(&self) -> &str {
        self.suggestion.as_str()
    }

    pub fn status(&self) -> RequestStatus {
        self.status
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};
    use serde_json::json;

    #[fixture]
    fn draft() -> VolunteerRequestDraft {
        VolunteerRequestDraft {
            volunteer_post_id: PostId::from_uuid(Uuid::nil()),
            volunteer: Contact::new("Grace", "g@x.com").expect("valid contact"),
            suggestion: " happy to drive ".into(),
        }
    }

    #[rstest]
    fn new_requests_start_requested(draft: VolunteerRequestDraft) {
        let request =
            VolunteerRequest::new(RequestId::random(), draft, Utc::now()).expect("valid draft");
        assert_eq!(request.status(), RequestStatus::Requested);
        assert_eq!(request.suggestion(), "happy to drive");
    }

    #[rstest]
    fn rejects_overlong_suggestion(mut draft: VolunteerRequestDraft) {
        draft.suggestion = "s".repeat(SUGGESTION_MAX + 1);
        let err = VolunteerRequest::new(RequestId::random(), draft, Utc::now())
            .expect_err("suggestion too long");
        assert_eq!(err.field(), "suggestion");
    }

    #[rstest]
    fn status_round_trips_through_storage_text() {
        let parsed: RequestStatus = "requested".parse().expect("known status");
        assert_eq!(parsed, RequestStatus::Requested);
        assert!("approved".parse::<RequestStatus>().is_err());
    }

    #[rstest]
    fn serialises_camel_case(draft: VolunteerRequestDraft) {
        let request =
            VolunteerRequest::new(RequestId::random(), draft, Utc::now()).expect("valid draft");
        let value = serde_json::to_value(&request).expect("serialise request");
        assert_eq!(
            value["volunteerPostId"],
            json!("00000000-0000-0000-0000-000000000000")
        );
        assert_eq!(value["status"], json!("requested"));
        assert_eq!(value["volunteer"]["email"], json!("g@x.com"));
        assert!(value.get("createdAt").is_some());
    }
}
