//! Port abstraction for volunteer posting persistence.

use async_trait::async_trait;

use crate::domain::{Email, PostId, VolunteerPost};

use super::{DeleteOutcome, InsertOutcome, UpsertOutcome, define_port_error};

/// Number of postings returned by the soonest-deadline listing.
pub const SOONEST_LIMIT: usize = 6;

define_port_error! {
    /// Errors raised by volunteer posting repository adapters.
    pub enum VolunteerPostRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "volunteer post repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "volunteer post repository query failed: {message}",
    }
}

/// Port for storing and querying volunteer postings.
///
/// Listings are ordered by deadline, then id, so results are stable across
/// adapters.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VolunteerPostRepository: Send + Sync {
    /// Persist a new posting.
    async fn insert(
        &self,
        post: &VolunteerPost,
    ) -> Result<InsertOutcome, VolunteerPostRepositoryError>;

    /// Every posting.
    async fn list_all(&self) -> Result<Vec<VolunteerPost>, VolunteerPostRepositoryError>;

    /// Postings whose title contains `needle`, ignoring case.
    ///
    /// The needle is matched literally; an empty needle matches everything.
    async fn search_by_title(
        &self,
        needle: &str,
    ) -> Result<Vec<VolunteerPost>, VolunteerPostRepositoryError>;

    /// The `limit` postings with the earliest deadlines.
    async fn list_soonest(
        &self,
        limit: usize,
    ) -> Result<Vec<VolunteerPost>, VolunteerPostRepositoryError>;

    /// Fetch a posting by id.
    async fn find_by_id(
        &self,
        id: &PostId,
    ) -> Result<Option<VolunteerPost>, VolunteerPostRepositoryError>;

    /// Delete a posting by id.
    async fn delete(&self, id: &PostId) -> Result<DeleteOutcome, VolunteerPostRepositoryError>;

    /// Replace the posting stored under `post.id()`, inserting it when absent.
    async fn upsert(
        &self,
        post: &VolunteerPost,
    ) -> Result<UpsertOutcome, VolunteerPostRepositoryError>;

    /// Postings whose organizer email equals `email` exactly.
    async fn list_by_organizer(
        &self,
        email: &Email,
    ) -> Result<Vec<VolunteerPost>, VolunteerPostRepositoryError>;
}
