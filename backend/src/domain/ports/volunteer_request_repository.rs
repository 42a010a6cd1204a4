//! Port abstraction for volunteer request persistence.
//!
//! Submitting a request reserves a place on its posting. Adapters must make
//! the reservation and the insert a single atomic unit.

use async_trait::async_trait;

use crate::domain::{Email, RequestId, VolunteerRequest};

use super::{DeleteOutcome, InsertOutcome, define_port_error};

define_port_error! {
    /// Errors raised by volunteer request repository adapters.
    pub enum VolunteerRequestRepositoryError {
        /// The referenced posting does not exist.
        PostNotFound { post_id: String } =>
            "volunteer post {post_id} does not exist",
        /// The referenced posting has no places left.
        NoCapacity { post_id: String } =>
            "volunteer post {post_id} has no remaining capacity",
        /// Repository connection could not be established.
        Connection { message: String } =>
            "volunteer request repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "volunteer request repository query failed: {message}",
    }
}

/// Port for submitting, listing, and withdrawing volunteer requests.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VolunteerRequestRepository: Send + Sync {
    /// Take one place on the referenced posting and store the request.
    ///
    /// Either both happen or neither does.
    async fn submit(
        &self,
        request: &VolunteerRequest,
    ) -> Result<InsertOutcome, VolunteerRequestRepositoryError>;

    /// Requests whose volunteer email equals `email` exactly.
    async fn list_by_volunteer(
        &self,
        email: &Email,
    ) -> Result<Vec<VolunteerRequest>, VolunteerRequestRepositoryError>;

    /// Delete a request by id. The posting's capacity is left unchanged.
    async fn delete(
        &self,
        id: &RequestId,
    ) -> Result<DeleteOutcome, VolunteerRequestRepositoryError>;
}
