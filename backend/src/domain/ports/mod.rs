//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod identity_tokens;
mod volunteer_post_repository;
mod volunteer_request_repository;
mod write_outcome;

#[cfg(test)]
pub use identity_tokens::MockIdentityTokens;
pub use identity_tokens::{IdentityTokenError, IdentityTokens};
#[cfg(test)]
pub use volunteer_post_repository::MockVolunteerPostRepository;
pub use volunteer_post_repository::{
    SOONEST_LIMIT, VolunteerPostRepository, VolunteerPostRepositoryError,
};
#[cfg(test)]
pub use volunteer_request_repository::MockVolunteerRequestRepository;
pub use volunteer_request_repository::{
    VolunteerRequestRepository, VolunteerRequestRepositoryError,
};
pub use write_outcome::{DeleteOutcome, InsertOutcome, UpsertOutcome};
