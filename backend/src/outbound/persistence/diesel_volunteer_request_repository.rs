//! PostgreSQL-backed `VolunteerRequestRepository` implementation.
//!
//! Submission runs in one transaction: a conditional decrement of the
//! posting's capacity (`volunteers_needed > 0`) followed by the insert.
//! Concurrent submissions serialize on the posting row, so capacity cannot
//! be oversubscribed.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};
use tracing::debug;

use crate::domain::ports::{
    DeleteOutcome, InsertOutcome, VolunteerRequestRepository, VolunteerRequestRepositoryError,
};
use crate::domain::{
    Contact, Email, PostId, RequestId, RequestStatus, VolunteerRequest, VolunteerRequestDraft,
};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{NewVolunteerRequestRow, VolunteerRequestRow};
use super::pool::{DbPool, PoolError};
use super::schema::{volunteer_posts, volunteer_requests};

/// Diesel-backed implementation of the volunteer request repository port.
#[derive(Clone)]
pub struct DieselVolunteerRequestRepository {
    pool: DbPool,
}

impl DieselVolunteerRequestRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> VolunteerRequestRepositoryError {
    map_basic_pool_error(error, VolunteerRequestRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> VolunteerRequestRepositoryError {
    map_basic_diesel_error(
        error,
        VolunteerRequestRepositoryError::query,
        VolunteerRequestRepositoryError::connection,
    )
}

/// Result of the reservation transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Reservation {
    Inserted,
    PostMissing,
    PostFull,
}

fn row_to_request(
    row: VolunteerRequestRow,
) -> Result<VolunteerRequest, VolunteerRequestRepositoryError> {
    let VolunteerRequestRow {
        id,
        volunteer_post_id,
        volunteer_name,
        volunteer_email,
        suggestion,
        status,
        created_at,
    } = row;

    let volunteer = Contact::new(volunteer_name, volunteer_email).map_err(|err| {
        VolunteerRequestRepositoryError::query(format!("stored volunteer: {err}"))
    })?;
    let status: RequestStatus = status
        .parse()
        .map_err(|err| VolunteerRequestRepositoryError::query(format!("stored status: {err}")))?;

    VolunteerRequest::restore(
        RequestId::from_uuid(id),
        VolunteerRequestDraft {
            volunteer_post_id: PostId::from_uuid(volunteer_post_id),
            volunteer,
            suggestion,
        },
        status,
        created_at,
    )
    .map_err(|err| VolunteerRequestRepositoryError::query(format!("stored request: {err}")))
}

#[async_trait]
impl VolunteerRequestRepository for DieselVolunteerRequestRepository {
    async fn submit(
        &self,
        request: &VolunteerRequest,
    ) -> Result<InsertOutcome, VolunteerRequestRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let post_id = *request.volunteer_post_id().as_uuid();
        let row = NewVolunteerRequestRow {
            id: *request.id().as_uuid(),
            volunteer_post_id: post_id,
            volunteer_name: request.volunteer().name(),
            volunteer_email: request.volunteer().email().as_ref(),
            suggestion: request.suggestion(),
            status: request.status().as_str(),
            created_at: request.created_at(),
        };

        let reservation = conn
            .transaction(|conn| {
                async move {
                    let reserved = diesel::update(
                        volunteer_posts::table.filter(
                            volunteer_posts::id
                                .eq(post_id)
                                .and(volunteer_posts::volunteers_needed.gt(0)),
                        ),
                    )
                    .set(volunteer_posts::volunteers_needed.eq(volunteer_posts::volunteers_needed - 1))
                    .execute(conn)
                    .await?;

                    if reserved == 0 {
                        let exists: bool = diesel::select(diesel::dsl::exists(
                            volunteer_posts::table.filter(volunteer_posts::id.eq(post_id)),
                        ))
                        .get_result(conn)
                        .await?;
                        return Ok(if exists {
                            Reservation::PostFull
                        } else {
                            Reservation::PostMissing
                        });
                    }

                    diesel::insert_into(volunteer_requests::table)
                        .values(&row)
                        .execute(conn)
                        .await?;
                    Ok(Reservation::Inserted)
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel_error)?;

        match reservation {
            Reservation::Inserted => Ok(InsertOutcome::new(*request.id().as_uuid())),
            Reservation::PostMissing => {
                debug!(%post_id, "request references unknown posting");
                Err(VolunteerRequestRepositoryError::post_not_found(post_id.to_string()))
            }
            Reservation::PostFull => {
                debug!(%post_id, "request rejected, posting is full");
                Err(VolunteerRequestRepositoryError::no_capacity(post_id.to_string()))
            }
        }
    }

    async fn list_by_volunteer(
        &self,
        email: &Email,
    ) -> Result<Vec<VolunteerRequest>, VolunteerRequestRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<VolunteerRequestRow> = volunteer_requests::table
            .filter(volunteer_requests::volunteer_email.eq(email.as_ref()))
            .order((volunteer_requests::created_at.asc(), volunteer_requests::id.asc()))
            .select(VolunteerRequestRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map(row_to_request).collect()
    }

    async fn delete(
        &self,
        id: &RequestId,
    ) -> Result<DeleteOutcome, VolunteerRequestRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows = diesel::delete(
            volunteer_requests::table.filter(volunteer_requests::id.eq(id.as_uuid())),
        )
        .execute(&mut conn)
        .await
        .map_err(map_diesel_error)?;

        Ok(DeleteOutcome::from_rows(rows))
    }
}
