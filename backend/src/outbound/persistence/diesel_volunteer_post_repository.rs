//! PostgreSQL-backed `VolunteerPostRepository` implementation using Diesel ORM.
//!
//! Rows are converted back through the validated domain constructors, so a
//! row that no longer satisfies the posting rules surfaces as a query error.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};
use tracing::debug;

use crate::domain::ports::{
    DeleteOutcome, InsertOutcome, UpsertOutcome, VolunteerPostRepository,
    VolunteerPostRepositoryError,
};
use crate::domain::{Contact, Email, PostId, VolunteerPost, VolunteerPostDraft};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{NewVolunteerPostRow, VolunteerPostRow, VolunteerPostUpdate};
use super::pool::{DbPool, PoolError};
use super::schema::volunteer_posts;

/// Diesel-backed implementation of the volunteer posting repository port.
#[derive(Clone)]
pub struct DieselVolunteerPostRepository {
    pool: DbPool,
}

impl DieselVolunteerPostRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> VolunteerPostRepositoryError {
    map_basic_pool_error(error, VolunteerPostRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> VolunteerPostRepositoryError {
    map_basic_diesel_error(
        error,
        VolunteerPostRepositoryError::query,
        VolunteerPostRepositoryError::connection,
    )
}

/// Escape `LIKE` metacharacters so the needle matches literally.
pub(crate) fn escape_like(needle: &str) -> String {
    let mut escaped = String::with_capacity(needle.len() + 2);
    for ch in needle.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

fn row_to_post(row: VolunteerPostRow) -> Result<VolunteerPost, VolunteerPostRepositoryError> {
    let VolunteerPostRow {
        id,
        thumbnail,
        title,
        description,
        category,
        location,
        volunteers_needed,
        deadline,
        organizer_name,
        organizer_email,
    } = row;

    let organizer = Contact::new(organizer_name, organizer_email)
        .map_err(|err| VolunteerPostRepositoryError::query(format!("stored organizer: {err}")))?;
    VolunteerPost::new(
        PostId::from_uuid(id),
        VolunteerPostDraft {
            thumbnail,
            title,
            description,
            category,
            location,
            volunteers_needed,
            deadline,
            organizer,
        },
    )
    .map_err(|err| VolunteerPostRepositoryError::query(format!("stored post: {err}")))
}

fn rows_to_posts(
    rows: Vec<VolunteerPostRow>,
) -> Result<Vec<VolunteerPost>, VolunteerPostRepositoryError> {
    rows.into_iter().map(row_to_post).collect()
}

fn new_row(post: &VolunteerPost) -> NewVolunteerPostRow<'_> {
    NewVolunteerPostRow {
        id: *post.id().as_uuid(),
        thumbnail: post.thumbnail(),
        title: post.title(),
        description: post.description(),
        category: post.category(),
        location: post.location(),
        volunteers_needed: post.volunteers_needed(),
        deadline: post.deadline(),
        organizer_name: post.organizer().name(),
        organizer_email: post.organizer().email().as_ref(),
    }
}

fn update_row(post: &VolunteerPost) -> VolunteerPostUpdate<'_> {
    VolunteerPostUpdate {
        thumbnail: post.thumbnail(),
        title: post.title(),
        description: post.description(),
        category: post.category(),
        location: post.location(),
        volunteers_needed: post.volunteers_needed(),
        deadline: post.deadline(),
        organizer_name: post.organizer().name(),
        organizer_email: post.organizer().email().as_ref(),
    }
}

fn row_differs(row: &VolunteerPostRow, update: &VolunteerPostUpdate<'_>) -> bool {
    row.thumbnail != update.thumbnail
        || row.title != update.title
        || row.description != update.description
        || row.category != update.category
        || row.location != update.location
        || row.volunteers_needed != update.volunteers_needed
        || row.deadline != update.deadline
        || row.organizer_name != update.organizer_name
        || row.organizer_email != update.organizer_email
}

#[async_trait]
impl VolunteerPostRepository for DieselVolunteerPostRepository {
    async fn insert(
        &self,
        post: &VolunteerPost,
    ) -> Result<InsertOutcome, VolunteerPostRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::insert_into(volunteer_posts::table)
            .values(&new_row(post))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(InsertOutcome::new(*post.id().as_uuid()))
    }

    async fn list_all(&self) -> Result<Vec<VolunteerPost>, VolunteerPostRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<VolunteerPostRow> = volunteer_posts::table
            .order((volunteer_posts::deadline.asc(), volunteer_posts::id.asc()))
            .select(VolunteerPostRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows_to_posts(rows)
    }

    async fn search_by_title(
        &self,
        needle: &str,
    ) -> Result<Vec<VolunteerPost>, VolunteerPostRepositoryError> {
        if needle.is_empty() {
            return self.list_all().await;
        }
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let pattern = format!("%{}%", escape_like(needle));

        let rows: Vec<VolunteerPostRow> = volunteer_posts::table
            .filter(volunteer_posts::title.ilike(pattern))
            .order((volunteer_posts::deadline.asc(), volunteer_posts::id.asc()))
            .select(VolunteerPostRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows_to_posts(rows)
    }

    async fn list_soonest(
        &self,
        limit: usize,
    ) -> Result<Vec<VolunteerPost>, VolunteerPostRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);

        let rows: Vec<VolunteerPostRow> = volunteer_posts::table
            .order((volunteer_posts::deadline.asc(), volunteer_posts::id.asc()))
            .limit(limit)
            .select(VolunteerPostRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows_to_posts(rows)
    }

    async fn find_by_id(
        &self,
        id: &PostId,
    ) -> Result<Option<VolunteerPost>, VolunteerPostRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = volunteer_posts::table
            .filter(volunteer_posts::id.eq(id.as_uuid()))
            .select(VolunteerPostRow::as_select())
            .first::<VolunteerPostRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_post).transpose()
    }

    async fn delete(&self, id: &PostId) -> Result<DeleteOutcome, VolunteerPostRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows = diesel::delete(volunteer_posts::table.filter(volunteer_posts::id.eq(id.as_uuid())))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(DeleteOutcome::from_rows(rows))
    }

    async fn upsert(
        &self,
        post: &VolunteerPost,
    ) -> Result<UpsertOutcome, VolunteerPostRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let id = *post.id().as_uuid();
        let insert = new_row(post);
        let update = update_row(post);

        conn.transaction(|conn| {
            async move {
                let existing = volunteer_posts::table
                    .filter(volunteer_posts::id.eq(id))
                    .select(VolunteerPostRow::as_select())
                    .for_update()
                    .first::<VolunteerPostRow>(conn)
                    .await
                    .optional()?;

                match existing {
                    Some(row) if !row_differs(&row, &update) => Ok(UpsertOutcome::matched(false)),
                    Some(_) => {
                        diesel::update(volunteer_posts::table.filter(volunteer_posts::id.eq(id)))
                            .set(&update)
                            .execute(conn)
                            .await?;
                        Ok(UpsertOutcome::matched(true))
                    }
                    None => {
                        debug!(post_id = %id, "upsert inserting new posting");
                        diesel::insert_into(volunteer_posts::table)
                            .values(&insert)
                            .on_conflict(volunteer_posts::id)
                            .do_update()
                            .set(&update)
                            .execute(conn)
                            .await?;
                        Ok(UpsertOutcome::inserted(id))
                    }
                }
            }
            .scope_boxed()
        })
        .await
        .map_err(map_diesel_error)
    }

    async fn list_by_organizer(
        &self,
        email: &Email,
    ) -> Result<Vec<VolunteerPost>, VolunteerPostRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<VolunteerPostRow> = volunteer_posts::table
            .filter(volunteer_posts::organizer_email.eq(email.as_ref()))
            .order((volunteer_posts::deadline.asc(), volunteer_posts::id.asc()))
            .select(VolunteerPostRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows_to_posts(rows)
    }
}
