//! Volunteer posting HTTP handlers.
//!
//! ```text
//! POST /addVolunteer
//! GET /allVolunteer
//! GET /all-Volunteer?search=beach
//! GET /allVolunteer/limit
//! GET /allVolunteer/{id}
//! DELETE /volunteer/{id}
//! PUT /update-volunteer/{id}
//! GET /volunteer/{email}            (owner only)
//! ```
//!
//! `GET /allVolunteer/limit` must be registered before
//! `GET /allVolunteer/{id}` so the literal segment wins.

use actix_web::{delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use tracing::info;
use utoipa::{IntoParams, ToSchema};

use crate::domain::ports::{DeleteOutcome, InsertOutcome, SOONEST_LIMIT, UpsertOutcome};
use crate::domain::{Contact, Error, PostId, VolunteerPost, VolunteerPostDraft};
use crate::inbound::http::ApiResult;
use crate::inbound::http::guard::AuthenticatedIdentity;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, contact_error, parse_rfc3339_timestamp, parse_uuid, post_error,
};

/// Name and email pair in request bodies.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct ContactBody {
    #[schema(example = "Ada Lovelace")]
    pub name: String,
    #[schema(format = Email, example = "ada@example.com")]
    pub email: String,
}

/// Request payload for creating or replacing a posting.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VolunteerPostBody {
    pub thumbnail: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub category: String,
    pub location: String,
    #[schema(minimum = 0)]
    pub volunteers_needed: i32,
    #[schema(format = "date-time")]
    pub deadline: String,
    pub organizer: ContactBody,
}

/// Query string for `GET /all-Volunteer`.
#[derive(Debug, Deserialize, IntoParams)]
pub struct SearchQuery {
    /// Case-insensitive title fragment; absent or empty matches all.
    pub search: Option<String>,
}

fn parse_post(id: PostId, body: VolunteerPostBody) -> Result<VolunteerPost, Error> {
    let deadline = parse_rfc3339_timestamp(&body.deadline, FieldName::new("deadline"))?;
    let organizer = Contact::new(&body.organizer.name, &body.organizer.email)
        .map_err(|err| contact_error(FieldName::new("organizer"), &err))?;
    let draft = VolunteerPostDraft {
        thumbnail: body.thumbnail,
        title: body.title,
        description: body.description,
        category: body.category,
        location: body.location,
        volunteers_needed: body.volunteers_needed,
        deadline,
        organizer,
    };
    VolunteerPost::new(id, draft).map_err(|err| post_error(&err))
}

fn parse_post_id(raw: &str) -> Result<PostId, Error> {
    parse_uuid(raw, FieldName::new("id")).map(PostId::from_uuid)
}

/// Create a posting under a fresh id.
#[utoipa::path(
    post,
    path = "/addVolunteer",
    request_body = VolunteerPostBody,
    responses(
        (status = 200, description = "Posting created", body = InsertOutcome),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["postings"],
    operation_id = "createPosting",
    security([])
)]
#[post("/addVolunteer")]
pub async fn create_post(
    state: web::Data<HttpState>,
    payload: web::Json<VolunteerPostBody>,
) -> ApiResult<web::Json<InsertOutcome>> {
    let post = parse_post(PostId::random(), payload.into_inner())?;
    let outcome = state.posts.insert(&post).await?;
    info!(post_id = %post.id(), organizer = %post.organizer().email(), "posting created");
    Ok(web::Json(outcome))
}

/// List every posting, earliest deadline first.
#[utoipa::path(
    get,
    path = "/allVolunteer",
    responses(
        (status = 200, description = "All postings", body = [VolunteerPost]),
        (status = 500, description = "Internal server error", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["postings"],
    operation_id = "listPostings",
    security([])
)]
#[get("/allVolunteer")]
pub async fn list_posts(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<VolunteerPost>>> {
    Ok(web::Json(state.posts.list_all().await?))
}

/// Search postings by title.
///
/// The fragment is matched literally, so `%` and `_` have no special meaning.
#[utoipa::path(
    get,
    path = "/all-Volunteer",
    params(SearchQuery),
    responses(
        (status = 200, description = "Matching postings", body = [VolunteerPost]),
        (status = 500, description = "Internal server error", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["postings"],
    operation_id = "searchPostings",
    security([])
)]
#[get("/all-Volunteer")]
pub async fn search_posts(
    state: web::Data<HttpState>,
    query: web::Query<SearchQuery>,
) -> ApiResult<web::Json<Vec<VolunteerPost>>> {
    let needle = query.search.as_deref().unwrap_or_default();
    Ok(web::Json(state.posts.search_by_title(needle).await?))
}

/// The six postings with the soonest deadlines.
#[utoipa::path(
    get,
    path = "/allVolunteer/limit",
    responses(
        (status = 200, description = "Soonest postings", body = [VolunteerPost]),
        (status = 500, description = "Internal server error", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["postings"],
    operation_id = "listSoonestPostings",
    security([])
)]
#[get("/allVolunteer/limit")]
pub async fn list_soonest_posts(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<VolunteerPost>>> {
    Ok(web::Json(state.posts.list_soonest(SOONEST_LIMIT).await?))
}

/// Fetch one posting.
#[utoipa::path(
    get,
    path = "/allVolunteer/{id}",
    params(("id" = String, Path, format = Uuid, description = "Posting id")),
    responses(
        (status = 200, description = "Posting", body = VolunteerPost),
        (status = 400, description = "Invalid id", body = ErrorSchema),
        (status = 404, description = "No posting with that id", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["postings"],
    operation_id = "getPosting",
    security([])
)]
#[get("/allVolunteer/{id}")]
pub async fn get_post(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<VolunteerPost>> {
    let id = parse_post_id(&path)?;
    state
        .posts
        .find_by_id(&id)
        .await?
        .map(web::Json)
        .ok_or_else(|| Error::not_found("volunteer post not found"))
}

/// Delete a posting. A missing id reports `deletedCount: 0`.
#[utoipa::path(
    delete,
    path = "/volunteer/{id}",
    params(("id" = String, Path, format = Uuid, description = "Posting id")),
    responses(
        (status = 200, description = "Delete acknowledgement", body = DeleteOutcome),
        (status = 400, description = "Invalid id", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["postings"],
    operation_id = "deletePosting",
    security([])
)]
#[delete("/volunteer/{id}")]
pub async fn delete_post(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<DeleteOutcome>> {
    let id = parse_post_id(&path)?;
    let outcome = state.posts.delete(&id).await?;
    info!(post_id = %id, deleted = outcome.deleted_count, "posting delete");
    Ok(web::Json(outcome))
}

/// Replace a posting's fields, inserting it under `id` when absent.
#[utoipa::path(
    put,
    path = "/update-volunteer/{id}",
    params(("id" = String, Path, format = Uuid, description = "Posting id")),
    request_body = VolunteerPostBody,
    responses(
        (status = 200, description = "Upsert acknowledgement", body = UpsertOutcome),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["postings"],
    operation_id = "replacePosting",
    security([])
)]
#[put("/update-volunteer/{id}")]
pub async fn replace_post(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<VolunteerPostBody>,
) -> ApiResult<web::Json<UpsertOutcome>> {
    let id = parse_post_id(&path)?;
    let post = parse_post(id, payload.into_inner())?;
    Ok(web::Json(state.posts.upsert(&post).await?))
}

/// List the caller's own postings.
///
/// The path email must equal the email in the `token` cookie.
#[utoipa::path(
    get,
    path = "/volunteer/{email}",
    params(("email" = String, Path, format = Email, description = "Organizer email")),
    responses(
        (status = 200, description = "Postings owned by the caller", body = [VolunteerPost]),
        (status = 401, description = "Missing, invalid, or foreign identity", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["postings"],
    operation_id = "listOwnPostings",
    security(("TokenCookie" = []))
)]
#[get("/volunteer/{email}")]
pub async fn list_posts_by_owner(
    state: web::Data<HttpState>,
    identity: AuthenticatedIdentity,
    path: web::Path<String>,
) -> ApiResult<web::Json<Vec<VolunteerPost>>> {
    let owner = identity.require_owner(&path)?;
    Ok(web::Json(state.posts.list_by_organizer(&owner).await?))
}

#[cfg(test)]
#[path = "posts_tests.rs"]
mod tests;
