//! Volunteer request HTTP handlers.
//!
//! ```text
//! POST /volunteerRequests
//! GET /volunteer-request/{email}    (owner only)
//! DELETE /volunteer-request/{id}
//! ```

use actix_web::{delete, get, post, web};
use serde::{Deserialize, Serialize};
use tracing::info;
use utoipa::ToSchema;

use crate::domain::ports::{DeleteOutcome, InsertOutcome};
use crate::domain::{
    Contact, Error, PostId, RequestId, VolunteerRequest, VolunteerRequestDraft,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::guard::AuthenticatedIdentity;
use crate::inbound::http::posts::ContactBody;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, contact_error, parse_uuid, request_error};

/// Request payload for applying to a posting.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VolunteerRequestBody {
    #[schema(format = "uuid")]
    pub volunteer_post_id: String,
    pub volunteer: ContactBody,
    #[serde(default)]
    pub suggestion: String,
}

fn parse_request(state: &HttpState, body: VolunteerRequestBody) -> Result<VolunteerRequest, Error> {
    let volunteer_post_id = parse_uuid(&body.volunteer_post_id, FieldName::new("volunteerPostId"))
        .map(PostId::from_uuid)?;
    let volunteer = Contact::new(&body.volunteer.name, &body.volunteer.email)
        .map_err(|err| contact_error(FieldName::new("volunteer"), &err))?;
    let draft = VolunteerRequestDraft {
        volunteer_post_id,
        volunteer,
        suggestion: body.suggestion,
    };
    VolunteerRequest::new(RequestId::random(), draft, state.clock.utc())
        .map_err(|err| request_error(&err))
}

/// Apply to a posting, taking one of its remaining places.
///
/// The request is stored and the posting's capacity decremented together,
/// or neither happens.
#[utoipa::path(
    post,
    path = "/volunteerRequests",
    request_body = VolunteerRequestBody,
    responses(
        (status = 200, description = "Request recorded", body = InsertOutcome),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "Posting does not exist", body = ErrorSchema),
        (status = 409, description = "Posting has no remaining capacity", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["requests"],
    operation_id = "createRequest",
    security([])
)]
#[post("/volunteerRequests")]
pub async fn create_request(
    state: web::Data<HttpState>,
    payload: web::Json<VolunteerRequestBody>,
) -> ApiResult<web::Json<InsertOutcome>> {
    let request = parse_request(&state, payload.into_inner())?;
    let outcome = state.requests.submit(&request).await?;
    info!(
        request_id = %request.id(),
        post_id = %request.volunteer_post_id(),
        "volunteer request recorded"
    );
    Ok(web::Json(outcome))
}

/// List the caller's own requests.
#[utoipa::path(
    get,
    path = "/volunteer-request/{email}",
    params(("email" = String, Path, format = Email, description = "Volunteer email")),
    responses(
        (status = 200, description = "Requests owned by the caller", body = [VolunteerRequest]),
        (status = 401, description = "Missing, invalid, or foreign identity", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["requests"],
    operation_id = "listOwnRequests",
    security(("TokenCookie" = []))
)]
#[get("/volunteer-request/{email}")]
pub async fn list_requests_by_owner(
    state: web::Data<HttpState>,
    identity: AuthenticatedIdentity,
    path: web::Path<String>,
) -> ApiResult<web::Json<Vec<VolunteerRequest>>> {
    let owner = identity.require_owner(&path)?;
    Ok(web::Json(state.requests.list_by_volunteer(&owner).await?))
}

/// Delete a request. The posting's capacity is not given back.
#[utoipa::path(
    delete,
    path = "/volunteer-request/{id}",
    params(("id" = String, Path, format = Uuid, description = "Request id")),
    responses(
        (status = 200, description = "Delete acknowledgement", body = DeleteOutcome),
        (status = 400, description = "Invalid id", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["requests"],
    operation_id = "deleteRequest",
    security([])
)]
#[delete("/volunteer-request/{id}")]
pub async fn delete_request(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<DeleteOutcome>> {
    let id = parse_uuid(&path, FieldName::new("id")).map(RequestId::from_uuid)?;
    let outcome = state.requests.delete(&id).await?;
    info!(request_id = %id, deleted = outcome.deleted_count, "volunteer request delete");
    Ok(web::Json(outcome))
}

#[cfg(test)]
#[path = "requests_tests.rs"]
mod tests;
