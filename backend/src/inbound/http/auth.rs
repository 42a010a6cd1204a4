//! Identity token issue and logout handlers.
//!
//! ```text
//! POST /jwt {"email":"ada@example.com"}
//! GET /logout
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use tracing::info;
use utoipa::ToSchema;

use crate::inbound::http::schemas::ErrorSchema;

use super::ApiResult;
use super::state::HttpState;
use super::validation::{FieldName, parse_email};

/// Request body for `POST /jwt`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct IssueTokenRequest {
    #[schema(format = Email, example = "ada@example.com")]
    pub email: String,
}

/// Acknowledgement body for cookie operations.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SuccessResponse {
    pub success: bool,
}

impl SuccessResponse {
    fn ok() -> Self {
        Self { success: true }
    }
}

/// Sign an identity token for the given email and set it as a cookie.
#[utoipa::path(
    post,
    path = "/jwt",
    request_body = IssueTokenRequest,
    responses(
        (status = 200, description = "Token issued", body = SuccessResponse,
            headers(("Set-Cookie" = String, description = "HttpOnly `token` cookie"))),
        (status = 400, description = "Invalid email", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["identity"],
    operation_id = "issueToken",
    security([])
)]
#[post("/jwt")]
pub async fn issue_token(
    state: web::Data<HttpState>,
    payload: web::Json<IssueTokenRequest>,
) -> ApiResult<HttpResponse> {
    let email = parse_email(&payload.email, FieldName::new("email"))?;
    let issued = state.tokens.issue(&email)?;
    info!(email = %email, expires_at = %issued.expires_at(), "identity token issued");
    Ok(HttpResponse::Ok()
        .cookie(state.cookies.issue(issued.token()))
        .json(SuccessResponse::ok()))
}

/// Clear the identity cookie.
///
/// The token itself stays valid until it expires; only the browser copy is
/// dropped.
#[utoipa::path(
    get,
    path = "/logout",
    responses(
        (status = 200, description = "Cookie cleared", body = SuccessResponse,
            headers(("Set-Cookie" = String, description = "Expired `token` cookie")))
    ),
    tags = ["identity"],
    operation_id = "logout",
    security([])
)]
#[get("/logout")]
pub async fn logout(state: web::Data<HttpState>) -> HttpResponse {
    HttpResponse::Ok()
        .cookie(state.cookies.clear())
        .json(SuccessResponse::ok())
}
