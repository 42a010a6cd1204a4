//! HTTP adapter mapping for domain errors.
//!
//! Purpose: keep the domain error type HTTP-agnostic while allowing Actix
//! handlers to turn domain and port failures into consistent JSON responses
//! and status codes.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use serde_json::json;
use tracing::error;

use crate::domain::ports::{
    IdentityTokenError, VolunteerPostRepositoryError, VolunteerRequestRepositoryError,
};
use crate::domain::{Error, ErrorCode, TRACE_ID_HEADER, UNAUTHORIZED_MESSAGE};

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, Error>;

const INTERNAL_MESSAGE: &str = "Internal server error";

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
        ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::Conflict => StatusCode::CONFLICT,
        ErrorCode::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn redact_if_internal(error: &Error) -> Error {
    if matches!(error.code(), ErrorCode::InternalError) {
        let mut redacted = Error::internal(INTERNAL_MESSAGE);
        if let Some(id) = error.trace_id() {
            redacted = redacted.with_trace_id(id.to_owned());
        }
        redacted
    } else {
        error.clone()
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        let mut builder = HttpResponse::build(self.status_code());
        if let Some(id) = self.trace_id() {
            builder.insert_header((TRACE_ID_HEADER, id.to_owned()));
        }

        builder.json(redact_if_internal(self))
    }
}

impl From<actix_web::Error> for Error {
    fn from(err: actix_web::Error) -> Self {
        // Do not leak implementation details to clients.
        error!(error = %err, "actix error promoted to domain error");
        Error::internal(INTERNAL_MESSAGE)
    }
}

impl From<VolunteerPostRepositoryError> for Error {
    fn from(err: VolunteerPostRepositoryError) -> Self {
        error!(error = %err, "volunteer post repository failed");
        match err {
            VolunteerPostRepositoryError::Connection { .. } => {
                Error::service_unavailable("volunteer post store is unavailable")
            }
            VolunteerPostRepositoryError::Query { .. } => Error::internal(err.to_string()),
        }
    }
}

impl From<VolunteerRequestRepositoryError> for Error {
    fn from(err: VolunteerRequestRepositoryError) -> Self {
        match err {
            VolunteerRequestRepositoryError::PostNotFound { post_id } => {
                Error::not_found("volunteer post not found")
                    .with_details(json!({ "volunteerPostId": post_id }))
            }
            VolunteerRequestRepositoryError::NoCapacity { post_id } => {
                Error::conflict("volunteer post has no remaining capacity")
                    .with_details(json!({ "volunteerPostId": post_id }))
            }
            VolunteerRequestRepositoryError::Connection { .. } => {
                error!(error = %err, "volunteer request repository failed");
                Error::service_unavailable("volunteer request store is unavailable")
            }
            VolunteerRequestRepositoryError::Query { .. } => {
                error!(error = %err, "volunteer request repository failed");
                Error::internal(err.to_string())
            }
        }
    }
}

impl From<IdentityTokenError> for Error {
    fn from(err: IdentityTokenError) -> Self {
        match err {
            IdentityTokenError::Signing { .. } => {
                error!(error = %err, "identity token signing failed");
                Error::internal(err.to_string())
            }
            IdentityTokenError::Invalid { .. } | IdentityTokenError::Expired => {
                Error::unauthorized(UNAUTHORIZED_MESSAGE)
            }
        }
    }
}

#[cfg(test)]
mod tests;
