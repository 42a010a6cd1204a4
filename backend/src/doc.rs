//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every HTTP handler, the error payload wrappers
//! ([`ErrorSchema`], [`ErrorCodeSchema`]), and the `token` cookie security
//! scheme used by the owner-scoped listings. Swagger UI serves it in debug
//! builds and `openapi-dump` prints it for external tooling.

use crate::domain::ports::{DeleteOutcome, InsertOutcome, UpsertOutcome};
use crate::domain::{Contact, Email, PostId, RequestId, RequestStatus, VolunteerPost, VolunteerRequest};
use crate::inbound::http::auth::{IssueTokenRequest, SuccessResponse};
use crate::inbound::http::posts::{ContactBody, VolunteerPostBody};
use crate::inbound::http::requests::VolunteerRequestBody;
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Name of the security scheme guarding owner-scoped routes.
pub const TOKEN_SECURITY_SCHEME: &str = "TokenCookie";

/// Enrich the generated document with the identity cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            TOKEN_SECURITY_SCHEME,
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "token",
                "Signed identity token issued by POST /jwt.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Volunteer backend API",
        description = "Volunteer postings, volunteer requests, and cookie-carried identity tokens."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::auth::issue_token,
        crate::inbound::http::auth::logout,
        crate::inbound::http::posts::create_post,
        crate::inbound::http::posts::list_posts,
        crate::inbound::http::posts::search_posts,
        crate::inbound::http::posts::list_soonest_posts,
        crate::inbound::http::posts::get_post,
        crate::inbound::http::posts::delete_post,
        crate::inbound::http::posts::replace_post,
        crate::inbound::http::posts::list_posts_by_owner,
        crate::inbound::http::requests::create_request,
        crate::inbound::http::requests::list_requests_by_owner,
        crate::inbound::http::requests::delete_request,
        crate::inbound::http::health::root,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ErrorSchema,
        ErrorCodeSchema,
        Email,
        Contact,
        PostId,
        RequestId,
        RequestStatus,
        VolunteerPost,
        VolunteerRequest,
        InsertOutcome,
        DeleteOutcome,
        UpsertOutcome,
        IssueTokenRequest,
        SuccessResponse,
        ContactBody,
        VolunteerPostBody,
        VolunteerRequestBody,
    )),
    tags(
        (name = "identity", description = "Issue and clear the identity cookie"),
        (name = "postings", description = "Volunteer postings"),
        (name = "requests", description = "Requests against postings"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    //! Tests verifying the generated OpenAPI document.

    use super::*;
    use rstest::rstest;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    // utoipa replaces :: with . in schema names
    const ERROR_SCHEMA_NAME: &str = "crate.domain.Error";

    fn assert_object_schema_has_field(schema: &RefOr<Schema>, field: &str) {
        match schema {
            RefOr::T(Schema::Object(obj)) => {
                assert!(
                    obj.properties.contains_key(field),
                    "schema should have field '{field}'"
                );
            }
            _ => panic!("expected Object schema"),
        }
    }

    #[test]
    fn error_schema_has_required_fields() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let error_schema = schemas.get(ERROR_SCHEMA_NAME).expect("Error schema");

        assert_object_schema_has_field(error_schema, "code");
        assert_object_schema_has_field(error_schema, "message");
        assert_object_schema_has_field(error_schema, "traceId");
    }

    #[test]
    fn posting_schema_uses_camel_case_fields() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let posting = schemas.get("VolunteerPost").expect("VolunteerPost schema");

        assert_object_schema_has_field(posting, "volunteersNeeded");
        assert_object_schema_has_field(posting, "organizer");
    }

    #[rstest]
    #[case("/jwt")]
    #[case("/logout")]
    #[case("/addVolunteer")]
    #[case("/allVolunteer")]
    #[case("/all-Volunteer")]
    #[case("/allVolunteer/limit")]
    #[case("/allVolunteer/{id}")]
    #[case("/volunteer/{id}")]
    #[case("/update-volunteer/{id}")]
    #[case("/volunteer/{email}")]
    #[case("/volunteerRequests")]
    #[case("/volunteer-request/{email}")]
    #[case("/volunteer-request/{id}")]
    #[case("/")]
    fn every_route_is_documented(#[case] path: &str) {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key(path), "missing path {path}");
    }

    #[test]
    fn token_cookie_scheme_is_registered() {
        let doc = ApiDoc::openapi();
        let components = doc.components.expect("components");
        assert!(components.security_schemes.contains_key(TOKEN_SECURITY_SCHEME));
    }
}
