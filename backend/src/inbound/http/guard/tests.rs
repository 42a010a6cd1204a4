//! Behavioural coverage for the ownership guard.

use super::*;
use crate::domain::ErrorCode;
use crate::inbound::http::test_utils::{TestContext, test_context};
use actix_web::cookie::Cookie;
use actix_web::http::StatusCode;
use actix_web::{App, HttpResponse, test};
use rstest::rstest;

async fn owner_echo(
    identity: AuthenticatedIdentity,
    owner: web::Path<String>,
) -> Result<HttpResponse, Error> {
    let email = identity.require_owner(&owner)?;
    Ok(HttpResponse::Ok().body(email.to_string()))
}

fn a_caller_holding_a_token() -> (TestContext, Option<String>) {
    let context = test_context();
    let token = context.token_for("a@x.com");
    (context, Some(token))
}

fn a_caller_without_a_token() -> (TestContext, Option<String>) {
    (test_context(), None)
}

async fn the_caller_lists_resources(
    caller: (TestContext, Option<String>),
    owner: &str,
) -> (StatusCode, String) {
    let (context, token) = caller;
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(context.state.clone()))
            .route("/owned/{email}", web::get().to(owner_echo)),
    )
    .await;

    let mut request = test::TestRequest::get().uri(&format!("/owned/{owner}"));
    if let Some(token) = token {
        request = request.cookie(Cookie::new(TOKEN_COOKIE, token));
    }
    let response = test::call_service(&app, request.to_request()).await;
    let status = response.status();
    let body = test::read_body(response).await;
    (status, String::from_utf8_lossy(&body).into_owned())
}

fn the_owners_email_is_returned(outcome: (StatusCode, String)) {
    assert_eq!(outcome.0, StatusCode::OK);
    assert_eq!(outcome.1, "a@x.com");
}

fn the_request_is_rejected(outcome: (StatusCode, String)) {
    assert_eq!(outcome.0, StatusCode::UNAUTHORIZED);
    let payload: Error = serde_json::from_str(&outcome.1).expect("error payload");
    assert_eq!(payload.code(), ErrorCode::Unauthorized);
    assert_eq!(payload.message(), "unauthorized access");
}

#[rstest]
#[actix_web::test]
async fn matching_owner_is_admitted() {
    let caller = a_caller_holding_a_token();
    let outcome = the_caller_lists_resources(caller, "a@x.com").await;
    the_owners_email_is_returned(outcome);
}

#[rstest]
#[actix_web::test]
async fn other_owner_is_rejected() {
    let caller = a_caller_holding_a_token();
    let outcome = the_caller_lists_resources(caller, "b@x.com").await;
    the_request_is_rejected(outcome);
}

#[rstest]
#[case("a@x.com")]
#[case("b@x.com")]
#[actix_web::test]
async fn missing_cookie_is_rejected_for_every_owner(#[case] owner: &str) {
    let caller = a_caller_without_a_token();
    let outcome = the_caller_lists_resources(caller, owner).await;
    the_request_is_rejected(outcome);
}

#[rstest]
#[case("")]
#[case("garbage")]
#[actix_web::test]
async fn empty_or_malformed_tokens_are_rejected(#[case] token: &str) {
    let context = test_context();
    let outcome = the_caller_lists_resources((context, Some(token.to_owned())), "a@x.com").await;
    the_request_is_rejected(outcome);
}

#[rstest]
#[actix_web::test]
async fn expired_tokens_are_rejected() {
    let (context, token) = a_caller_holding_a_token();
    context
        .clock
        .advance_seconds(crate::domain::TOKEN_LIFETIME_DAYS * 24 * 60 * 60);
    let outcome = the_caller_lists_resources((context, token), "a@x.com").await;
    the_request_is_rejected(outcome);
}
