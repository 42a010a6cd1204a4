//! Tests for volunteer posting HTTP handlers.

use super::*;
use crate::domain::ErrorCode;
use crate::inbound::http::identity_cookie::TOKEN_COOKIE;
use crate::inbound::http::test_utils::{TestContext, test_context};
use actix_web::cookie::Cookie;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::{App, test as actix_test};
use rstest::rstest;
use serde_json::{Value, json};

fn test_app(
    state: HttpState,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(state))
        .service(create_post)
        .service(list_posts)
        .service(search_posts)
        .service(list_soonest_posts)
        .service(get_post)
        .service(delete_post)
        .service(replace_post)
        .service(list_posts_by_owner)
}

fn post_payload(title: &str, organizer: &str, deadline: &str) -> Value {
    json!({
        "thumbnail": "https://img.example/thumb.png",
        "title": title,
        "description": "Bring gloves",
        "category": "environment",
        "location": "Brighton",
        "volunteersNeeded": 3,
        "deadline": deadline,
        "organizer": { "name": "Organizer", "email": organizer }
    })
}

async fn create(
    app: &impl Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
    payload: Value,
) -> String {
    let response = actix_test::call_service(
        app,
        actix_test::TestRequest::post()
            .uri("/addVolunteer")
            .set_json(payload)
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(response).await;
    body["insertedId"]
        .as_str()
        .expect("insertedId string")
        .to_owned()
}

async fn get_json(
    app: &impl Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
    uri: &str,
) -> (StatusCode, Value) {
    let response =
        actix_test::call_service(app, actix_test::TestRequest::get().uri(uri).to_request()).await;
    let status = response.status();
    (status, actix_test::read_body_json(response).await)
}

fn titles(body: &Value) -> Vec<String> {
    body.as_array()
        .expect("array body")
        .iter()
        .map(|post| post["title"].as_str().expect("title").to_owned())
        .collect()
}

#[actix_web::test]
async fn created_posting_can_be_fetched_by_id() {
    let context = test_context();
    let app = actix_test::init_service(test_app(context.state.clone())).await;
    let id = create(
        &app,
        post_payload("Beach clean-up", "a@x.com", "2026-05-01T09:00:00Z"),
    )
    .await;

    let (status, body) = get_json(&app, &format!("/allVolunteer/{id}")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], json!(id));
    assert_eq!(body["volunteersNeeded"], json!(3));
    assert_eq!(body["organizer"]["email"], json!("a@x.com"));
    assert_eq!(body["deadline"], json!("2026-05-01T09:00:00Z"));
}

#[actix_web::test]
async fn unknown_posting_is_not_found() {
    let context = test_context();
    let app = actix_test::init_service(test_app(context.state.clone())).await;

    let (status, body) = get_json(
        &app,
        "/allVolunteer/00000000-0000-0000-0000-000000000404",
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], json!("not_found"));
}

#[actix_web::test]
async fn malformed_posting_id_is_rejected() {
    let context = test_context();
    let app = actix_test::init_service(test_app(context.state.clone())).await;

    let (status, body) = get_json(&app, "/allVolunteer/not-a-uuid").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"]["field"], json!("id"));
    assert_eq!(body["details"]["code"], json!("invalid_uuid"));
}

#[rstest]
#[case(json!({ "volunteersNeeded": -1 }), "volunteersNeeded")]
#[case(json!({ "title": "  " }), "title")]
#[case(json!({ "deadline": "next week" }), "deadline")]
#[case(json!({ "organizer": { "name": "Ada", "email": "nope" } }), "organizer.email")]
#[actix_web::test]
async fn invalid_bodies_name_the_field(#[case] overrides: Value, #[case] field: &str) {
    let context = test_context();
    let app = actix_test::init_service(test_app(context.state.clone())).await;
    let mut payload = post_payload("Beach", "a@x.com", "2026-05-01T09:00:00Z");
    for (key, value) in overrides.as_object().expect("object overrides") {
        payload[key] = value.clone();
    }

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/addVolunteer")
            .set_json(payload)
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let error: Error = actix_test::read_body_json(response).await;
    assert_eq!(error.code(), ErrorCode::InvalidRequest);
    assert_eq!(
        error.details().and_then(|details| details.get("field")),
        Some(&json!(field))
    );
    let (_, all) = get_json(&app, "/allVolunteer").await;
    assert_eq!(all, json!([]));
}

#[actix_web::test]
async fn listings_are_ordered_by_deadline() {
    let context = test_context();
    let app = actix_test::init_service(test_app(context.state.clone())).await;
    for day in (1..=8).rev() {
        create(
            &app,
            post_payload(
                &format!("Shift {day}"),
                "a@x.com",
                &format!("2026-05-{day:02}T09:00:00Z"),
            ),
        )
        .await;
    }

    let (_, all) = get_json(&app, "/allVolunteer").await;
    assert_eq!(titles(&all).len(), 8);
    assert_eq!(titles(&all).first().map(String::as_str), Some("Shift 1"));

    let (status, soonest) = get_json(&app, "/allVolunteer/limit").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        titles(&soonest),
        (1..=6).map(|day| format!("Shift {day}")).collect::<Vec<_>>()
    );
}

#[rstest]
#[case("", &["100% fun run", "Beach clean-up"])]
#[case("BEACH", &["Beach clean-up"])]
#[case("%", &["100% fun run"])]
#[case("_", &[])]
#[actix_web::test]
async fn search_is_literal_and_case_insensitive(#[case] needle: &str, #[case] expected: &[&str]) {
    let context = test_context();
    let app = actix_test::init_service(test_app(context.state.clone())).await;
    create(
        &app,
        post_payload("Beach clean-up", "a@x.com", "2026-05-02T09:00:00Z"),
    )
    .await;
    create(
        &app,
        post_payload("100% fun run", "a@x.com", "2026-05-01T09:00:00Z"),
    )
    .await;

    let uri = format!("/all-Volunteer?search={}", needle.replace('%', "%25"));
    let (status, body) = get_json(&app, &uri).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(titles(&body), expected);
}

#[actix_web::test]
async fn search_without_a_query_matches_everything() {
    let context = test_context();
    let app = actix_test::init_service(test_app(context.state.clone())).await;
    create(
        &app,
        post_payload("Beach clean-up", "a@x.com", "2026-05-02T09:00:00Z"),
    )
    .await;

    let (_, body) = get_json(&app, "/all-Volunteer").await;

    assert_eq!(titles(&body), ["Beach clean-up"]);
}

#[actix_web::test]
async fn deleting_reports_the_removed_count() {
    let context = test_context();
    let app = actix_test::init_service(test_app(context.state.clone())).await;
    let id = create(
        &app,
        post_payload("Beach clean-up", "a@x.com", "2026-05-02T09:00:00Z"),
    )
    .await;

    for expected in [1, 0] {
        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::delete()
                .uri(&format!("/volunteer/{id}"))
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(body, json!({ "deletedCount": expected }));
    }
}

#[actix_web::test]
async fn replace_inserts_then_matches_then_modifies() {
    let context = test_context();
    let app = actix_test::init_service(test_app(context.state.clone())).await;
    let id = "00000000-0000-0000-0000-000000000777";
    let uri = format!("/update-volunteer/{id}");
    let original = post_payload("Beach clean-up", "a@x.com", "2026-05-02T09:00:00Z");
    let changed = post_payload("Park clean-up", "a@x.com", "2026-05-02T09:00:00Z");

    let mut outcomes = Vec::new();
    for payload in [&original, &original, &changed] {
        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::put()
                .uri(&uri)
                .set_json(payload)
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        outcomes.push(actix_test::read_body_json::<Value, _>(response).await);
    }

    assert_eq!(
        outcomes,
        [
            json!({ "matchedCount": 0, "modifiedCount": 0, "upsertedId": id }),
            json!({ "matchedCount": 1, "modifiedCount": 0, "upsertedId": null }),
            json!({ "matchedCount": 1, "modifiedCount": 1, "upsertedId": null }),
        ]
    );
    let (_, body) = get_json(&app, &format!("/allVolunteer/{id}")).await;
    assert_eq!(body["title"], json!("Park clean-up"));
}

async fn owner_listing(context: &TestContext, token: Option<String>, owner: &str) -> (StatusCode, Value) {
    let app = actix_test::init_service(test_app(context.state.clone())).await;
    create(
        &app,
        post_payload("Ada's shift", "a@x.com", "2026-05-02T09:00:00Z"),
    )
    .await;
    create(
        &app,
        post_payload("Bob's shift", "b@x.com", "2026-05-01T09:00:00Z"),
    )
    .await;

    let mut request = actix_test::TestRequest::get().uri(&format!("/volunteer/{owner}"));
    if let Some(token) = token {
        request = request.cookie(Cookie::new(TOKEN_COOKIE, token));
    }
    let response = actix_test::call_service(&app, request.to_request()).await;
    let status = response.status();
    (status, actix_test::read_body_json(response).await)
}

#[actix_web::test]
async fn owner_listing_returns_only_the_callers_postings() {
    let context = test_context();
    let token = context.token_for("a@x.com");

    let (status, body) = owner_listing(&context, Some(token), "a@x.com").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(titles(&body), ["Ada's shift"]);
}

#[rstest]
#[case(Some("a@x.com"), "b@x.com")]
#[case(None, "a@x.com")]
#[actix_web::test]
async fn owner_listing_rejects_other_callers(#[case] caller: Option<&str>, #[case] owner: &str) {
    let context = test_context();
    let token = caller.map(|email| context.token_for(email));

    let (status, body) = owner_listing(&context, token, owner).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], json!("unauthorized access"));
}
