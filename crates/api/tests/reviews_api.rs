//! Integration tests for review submission (`/api/v1/reviews`).

mod common;

use axum::http::StatusCode;
use common::{body_json, build_test_app, get_auth, post_json, post_json_auth, TestApp};
use folio_db::models::user::ExternalProfile;
use folio_db::ContentStore;
use serde_json::json;

const GOOD_TEXT: &str = "Clean topology and quick delivery";

async fn submit(app: &TestApp, token: &str, body: serde_json::Value) -> axum::response::Response {
    post_json_auth(app.router(), "/api/v1/reviews", body, token).await
}

async fn discord_token(app: &TestApp, display_name: &str) -> String {
    let user = app
        .identity
        .upsert_external_user(&ExternalProfile {
            provider: "discord".into(),
            subject: "777".into(),
            username: Some("pixel_smith".into()),
            display_name: Some(display_name.into()),
            avatar_url: Some("https://cdn.discordapp.com/avatars/777/a1.png".into()),
            email: None,
        })
        .await
        .unwrap();
    folio_api::auth::jwt::generate_access_token(user.id, None, &app.config.jwt).unwrap()
}

// ---------------------------------------------------------------------------
// Submission
// ---------------------------------------------------------------------------

#[tokio::test]
async fn submission_requires_sign_in() {
    let app = build_test_app();
    let response = post_json(
        app.router(),
        "/api/v1/reviews",
        json!({ "rating": 5, "review_text": GOOD_TEXT }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn email_user_review_is_published_under_local_part() {
    let app = build_test_app();
    let (user_id, token) = app.user_token("mika@site.test").await;

    let response = submit(&app, &token, json!({ "rating": 4, "review_text": GOOD_TEXT })).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let review = body_json(response).await["data"].clone();
    assert_eq!(review["name"], "mika");
    assert_eq!(review["rating"], 4);
    assert_eq!(review["user_id"], user_id);
    assert_eq!(review["is_approved"], true);
    assert!(review["discord_username"].is_null());

    assert_eq!(app.store.list_approved_reviews().await.unwrap().len(), 1);
}

#[tokio::test]
async fn discord_user_review_carries_profile() {
    let app = build_test_app();
    let token = discord_token(&app, "Pixel Smith").await;

    let response = submit(&app, &token, json!({ "rating": 5, "review_text": GOOD_TEXT })).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let review = body_json(response).await["data"].clone();
    assert_eq!(review["name"], "Pixel Smith");
    assert_eq!(review["discord_username"], "pixel_smith");
    assert_eq!(
        review["discord_avatar"],
        "https://cdn.discordapp.com/avatars/777/a1.png"
    );
}

#[tokio::test]
async fn second_review_from_same_account_is_a_conflict() {
    let app = build_test_app();
    let (_, token) = app.user_token("mika@site.test").await;

    let first = submit(&app, &token, json!({ "rating": 5, "review_text": GOOD_TEXT })).await;
    assert_eq!(first.status(), StatusCode::CREATED);

    let second = submit(&app, &token, json!({ "rating": 3, "review_text": GOOD_TEXT })).await;
    assert_eq!(second.status(), StatusCode::CONFLICT);

    let page = body_json(get_auth(app.router(), "/api/v1/pages/reviews", &token).await).await;
    assert_eq!(page["data"]["viewer"]["has_reviewed"], true);
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

#[tokio::test]
async fn missing_rating_is_rejected() {
    let app = build_test_app();
    let (_, token) = app.user_token("mika@site.test").await;
    let response = submit(&app, &token, json!({ "review_text": GOOD_TEXT })).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"], "Rating is required");
}

#[tokio::test]
async fn out_of_range_rating_is_rejected() {
    let app = build_test_app();
    let (_, token) = app.user_token("mika@site.test").await;
    let response = submit(&app, &token, json!({ "rating": 6, "review_text": GOOD_TEXT })).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn short_text_is_rejected() {
    let app = build_test_app();
    let (_, token) = app.user_token("mika@site.test").await;
    let response = submit(&app, &token, json!({ "rating": 5, "review_text": "Nice" })).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await["error"],
        "Review must be at least 10 characters"
    );
}

#[tokio::test]
async fn profane_text_is_rejected_and_nothing_is_stored() {
    let app = build_test_app();
    let (_, token) = app.user_token("mika@site.test").await;
    let response = submit(
        &app,
        &token,
        json!({ "rating": 1, "review_text": "What a load of BULLSHIT honestly" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await["error"],
        "Your review contains inappropriate content."
    );
    assert!(app.store.list_all_reviews().await.unwrap().is_empty());
}

#[tokio::test]
async fn profane_display_name_is_rejected() {
    let app = build_test_app();
    let token = discord_token(&app, "Badass Modeler").await;
    let response = submit(&app, &token, json!({ "rating": 5, "review_text": GOOD_TEXT })).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(app.store.list_all_reviews().await.unwrap().is_empty());
}

// ---------------------------------------------------------------------------
// Live check
// ---------------------------------------------------------------------------

#[tokio::test]
async fn live_check_warns_on_blocked_substring() {
    let app = build_test_app();
    let json = body_json(
        post_json(app.router(), "/api/v1/reviews/check", json!({ "text": "classic damnation" })).await,
    )
    .await;
    assert_eq!(json["warning"], "Your review contains inappropriate content.");
}

#[tokio::test]
async fn live_check_is_quiet_for_clean_or_short_text() {
    let app = build_test_app();
    let clean = body_json(
        post_json(app.router(), "/api/v1/reviews/check", json!({ "text": GOOD_TEXT })).await,
    )
    .await;
    assert!(clean["warning"].is_null());

    let short =
        body_json(post_json(app.router(), "/api/v1/reviews/check", json!({ "text": "ass" })).await)
            .await;
    assert!(short["warning"].is_null());
}

#[tokio::test]
async fn submission_without_store_is_unavailable() {
    let app = common::build_unconfigured_app();
    let token =
        folio_api::auth::jwt::generate_access_token(1, Some("mika@site.test"), &app.config.jwt)
            .unwrap();
    let response = submit(&app, &token, json!({ "rating": 5, "review_text": GOOD_TEXT })).await;
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}
