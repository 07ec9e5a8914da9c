//! Integration tests for the page snapshots under `/api/v1/pages`.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, build_test_app, build_unconfigured_app, get, get_auth, post_json_auth, TestApp,
    CONTACT_URL,
};
use folio_api::auth::jwt::generate_access_token;
use folio_core::variants::ProjectImage;
use folio_db::models::project::CreateProject;
use folio_db::ContentStore;
use serde_json::{json, Value};

async fn add_plan(app: &TestApp, token: &str, name: &str, is_popular: bool) {
    let response = post_json_auth(
        app.router(),
        "/api/v1/admin/pricing",
        json!({ "name": name, "price": 10.0, "is_popular": is_popular }),
        token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
}

async fn add_project(app: &TestApp, title: &str, category: &str, images: Vec<ProjectImage>) -> i64 {
    let image_url = images
        .first()
        .map(|i| i.url.clone())
        .unwrap_or_else(|| format!("https://cdn.test/{title}.png"));
    app.store
        .create_project(&CreateProject {
            title: title.into(),
            description: String::new(),
            image_url,
            images,
            category: category.into(),
            tags: Vec::new(),
            order_index: 1,
        })
        .await
        .unwrap()
        .unwrap()
        .id
}

fn image(url: &str, name: &str) -> ProjectImage {
    ProjectImage {
        url: url.into(),
        color: "#123456".into(),
        name: name.into(),
    }
}

fn names(list: &Value, key: &str) -> Vec<String> {
    list.as_array()
        .unwrap()
        .iter()
        .map(|v| v[key].as_str().unwrap().to_string())
        .collect()
}

// ---------------------------------------------------------------------------
// Pricing
// ---------------------------------------------------------------------------

#[tokio::test]
async fn popular_plan_is_centered() {
    let app = build_test_app();
    let token = app.admin_token().await;
    add_plan(&app, &token, "Basic", false).await;
    add_plan(&app, &token, "Pro", true).await;
    add_plan(&app, &token, "Studio", false).await;

    let json = body_json(get(app.router(), "/api/v1/pages/pricing").await).await;
    assert_eq!(names(&json["data"]["plans"], "name"), ["Basic", "Pro", "Studio"]);
    assert_eq!(json["data"]["contact_url"], CONTACT_URL);
}

#[tokio::test]
async fn popular_plan_goes_after_the_lower_half() {
    let app = build_test_app();
    let token = app.admin_token().await;
    add_plan(&app, &token, "Pro", true).await;
    add_plan(&app, &token, "A", false).await;
    add_plan(&app, &token, "B", false).await;
    add_plan(&app, &token, "C", false).await;

    let json = body_json(get(app.router(), "/api/v1/pages/pricing").await).await;
    assert_eq!(names(&json["data"]["plans"], "name"), ["A", "Pro", "B", "C"]);
}

#[tokio::test]
async fn single_other_plan_keeps_popular_last() {
    let app = build_test_app();
    let token = app.admin_token().await;
    add_plan(&app, &token, "Pro", true).await;
    add_plan(&app, &token, "Basic", false).await;

    let json = body_json(get(app.router(), "/api/v1/pages/pricing").await).await;
    assert_eq!(names(&json["data"]["plans"], "name"), ["Basic", "Pro"]);
}

#[tokio::test]
async fn pricing_page_includes_default_copy() {
    let app = build_test_app();
    let json = body_json(get(app.router(), "/api/v1/pages/pricing").await).await;
    assert_eq!(json["data"]["content"]["header"]["title"], "Pricing Plans");
    assert!(json["data"]["faqs"].as_array().unwrap().is_empty());
}

// ---------------------------------------------------------------------------
// Portfolio and viewer
// ---------------------------------------------------------------------------

#[tokio::test]
async fn portfolio_filters_by_category() {
    let app = build_test_app();
    add_project(&app, "Knight", "Characters", Vec::new()).await;
    add_project(&app, "Sword", "Weapons", Vec::new()).await;

    let all = body_json(get(app.router(), "/api/v1/pages/portfolio").await).await;
    assert_eq!(all["data"]["category"], "All");
    assert_eq!(all["data"]["categories"][0], "All");
    assert_eq!(all["data"]["projects"].as_array().unwrap().len(), 2);

    let weapons =
        body_json(get(app.router(), "/api/v1/pages/portfolio?category=Weapons").await).await;
    assert_eq!(weapons["data"]["category"], "Weapons");
    assert_eq!(names(&weapons["data"]["projects"], "title"), ["Sword"]);

    let stud = body_json(
        get(app.router(), "/api/v1/pages/portfolio?category=Stud%20Style").await,
    )
    .await;
    assert!(stud["data"]["projects"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn project_without_variants_gets_default_variant() {
    let app = build_test_app();
    add_project(&app, "Knight", "Characters", Vec::new()).await;

    let json = body_json(get(app.router(), "/api/v1/pages/portfolio").await).await;
    let variants = &json["data"]["projects"][0]["variants"];
    assert_eq!(variants.as_array().unwrap().len(), 1);
    assert_eq!(variants[0]["url"], "https://cdn.test/Knight.png");
    assert_eq!(variants[0]["name"], "Default");
}

#[tokio::test]
async fn viewer_selects_variant_and_falls_back_to_first() {
    let app = build_test_app();
    let id = add_project(
        &app,
        "Knight",
        "Characters",
        vec![
            image("https://cdn.test/red.png", "Red"),
            image("https://cdn.test/blue.png", "Blue"),
        ],
    )
    .await;

    let second =
        body_json(get(app.router(), &format!("/api/v1/pages/view/{id}?variant=1")).await).await;
    assert_eq!(second["data"]["selected"]["name"], "Blue");
    assert_eq!(second["data"]["project"]["title"], "Knight");

    let out_of_range =
        body_json(get(app.router(), &format!("/api/v1/pages/view/{id}?variant=9")).await).await;
    assert_eq!(out_of_range["data"]["selected"]["name"], "Red");
}

#[tokio::test]
async fn viewer_for_missing_project_is_404() {
    let app = build_test_app();
    let response = get(app.router(), "/api/v1/pages/view/42").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["code"], "NOT_FOUND");
}

// ---------------------------------------------------------------------------
// Reviews and terms
// ---------------------------------------------------------------------------

#[tokio::test]
async fn reviews_page_describes_the_viewer() {
    let app = build_test_app();

    let anonymous = body_json(get(app.router(), "/api/v1/pages/reviews").await).await;
    assert_eq!(anonymous["data"]["viewer"]["signed_in"], false);

    let (_, token) = app.user_token("mika@site.test").await;
    let signed_in =
        body_json(get_auth(app.router(), "/api/v1/pages/reviews", &token).await).await;
    assert_eq!(signed_in["data"]["viewer"]["signed_in"], true);
    assert_eq!(signed_in["data"]["viewer"]["has_reviewed"], false);
}

#[tokio::test]
async fn terms_page_lists_sections() {
    let app = build_test_app();
    let token = app.admin_token().await;
    post_json_auth(
        app.router(),
        "/api/v1/admin/terms-sections",
        json!({ "title": "Payment", "icon": "CreditCard", "items": "Upfront" }),
        &token,
    )
    .await;

    let json = body_json(get(app.router(), "/api/v1/pages/terms").await).await;
    assert_eq!(json["data"]["sections"][0]["icon"], "CreditCard");
    assert_eq!(json["data"]["contact_url"], CONTACT_URL);
}

// ---------------------------------------------------------------------------
// Admin page
// ---------------------------------------------------------------------------

#[tokio::test]
async fn admin_page_views() {
    let app = build_test_app();

    let anonymous = body_json(get(app.router(), "/api/v1/pages/admin").await).await;
    assert_eq!(anonymous["data"]["view"], "sign_in");

    let (_, token) = app.user_token("mika@site.test").await;
    let denied = body_json(get_auth(app.router(), "/api/v1/pages/admin", &token).await).await;
    assert_eq!(denied["data"]["view"], "access_denied");
    assert_eq!(denied["data"]["actions"], json!(["sign_out", "home"]));

    add_project(&app, "Knight", "Characters", Vec::new()).await;
    let admin = app.admin_token().await;
    let dashboard = body_json(get_auth(app.router(), "/api/v1/pages/admin", &admin).await).await;
    assert_eq!(dashboard["data"]["view"], "dashboard");
    assert_eq!(dashboard["data"]["counts"]["projects"], 1);
    assert_eq!(dashboard["data"]["counts"]["faqs"], 0);
    assert_eq!(dashboard["data"]["content"]["home"]["about"]["title"], "About Me");
}

// ---------------------------------------------------------------------------
// Unconfigured
// ---------------------------------------------------------------------------

#[tokio::test]
async fn pages_render_empty_without_store() {
    let app = build_unconfigured_app();

    let portfolio = get(app.router(), "/api/v1/pages/portfolio").await;
    assert_eq!(portfolio.status(), StatusCode::OK);
    assert!(body_json(portfolio).await["data"]["projects"]
        .as_array()
        .unwrap()
        .is_empty());

    let home = body_json(get(app.router(), "/api/v1/pages/home").await).await;
    assert_eq!(home["data"]["content"]["hero"]["name"], "Michael");

    let pricing = body_json(get(app.router(), "/api/v1/pages/pricing").await).await;
    assert!(pricing["data"]["plans"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn unconfigured_reviews_page_trusts_the_token() {
    let app = build_unconfigured_app();
    let token = generate_access_token(1, Some("mika@site.test"), &app.config.jwt)
        .expect("token generation should succeed");

    let response = get_auth(app.router(), "/api/v1/pages/reviews", &token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert!(json["data"]["reviews"].as_array().unwrap().is_empty());
    let viewer = &json["data"]["viewer"];
    assert_eq!(viewer["signed_in"], true);
    assert_eq!(viewer["has_reviewed"], false);
    assert!(viewer["display_name"].is_null());
    assert!(viewer["avatar_url"].is_null());
}
