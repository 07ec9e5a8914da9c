//! Integration tests for the project image bundle.
//!
//! Images are served by a throwaway local HTTP server so the handler's
//! fetches go over a real socket.

mod common;

use std::io::{Cursor, Read};
use std::net::SocketAddr;

use axum::http::StatusCode;
use axum::routing::get as get_route;
use axum::Router;
use common::{body_bytes, body_json, build_test_app, get, TestApp};
use folio_core::variants::ProjectImage;
use folio_db::models::project::CreateProject;
use folio_db::ContentStore;

async fn serve_images() -> SocketAddr {
    let images = Router::new()
        .route("/red.png", get_route(|| async { &b"red-bytes"[..] }))
        .route("/blue.jpg", get_route(|| async { &b"blue-bytes"[..] }));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, images).await.unwrap();
    });
    addr
}

async fn add_project(app: &TestApp, title: &str, image_url: &str, images: Vec<ProjectImage>) -> i64 {
    app.store
        .create_project(&CreateProject {
            title: title.into(),
            description: String::new(),
            image_url: image_url.into(),
            images,
            category: "Weapons".into(),
            tags: Vec::new(),
            order_index: 1,
        })
        .await
        .unwrap()
        .unwrap()
        .id
}

fn variant(url: String, name: &str) -> ProjectImage {
    ProjectImage {
        url,
        color: "#ffffff".into(),
        name: name.into(),
    }
}

fn entries(bytes: Vec<u8>) -> Vec<(String, String)> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
    let mut out = Vec::new();
    for i in 0..archive.len() {
        let mut file = archive.by_index(i).unwrap();
        let mut contents = String::new();
        file.read_to_string(&mut contents).unwrap();
        out.push((file.name().to_string(), contents));
    }
    out.sort();
    out
}

// ---------------------------------------------------------------------------
// Bundles
// ---------------------------------------------------------------------------

#[tokio::test]
async fn bundle_contains_every_variant() {
    let addr = serve_images().await;
    let app = build_test_app();
    let id = add_project(
        &app,
        "Sword",
        &format!("http://{addr}/red.png"),
        vec![
            variant(format!("http://{addr}/red.png"), "Red"),
            variant(format!("http://{addr}/blue.jpg"), "Blue"),
        ],
    )
    .await;

    let response = get(app.router(), &format!("/api/v1/projects/{id}/images.zip")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()["content-type"], "application/zip");
    assert_eq!(
        response.headers()["content-disposition"],
        "attachment; filename=\"Sword-images.zip\""
    );

    let files = entries(body_bytes(response).await);
    assert_eq!(
        files,
        vec![
            ("Sword-Blue.jpg".to_string(), "blue-bytes".to_string()),
            ("Sword-Red.png".to_string(), "red-bytes".to_string()),
        ]
    );
}

#[tokio::test]
async fn primary_image_is_bundled_when_no_variants_are_stored() {
    let addr = serve_images().await;
    let app = build_test_app();
    let id = add_project(&app, "Sword", &format!("http://{addr}/red.png"), Vec::new()).await;

    let response = get(app.router(), &format!("/api/v1/projects/{id}/images.zip")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let files = entries(body_bytes(response).await);
    assert_eq!(files, vec![("Sword-Default.png".to_string(), "red-bytes".to_string())]);
}

#[tokio::test]
async fn failed_fetches_are_skipped() {
    let addr = serve_images().await;
    let app = build_test_app();
    let id = add_project(
        &app,
        "Sword",
        &format!("http://{addr}/red.png"),
        vec![
            variant(format!("http://{addr}/missing.png"), "Green"),
            variant(format!("http://{addr}/red.png"), "Red"),
        ],
    )
    .await;

    let response = get(app.router(), &format!("/api/v1/projects/{id}/images.zip")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let files = entries(body_bytes(response).await);
    assert_eq!(files.len(), 1);
    assert_eq!(files[0].0, "Sword-Red.png");
}

#[tokio::test]
async fn all_fetches_failing_is_unavailable() {
    let addr = serve_images().await;
    let app = build_test_app();
    let id = add_project(&app, "Sword", &format!("http://{addr}/missing.png"), Vec::new()).await;

    let response = get(app.router(), &format!("/api/v1/projects/{id}/images.zip")).await;
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[tokio::test]
async fn project_without_images_is_a_bad_request() {
    let app = build_test_app();
    let id = add_project(&app, "Sword", "", Vec::new()).await;

    let response = get(app.router(), &format!("/api/v1/projects/{id}/images.zip")).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"], "No images to download");
}

#[tokio::test]
async fn missing_project_is_404() {
    let app = build_test_app();
    let response = get(app.router(), "/api/v1/projects/77/images.zip").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
