//! Shared harness for the API integration tests.
//!
//! The app runs against the in-memory stores, so no database is needed.
//! Writes to the content store publish into the same change feed the
//! realtime channel reads from.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use folio_api::auth::jwt::{generate_access_token, JwtConfig};
use folio_api::auth::oauth::OAuthProvider;
use folio_api::config::ServerConfig;
use folio_api::router::build_app_router;
use folio_api::state::AppState;
use folio_api::ws::WsManager;
use folio_core::types::DbId;
use folio_db::models::user::CreateEmailUser;
use folio_db::{
    ContentStore, IdentityStore, MemoryContentStore, MemoryIdentityStore, UnconfiguredStore,
};
use folio_events::ChangeFeed;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

pub const ADMIN_EMAIL: &str = "owner@folio.test";
pub const CONTACT_URL: &str = "https://contact.folio.test";

/// Build a test `ServerConfig` with safe defaults and no inter-download delay.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        database_url: None,
        admin_email: ADMIN_EMAIL.to_string(),
        admin_password_hash: None,
        contact_url: CONTACT_URL.to_string(),
        download_delay_ms: 0,
        jwt: JwtConfig {
            secret: "integration-test-secret-long-enough".to_string(),
            access_token_expiry_mins: 15,
            refresh_token_expiry_days: 7,
        },
        discord: None,
    }
}

/// Handles on everything behind a test router.
#[derive(Clone)]
pub struct TestApp {
    pub router: Router,
    pub store: Arc<dyn ContentStore>,
    pub identity: Arc<dyn IdentityStore>,
    pub feed: Arc<ChangeFeed>,
    pub ws_manager: Arc<WsManager>,
    pub config: Arc<ServerConfig>,
}

impl TestApp {
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Insert an email account directly and mint an access token for it.
    pub async fn user_token(&self, email: &str) -> (DbId, String) {
        let user = self
            .identity
            .create_email_user(&CreateEmailUser {
                email: email.to_string(),
                password_hash: "unused".to_string(),
            })
            .await
            .expect("user insert should succeed");
        let token = generate_access_token(user.id, user.email.as_deref(), &self.config.jwt)
            .expect("token generation should succeed");
        (user.id, token)
    }

    pub async fn admin_token(&self) -> String {
        self.user_token(ADMIN_EMAIL).await.1
    }
}

fn assemble(
    store: Arc<dyn ContentStore>,
    identity: Arc<dyn IdentityStore>,
    feed: Arc<ChangeFeed>,
    oauth: Option<Arc<dyn OAuthProvider>>,
) -> TestApp {
    let config = Arc::new(test_config());
    let ws_manager = Arc::new(WsManager::new());
    let state = AppState {
        store: Arc::clone(&store),
        identity: Arc::clone(&identity),
        config: Arc::clone(&config),
        ws_manager: Arc::clone(&ws_manager),
        change_feed: Arc::clone(&feed),
        oauth,
        http: reqwest::Client::new(),
    };
    TestApp {
        router: build_app_router(state, &config),
        store,
        identity,
        feed,
        ws_manager,
        config,
    }
}

/// App over fresh in-memory stores.
pub fn build_test_app() -> TestApp {
    build_test_app_with_oauth(None)
}

pub fn build_test_app_with_oauth(oauth: Option<Arc<dyn OAuthProvider>>) -> TestApp {
    let feed = Arc::new(ChangeFeed::default());
    let store = Arc::new(MemoryContentStore::with_change_hook(feed.as_hook()));
    assemble(store, Arc::new(MemoryIdentityStore::new()), feed, oauth)
}

/// App with no store configured at all.
pub fn build_unconfigured_app() -> TestApp {
    assemble(
        Arc::new(UnconfiguredStore),
        Arc::new(UnconfiguredStore),
        Arc::new(ChangeFeed::default()),
        None,
    )
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

async fn send(
    app: Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string())),
        None => builder.body(Body::empty()),
    }
    .expect("request should build");
    app.oneshot(request).await.expect("router is infallible")
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None, None).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::GET, uri, Some(token), None).await
}

pub async fn post_json(app: Router, uri: &str, body: Value) -> Response<Body> {
    send(app, Method::POST, uri, None, Some(body)).await
}

pub async fn post_json_auth(app: Router, uri: &str, body: Value, token: &str) -> Response<Body> {
    send(app, Method::POST, uri, Some(token), Some(body)).await
}

pub async fn put_json_auth(app: Router, uri: &str, body: Value, token: &str) -> Response<Body> {
    send(app, Method::PUT, uri, Some(token), Some(body)).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, Some(token), None).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body should be readable")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body should be JSON")
}

/// Collect a response body as raw bytes.
pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .expect("body should be readable")
        .to_bytes()
        .to_vec()
}
