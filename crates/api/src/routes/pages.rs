//! Route definitions for page snapshots.

use axum::routing::get;
use axum::Router;

use crate::handlers::pages;
use crate::state::AppState;

/// Routes mounted at `/pages`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/home", get(pages::home))
        .route("/portfolio", get(pages::portfolio))
        .route("/pricing", get(pages::pricing))
        .route("/reviews", get(pages::reviews))
        .route("/terms", get(pages::terms))
        .route("/view/{id}", get(pages::view))
        .route("/admin", get(pages::admin))
}
