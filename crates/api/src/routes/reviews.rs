use axum::routing::post;
use axum::Router;

use crate::handlers::reviews;
use crate::state::AppState;

/// Routes mounted at `/reviews`.
///
/// ```text
/// POST /        -> submit (requires auth)
/// POST /check   -> check
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(reviews::submit))
        .route("/check", post(reviews::check))
}
