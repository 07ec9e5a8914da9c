pub mod admin;
pub mod auth;
pub mod downloads;
pub mod health;
pub mod pages;
pub mod reviews;

use axum::routing::get;
use axum::Router;

use crate::state::AppState;
use crate::ws;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /realtime?tables=                                 WebSocket change channel
///
/// /auth/signup                                      sign up (public)
/// /auth/login                                       sign in (public)
/// /auth/refresh                                     rotate tokens (public)
/// /auth/logout                                      revoke sessions (auth)
/// /auth/me                                          session state
/// /auth/discord                                     external authorize url
/// /auth/discord/callback                            external sign-in
///
/// /pages/home                                       home snapshot
/// /pages/portfolio?category=                        portfolio snapshot
/// /pages/pricing                                    pricing snapshot
/// /pages/reviews                                    reviews snapshot
/// /pages/terms                                      terms snapshot
/// /pages/view/{id}?variant=                         viewer snapshot
/// /pages/admin                                      sign-in, access-denied or dashboard
///
/// /reviews                                          submit review (auth)
/// /reviews/check                                    inline profanity warning
///
/// /projects/{id}/images.zip                         image bundle
///
/// /admin/projects                                   list, create (admin only)
/// /admin/projects/{id}                              update, delete
/// /admin/pricing                                    list, create
/// /admin/pricing/{id}                               update, delete
/// /admin/terms-sections                             list, create
/// /admin/terms-sections/{id}                        update, delete
/// /admin/additional-terms                           list, create
/// /admin/additional-terms/{id}                      update, delete
/// /admin/faqs                                       list, create
/// /admin/faqs/{id}                                  update, delete
/// /admin/reviews                                    list all
/// /admin/reviews/{id}                               delete
/// /admin/reviews/{id}/approval                      show or hide (PUT)
/// /admin/content/{page}/{section}                   upsert page copy (PUT)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/realtime", get(ws::ws_handler))
        .nest("/auth", auth::router())
        .nest("/pages", pages::router())
        .nest("/reviews", reviews::router())
        .nest("/projects", downloads::router())
        .nest("/admin", admin::router())
}
