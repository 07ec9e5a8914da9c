//! Route definitions for the admin dashboard.

use axum::routing::{delete, get, put};
use axum::Router;

use crate::handlers::admin;
use crate::state::AppState;

/// Routes mounted at `/admin`. Every handler requires the admin account.
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/projects",
            get(admin::list_projects).post(admin::create_project),
        )
        .route(
            "/projects/{id}",
            put(admin::update_project).delete(admin::delete_project),
        )
        .route(
            "/pricing",
            get(admin::list_pricing).post(admin::create_pricing),
        )
        .route(
            "/pricing/{id}",
            put(admin::update_pricing).delete(admin::delete_pricing),
        )
        .route(
            "/terms-sections",
            get(admin::list_terms_sections).post(admin::create_terms_section),
        )
        .route(
            "/terms-sections/{id}",
            put(admin::update_terms_section).delete(admin::delete_terms_section),
        )
        .route(
            "/additional-terms",
            get(admin::list_additional_terms).post(admin::create_additional_term),
        )
        .route(
            "/additional-terms/{id}",
            put(admin::update_additional_term).delete(admin::delete_additional_term),
        )
        .route("/faqs", get(admin::list_faqs).post(admin::create_faq))
        .route(
            "/faqs/{id}",
            put(admin::update_faq).delete(admin::delete_faq),
        )
        .route("/reviews", get(admin::list_reviews))
        .route("/reviews/{id}", delete(admin::delete_review))
        .route("/reviews/{id}/approval", put(admin::set_review_approval))
        .route("/content/{page}/{section}", put(admin::upsert_content))
}
