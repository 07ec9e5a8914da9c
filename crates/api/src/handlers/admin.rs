//! Handlers for the admin dashboard (`/admin/...`).
//!
//! Every save, create or edit, stamps `order_index = collection length + 1`,
//! so an edited record moves to the end of its list. Writes re-read the
//! record and return it so the dashboard reflects its own action without
//! waiting for the realtime round-trip.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use folio_core::error::CoreError;
use folio_core::forms::next_order_index;
use folio_core::site_content::{merge_with_defaults, SitePage};
use folio_core::types::DbId;
use folio_db::models::review::UpdateReview;
use folio_db::NOT_CONFIGURED;
use serde::Deserialize;
use serde_json::Value;

use crate::error::{AppError, AppResult};
use crate::forms::{AdditionalTermForm, FaqForm, PricingForm, ProjectForm, TermsSectionForm};
use crate::handlers::pages::ProjectCard;
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Writes against an unconfigured store would silently do nothing.
fn ensure_configured(state: &AppState) -> AppResult<()> {
    if state.store.is_configured() {
        Ok(())
    } else {
        Err(AppError::Core(CoreError::Unavailable(NOT_CONFIGURED.into())))
    }
}

fn not_found(entity: &'static str, id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity, id })
}

fn no_row(entity: &str) -> AppError {
    AppError::InternalError(format!("{entity} insert returned no row"))
}

/// A configured store reported that an upsert touched nothing.
fn ensure_saved(saved: bool, entity: &str) -> AppResult<()> {
    if saved {
        Ok(())
    } else {
        Err(AppError::InternalError(format!("{entity} was not saved")))
    }
}

// ---------------------------------------------------------------------------
// Projects
// ---------------------------------------------------------------------------

/// GET /api/v1/admin/projects
pub async fn list_projects(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let projects: Vec<ProjectCard> = state
        .store
        .list_projects()
        .await?
        .into_iter()
        .map(ProjectCard::from)
        .collect();
    Ok(Json(DataResponse { data: projects }))
}

/// POST /api/v1/admin/projects
pub async fn create_project(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Json(form): Json<ProjectForm>,
) -> AppResult<impl IntoResponse> {
    form.check()?;
    ensure_configured(&state)?;
    let count = state.store.list_projects().await?.len();
    let input = form.into_create(next_order_index(count))?;

    let project = state
        .store
        .create_project(&input)
        .await?
        .ok_or_else(|| no_row("Project"))?;
    tracing::info!(project_id = project.id, order_index = project.order_index, "Project created");

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: ProjectCard::from(project),
        }),
    ))
}

/// PUT /api/v1/admin/projects/{id}
pub async fn update_project(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(form): Json<ProjectForm>,
) -> AppResult<impl IntoResponse> {
    form.check()?;
    ensure_configured(&state)?;
    let count = state.store.list_projects().await?.len();
    let input = form.into_update(next_order_index(count))?;

    if !state.store.update_project(id, &input).await? {
        return Err(not_found("Project", id));
    }
    let project = state
        .store
        .find_project(id)
        .await?
        .ok_or_else(|| not_found("Project", id))?;
    tracing::info!(project_id = id, order_index = project.order_index, "Project updated");

    Ok(Json(DataResponse {
        data: ProjectCard::from(project),
    }))
}

/// DELETE /api/v1/admin/projects/{id}
pub async fn delete_project(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    ensure_configured(&state)?;
    if !state.store.delete_project(id).await? {
        return Err(not_found("Project", id));
    }
    tracing::info!(project_id = id, "Project deleted");
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Pricing
// ---------------------------------------------------------------------------

/// At most one plan may be popular, otherwise the centered-card order is
/// undefined. `editing` is skipped so re-saving the popular plan is fine.
async fn ensure_single_popular(state: &AppState, editing: Option<DbId>) -> AppResult<()> {
    let taken = state
        .store
        .list_pricing()
        .await?
        .iter()
        .any(|p| p.is_popular && Some(p.id) != editing);
    if taken {
        return Err(AppError::Core(CoreError::Conflict(
            "Another plan is already marked popular".into(),
        )));
    }
    Ok(())
}

/// GET /api/v1/admin/pricing
pub async fn list_pricing(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let plans = state.store.list_pricing().await?;
    Ok(Json(DataResponse { data: plans }))
}

/// POST /api/v1/admin/pricing
pub async fn create_pricing(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Json(form): Json<PricingForm>,
) -> AppResult<impl IntoResponse> {
    form.check()?;
    ensure_configured(&state)?;
    let count = state.store.list_pricing().await?.len();
    let input = form.into_create(next_order_index(count))?;
    if input.is_popular {
        ensure_single_popular(&state, None).await?;
    }

    let plan = state
        .store
        .create_pricing(&input)
        .await?
        .ok_or_else(|| no_row("Pricing plan"))?;
    tracing::info!(plan_id = plan.id, is_popular = plan.is_popular, "Pricing plan created");

    Ok((StatusCode::CREATED, Json(DataResponse { data: plan })))
}

/// PUT /api/v1/admin/pricing/{id}
pub async fn update_pricing(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(form): Json<PricingForm>,
) -> AppResult<impl IntoResponse> {
    form.check()?;
    ensure_configured(&state)?;
    let count = state.store.list_pricing().await?.len();
    let input = form.into_update(next_order_index(count))?;
    if input.is_popular == Some(true) {
        ensure_single_popular(&state, Some(id)).await?;
    }

    if !state.store.update_pricing(id, &input).await? {
        return Err(not_found("PricingPlan", id));
    }
    let plan = state
        .store
        .find_pricing(id)
        .await?
        .ok_or_else(|| not_found("PricingPlan", id))?;
    tracing::info!(plan_id = id, "Pricing plan updated");

    Ok(Json(DataResponse { data: plan }))
}

/// DELETE /api/v1/admin/pricing/{id}
pub async fn delete_pricing(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    ensure_configured(&state)?;
    if !state.store.delete_pricing(id).await? {
        return Err(not_found("PricingPlan", id));
    }
    tracing::info!(plan_id = id, "Pricing plan deleted");
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Terms sections
// ---------------------------------------------------------------------------

/// GET /api/v1/admin/terms-sections
pub async fn list_terms_sections(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let sections = state.store.list_terms_sections().await?;
    Ok(Json(DataResponse { data: sections }))
}

/// POST /api/v1/admin/terms-sections
pub async fn create_terms_section(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Json(form): Json<TermsSectionForm>,
) -> AppResult<impl IntoResponse> {
    form.check()?;
    ensure_configured(&state)?;
    let count = state.store.list_terms_sections().await?.len();
    let input = form.into_create(next_order_index(count))?;

    let section = state
        .store
        .create_terms_section(&input)
        .await?
        .ok_or_else(|| no_row("Terms section"))?;
    tracing::info!(section_id = section.id, "Terms section created");

    Ok((StatusCode::CREATED, Json(DataResponse { data: section })))
}

/// PUT /api/v1/admin/terms-sections/{id}
pub async fn update_terms_section(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(form): Json<TermsSectionForm>,
) -> AppResult<impl IntoResponse> {
    form.check()?;
    ensure_configured(&state)?;
    let count = state.store.list_terms_sections().await?.len();
    let input = form.into_update(next_order_index(count))?;

    if !state.store.update_terms_section(id, &input).await? {
        return Err(not_found("TermsSection", id));
    }
    let section = state
        .store
        .find_terms_section(id)
        .await?
        .ok_or_else(|| not_found("TermsSection", id))?;

    Ok(Json(DataResponse { data: section }))
}

/// DELETE /api/v1/admin/terms-sections/{id}
pub async fn delete_terms_section(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    ensure_configured(&state)?;
    if !state.store.delete_terms_section(id).await? {
        return Err(not_found("TermsSection", id));
    }
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Additional terms
// ---------------------------------------------------------------------------

/// GET /api/v1/admin/additional-terms
pub async fn list_additional_terms(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let terms = state.store.list_additional_terms().await?;
    Ok(Json(DataResponse { data: terms }))
}

/// POST /api/v1/admin/additional-terms
pub async fn create_additional_term(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Json(form): Json<AdditionalTermForm>,
) -> AppResult<impl IntoResponse> {
    form.check()?;
    ensure_configured(&state)?;
    let count = state.store.list_additional_terms().await?.len();
    let input = form.into_create(next_order_index(count))?;

    let term = state
        .store
        .create_additional_term(&input)
        .await?
        .ok_or_else(|| no_row("Additional term"))?;

    Ok((StatusCode::CREATED, Json(DataResponse { data: term })))
}

/// PUT /api/v1/admin/additional-terms/{id}
pub async fn update_additional_term(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(form): Json<AdditionalTermForm>,
) -> AppResult<impl IntoResponse> {
    form.check()?;
    ensure_configured(&state)?;
    let count = state.store.list_additional_terms().await?.len();
    let input = form.into_update(next_order_index(count))?;

    if !state.store.update_additional_term(id, &input).await? {
        return Err(not_found("AdditionalTerm", id));
    }
    let term = state
        .store
        .find_additional_term(id)
        .await?
        .ok_or_else(|| not_found("AdditionalTerm", id))?;

    Ok(Json(DataResponse { data: term }))
}

/// DELETE /api/v1/admin/additional-terms/{id}
pub async fn delete_additional_term(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    ensure_configured(&state)?;
    if !state.store.delete_additional_term(id).await? {
        return Err(not_found("AdditionalTerm", id));
    }
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// FAQs
// ---------------------------------------------------------------------------

/// GET /api/v1/admin/faqs
pub async fn list_faqs(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let faqs = state.store.list_faqs().await?;
    Ok(Json(DataResponse { data: faqs }))
}

/// POST /api/v1/admin/faqs
pub async fn create_faq(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Json(form): Json<FaqForm>,
) -> AppResult<impl IntoResponse> {
    form.check()?;
    ensure_configured(&state)?;
    let count = state.store.list_faqs().await?.len();
    let input = form.into_create(next_order_index(count))?;

    let faq = state
        .store
        .create_faq(&input)
        .await?
        .ok_or_else(|| no_row("FAQ"))?;

    Ok((StatusCode::CREATED, Json(DataResponse { data: faq })))
}

/// PUT /api/v1/admin/faqs/{id}
pub async fn update_faq(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(form): Json<FaqForm>,
) -> AppResult<impl IntoResponse> {
    form.check()?;
    ensure_configured(&state)?;
    let count = state.store.list_faqs().await?.len();
    let input = form.into_update(next_order_index(count))?;

    if !state.store.update_faq(id, &input).await? {
        return Err(not_found("Faq", id));
    }
    let faq = state
        .store
        .find_faq(id)
        .await?
        .ok_or_else(|| not_found("Faq", id))?;

    Ok(Json(DataResponse { data: faq }))
}

/// DELETE /api/v1/admin/faqs/{id}
pub async fn delete_faq(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    ensure_configured(&state)?;
    if !state.store.delete_faq(id).await? {
        return Err(not_found("Faq", id));
    }
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Reviews
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct ApprovalRequest {
    pub is_approved: bool,
}

/// GET /api/v1/admin/reviews
///
/// Every review, hidden ones included, newest first.
pub async fn list_reviews(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let reviews = state.store.list_all_reviews().await?;
    Ok(Json(DataResponse { data: reviews }))
}

/// PUT /api/v1/admin/reviews/{id}/approval
pub async fn set_review_approval(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<ApprovalRequest>,
) -> AppResult<StatusCode> {
    ensure_configured(&state)?;
    let patch = UpdateReview {
        is_approved: Some(input.is_approved),
    };
    if !state.store.update_review(id, &patch).await? {
        return Err(not_found("Review", id));
    }
    tracing::info!(review_id = id, is_approved = input.is_approved, "Review approval changed");
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/v1/admin/reviews/{id}
pub async fn delete_review(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    ensure_configured(&state)?;
    if !state.store.delete_review(id).await? {
        return Err(not_found("Review", id));
    }
    tracing::info!(review_id = id, "Review deleted");
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Site content
// ---------------------------------------------------------------------------

/// PUT /api/v1/admin/content/{page}/{section}
///
/// Replace one section of a page's copy. Responds with the merged page.
pub async fn upsert_content(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path((page, section)): Path<(String, String)>,
    Json(content): Json<Value>,
) -> AppResult<impl IntoResponse> {
    let page: SitePage = page
        .parse()
        .map_err(|e: String| AppError::Core(CoreError::Validation(e)))?;
    let section = section.trim();
    if section.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Section required".into(),
        )));
    }
    if !content.is_object() {
        return Err(AppError::BadRequest(
            "Section content must be a JSON object".into(),
        ));
    }

    ensure_configured(&state)?;

    let saved = state
        .store
        .upsert_site_content(page, section, &content)
        .await?;
    ensure_saved(saved, "Site content")?;
    tracing::info!(page = page.as_str(), section, "Site content saved");

    let stored = state.store.get_site_content(page).await?;
    Ok(Json(DataResponse {
        data: merge_with_defaults(page, &stored),
    }))
}
