//! Page snapshots for the public site and the admin dashboard.
//!
//! Each handler does a full read of the collections its page shows. The
//! client re-requests the snapshot whenever the realtime channel reports a
//! change on one of them.

use std::collections::BTreeMap;

use axum::extract::{Path, Query, State};
use axum::Json;
use folio_core::auth::is_admin_email;
use folio_core::catalog::{category_matches, ProjectCategory};
use folio_core::error::CoreError;
use folio_core::pricing::display_order;
use folio_core::site_content::{merge_with_defaults, SitePage};
use folio_core::types::DbId;
use folio_core::variants::{select_variant, ProjectImage};
use folio_db::models::faq::Faq;
use folio_db::models::pricing::PricingPlan;
use folio_db::models::project::Project;
use folio_db::models::review::Review;
use folio_db::models::terms::{AdditionalTerm, TermsSection};
use folio_db::{ContentStore, StoreError, StoreResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::{AuthUser, MaybeAuthUser};
use crate::response::{DataResponse, ACCESS_DENIED_ACTIONS};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Snapshot types
// ---------------------------------------------------------------------------

/// A project together with its effective image list.
#[derive(Debug, Serialize)]
pub struct ProjectCard {
    #[serde(flatten)]
    pub project: Project,
    pub variants: Vec<ProjectImage>,
}

impl From<Project> for ProjectCard {
    fn from(project: Project) -> Self {
        let variants = project.variants();
        Self { project, variants }
    }
}

#[derive(Debug, Serialize)]
pub struct HomePage {
    pub content: Value,
}

#[derive(Debug, Serialize)]
pub struct PortfolioPage {
    pub categories: Vec<&'static str>,
    /// Filter that was applied, `"All"` when none was given.
    pub category: String,
    pub projects: Vec<ProjectCard>,
}

#[derive(Debug, Serialize)]
pub struct PricingPage {
    /// Plans in display order, popular plan centered.
    pub plans: Vec<PricingPlan>,
    pub faqs: Vec<Faq>,
    pub content: Value,
    pub contact_url: String,
}

/// What the reviews page knows about a signed-in visitor.
#[derive(Debug, Serialize)]
pub struct Viewer {
    pub signed_in: bool,
    pub has_reviewed: bool,
    pub display_name: Option<String>,
    pub avatar_url: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ReviewsPage {
    pub reviews: Vec<Review>,
    pub content: Value,
    pub viewer: Viewer,
}

#[derive(Debug, Serialize)]
pub struct TermsPage {
    pub sections: Vec<TermsSection>,
    pub additional_terms: Vec<AdditionalTerm>,
    pub content: Value,
    pub contact_url: String,
}

#[derive(Debug, Serialize)]
pub struct ViewerPage {
    pub project: ProjectCard,
    /// Variant picked by `?variant=`, or the first one.
    pub selected: Option<ProjectImage>,
}

/// Row counts shown on the dashboard tabs.
#[derive(Debug, Serialize)]
pub struct DashboardCounts {
    pub projects: usize,
    pub pricing: usize,
    pub reviews: usize,
    pub terms_sections: usize,
    pub additional_terms: usize,
    pub faqs: usize,
}

#[derive(Debug, Serialize)]
pub struct Dashboard {
    pub projects: Vec<ProjectCard>,
    pub pricing: Vec<PricingPlan>,
    pub reviews: Vec<Review>,
    pub terms_sections: Vec<TermsSection>,
    pub additional_terms: Vec<AdditionalTerm>,
    pub faqs: Vec<Faq>,
    /// Merged copy of every editable page, keyed by page name.
    pub content: BTreeMap<&'static str, Value>,
    pub counts: DashboardCounts,
}

/// The admin page renders one of three views.
#[derive(Debug, Serialize)]
#[serde(tag = "view", rename_all = "snake_case")]
pub enum AdminPage {
    SignIn,
    AccessDenied { actions: [&'static str; 2] },
    Dashboard(Box<Dashboard>),
}

// ---------------------------------------------------------------------------
// Query params
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct PortfolioQuery {
    pub category: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ViewerQuery {
    pub variant: Option<usize>,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn page_content(store: &dyn ContentStore, page: SitePage) -> StoreResult<Value> {
    let stored = store.get_site_content(page).await?;
    Ok(merge_with_defaults(page, &stored))
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/pages/home
pub async fn home(State(state): State<AppState>) -> AppResult<Json<DataResponse<HomePage>>> {
    let content = page_content(state.store.as_ref(), SitePage::Home).await?;
    Ok(Json(DataResponse {
        data: HomePage { content },
    }))
}

/// GET /api/v1/pages/portfolio?category=
pub async fn portfolio(
    State(state): State<AppState>,
    Query(params): Query<PortfolioQuery>,
) -> AppResult<Json<DataResponse<PortfolioPage>>> {
    let filter = params.category.as_deref().filter(|c| !c.is_empty());
    let projects = state
        .store
        .list_projects()
        .await?
        .into_iter()
        .filter(|p| category_matches(filter, &p.category))
        .map(ProjectCard::from)
        .collect();

    Ok(Json(DataResponse {
        data: PortfolioPage {
            categories: ProjectCategory::filter_labels(),
            category: filter
                .unwrap_or(folio_core::catalog::ALL_CATEGORIES_FILTER)
                .to_string(),
            projects,
        },
    }))
}

/// GET /api/v1/pages/pricing
pub async fn pricing(State(state): State<AppState>) -> AppResult<Json<DataResponse<PricingPage>>> {
    let store = state.store.as_ref();
    let (plans, faqs, content) = tokio::try_join!(
        store.list_pricing(),
        store.list_faqs(),
        page_content(store, SitePage::Pricing),
    )?;

    Ok(Json(DataResponse {
        data: PricingPage {
            plans: display_order(&plans),
            faqs,
            content,
            contact_url: state.config.contact_url.clone(),
        },
    }))
}

/// GET /api/v1/pages/reviews
pub async fn reviews(
    State(state): State<AppState>,
    MaybeAuthUser(auth_user): MaybeAuthUser,
) -> AppResult<Json<DataResponse<ReviewsPage>>> {
    let store = state.store.as_ref();
    let (reviews, content) = tokio::try_join!(
        store.list_approved_reviews(),
        page_content(store, SitePage::Reviews),
    )?;

    let viewer = match auth_user {
        Some(auth) => signed_in_viewer(&state, &auth).await?,
        None => Viewer {
            signed_in: false,
            has_reviewed: false,
            display_name: None,
            avatar_url: None,
        },
    };

    Ok(Json(DataResponse {
        data: ReviewsPage {
            reviews,
            content,
            viewer,
        },
    }))
}

async fn signed_in_viewer(state: &AppState, auth: &AuthUser) -> AppResult<Viewer> {
    // Without an identity store the token alone says who is signed in.
    let user = match state.identity.find_user(auth.user_id).await {
        Ok(user) => user,
        Err(StoreError::Unconfigured) => None,
        Err(e) => return Err(e.into()),
    };
    let has_reviewed = state.store.has_user_reviewed(auth.user_id).await?;
    Ok(Viewer {
        signed_in: true,
        has_reviewed,
        display_name: user.as_ref().and_then(|u| u.display_name.clone()),
        avatar_url: user.and_then(|u| u.avatar_url),
    })
}

/// GET /api/v1/pages/terms
pub async fn terms(State(state): State<AppState>) -> AppResult<Json<DataResponse<TermsPage>>> {
    let store = state.store.as_ref();
    let (sections, additional_terms, content) = tokio::try_join!(
        store.list_terms_sections(),
        store.list_additional_terms(),
        page_content(store, SitePage::Terms),
    )?;

    Ok(Json(DataResponse {
        data: TermsPage {
            sections,
            additional_terms,
            content,
            contact_url: state.config.contact_url.clone(),
        },
    }))
}

/// GET /api/v1/pages/view/{id}?variant=
pub async fn view(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Query(params): Query<ViewerQuery>,
) -> AppResult<Json<DataResponse<ViewerPage>>> {
    let project = state
        .store
        .find_project(id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id,
        }))?;

    let card = ProjectCard::from(project);
    let selected = select_variant(&card.variants, params.variant.unwrap_or(0)).cloned();
    Ok(Json(DataResponse {
        data: ViewerPage {
            project: card,
            selected,
        },
    }))
}

/// GET /api/v1/pages/admin
///
/// Anonymous callers get the sign-in view and non-admins the access-denied
/// view. Neither is an error response.
pub async fn admin(
    State(state): State<AppState>,
    MaybeAuthUser(auth_user): MaybeAuthUser,
) -> AppResult<Json<DataResponse<AdminPage>>> {
    let Some(auth) = auth_user else {
        return Ok(Json(DataResponse {
            data: AdminPage::SignIn,
        }));
    };
    if !is_admin_email(auth.email.as_deref(), &state.config.admin_email) {
        return Ok(Json(DataResponse {
            data: AdminPage::AccessDenied {
                actions: ACCESS_DENIED_ACTIONS,
            },
        }));
    }

    let store = state.store.as_ref();
    let (projects, pricing, reviews, terms_sections, additional_terms, faqs) = tokio::try_join!(
        store.list_projects(),
        store.list_pricing(),
        store.list_all_reviews(),
        store.list_terms_sections(),
        store.list_additional_terms(),
        store.list_faqs(),
    )?;

    let mut content = BTreeMap::new();
    for page in SitePage::ALL {
        content.insert(page.as_str(), page_content(store, page).await?);
    }

    let counts = DashboardCounts {
        projects: projects.len(),
        pricing: pricing.len(),
        reviews: reviews.len(),
        terms_sections: terms_sections.len(),
        additional_terms: additional_terms.len(),
        faqs: faqs.len(),
    };

    Ok(Json(DataResponse {
        data: AdminPage::Dashboard(Box::new(Dashboard {
            projects: projects.into_iter().map(ProjectCard::from).collect(),
            pricing,
            reviews,
            terms_sections,
            additional_terms,
            faqs,
            content,
            counts,
        })),
    }))
}
