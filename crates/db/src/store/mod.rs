//! Store traits the API is written against.
//!
//! [`ContentStore`] covers the seven site collections; [`IdentityStore`]
//! covers accounts and refresh-token sessions. Both are object safe and are
//! injected as `Arc<dyn ...>` so handlers never know which backend they talk
//! to.
//!
//! Three backends exist:
//!
//! - [`PgContentStore`] / [`PgIdentityStore`]: the repositories over a pool.
//! - [`MemoryContentStore`] / [`MemoryIdentityStore`]: process-local, used by
//!   the API tests and for running without a database.
//! - [`UnconfiguredStore`]: used when no store endpoint is configured. Content
//!   reads come back empty and writes report nothing happened; identity calls
//!   fail with [`StoreError::Unconfigured`].

use async_trait::async_trait;
use folio_core::profanity::contains_profanity;
use folio_core::review::INAPPROPRIATE_CONTENT;
use folio_core::site_content::SitePage;
use folio_core::types::DbId;
use serde_json::{Map, Value};

use crate::models::faq::{CreateFaq, Faq, UpdateFaq};
use crate::models::pricing::{CreatePricingPlan, PricingPlan, UpdatePricingPlan};
use crate::models::project::{CreateProject, Project, UpdateProject};
use crate::models::review::{CreateReview, Review, UpdateReview};
use crate::models::session::{CreateSession, Session};
use crate::models::terms::{
    AdditionalTerm, CreateAdditionalTerm, CreateTermsSection, TermsSection, UpdateAdditionalTerm,
    UpdateTermsSection,
};
use crate::models::user::{CreateEmailUser, ExternalProfile, User};

mod identity;
mod memory;
mod postgres;
mod unconfigured;

pub use identity::{MemoryIdentityStore, PgIdentityStore};
pub use memory::{ChangeHook, MemoryContentStore};
pub use postgres::PgContentStore;
pub use unconfigured::UnconfiguredStore;

/// Message carried by outcomes that could not run for lack of a store.
pub const NOT_CONFIGURED: &str = "Not configured";

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error(transparent)]
    Database(#[from] sqlx::Error),

    /// A uniqueness rule was violated (e.g. an email already registered).
    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Store is not configured")]
    Unconfigured,
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Result of [`ContentStore::create_review`].
#[derive(Debug, Clone)]
pub enum ReviewOutcome {
    Created(Review),
    /// Refused before writing; carries the user-facing message.
    Rejected(&'static str),
    /// The store could not accept writes.
    Unavailable(&'static str),
}

/// Access to the site's content collections.
///
/// `create_*` returns `None` and `update_*`/`delete_*` return `false` when
/// nothing was written, either because the id is unknown or because the
/// store is unconfigured. Backend failures are `Err`.
#[async_trait]
pub trait ContentStore: Send + Sync {
    /// Whether a real backend sits behind this store.
    fn is_configured(&self) -> bool {
        true
    }

    /// Round-trip to the backend. Always `false` when unconfigured.
    async fn health_check(&self) -> bool;

    // -- projects --
    async fn list_projects(&self) -> StoreResult<Vec<Project>>;
    async fn find_project(&self, id: DbId) -> StoreResult<Option<Project>>;
    async fn create_project(&self, input: &CreateProject) -> StoreResult<Option<Project>>;
    async fn update_project(&self, id: DbId, input: &UpdateProject) -> StoreResult<bool>;
    async fn delete_project(&self, id: DbId) -> StoreResult<bool>;

    // -- pricing --
    async fn list_pricing(&self) -> StoreResult<Vec<PricingPlan>>;
    async fn find_pricing(&self, id: DbId) -> StoreResult<Option<PricingPlan>>;
    async fn create_pricing(&self, input: &CreatePricingPlan)
        -> StoreResult<Option<PricingPlan>>;
    async fn update_pricing(&self, id: DbId, input: &UpdatePricingPlan) -> StoreResult<bool>;
    async fn delete_pricing(&self, id: DbId) -> StoreResult<bool>;

    // -- terms sections --
    async fn list_terms_sections(&self) -> StoreResult<Vec<TermsSection>>;
    async fn find_terms_section(&self, id: DbId) -> StoreResult<Option<TermsSection>>;
    async fn create_terms_section(
        &self,
        input: &CreateTermsSection,
    ) -> StoreResult<Option<TermsSection>>;
    async fn update_terms_section(&self, id: DbId, input: &UpdateTermsSection)
        -> StoreResult<bool>;
    async fn delete_terms_section(&self, id: DbId) -> StoreResult<bool>;

    // -- additional terms --
    async fn list_additional_terms(&self) -> StoreResult<Vec<AdditionalTerm>>;
    async fn find_additional_term(&self, id: DbId) -> StoreResult<Option<AdditionalTerm>>;
    async fn create_additional_term(
        &self,
        input: &CreateAdditionalTerm,
    ) -> StoreResult<Option<AdditionalTerm>>;
    async fn update_additional_term(
        &self,
        id: DbId,
        input: &UpdateAdditionalTerm,
    ) -> StoreResult<bool>;
    async fn delete_additional_term(&self, id: DbId) -> StoreResult<bool>;

    // -- faqs --
    async fn list_faqs(&self) -> StoreResult<Vec<Faq>>;
    async fn find_faq(&self, id: DbId) -> StoreResult<Option<Faq>>;
    async fn create_faq(&self, input: &CreateFaq) -> StoreResult<Option<Faq>>;
    async fn update_faq(&self, id: DbId, input: &UpdateFaq) -> StoreResult<bool>;
    async fn delete_faq(&self, id: DbId) -> StoreResult<bool>;

    // -- reviews --
    /// Approved reviews, newest first.
    async fn list_approved_reviews(&self) -> StoreResult<Vec<Review>>;
    /// Every review, newest first.
    async fn list_all_reviews(&self) -> StoreResult<Vec<Review>>;
    /// Raw insert. Public submissions go through [`ContentStore::create_review`].
    async fn insert_review(
        &self,
        input: &CreateReview,
        is_approved: bool,
    ) -> StoreResult<Option<Review>>;
    async fn update_review(&self, id: DbId, input: &UpdateReview) -> StoreResult<bool>;
    async fn delete_review(&self, id: DbId) -> StoreResult<bool>;
    async fn has_user_reviewed(&self, user_id: DbId) -> StoreResult<bool>;

    // -- site content --
    /// Stored sections of `page`, keyed by section name.
    async fn get_site_content(&self, page: SitePage) -> StoreResult<Map<String, Value>>;
    async fn upsert_site_content(
        &self,
        page: SitePage,
        section: &str,
        content: &Value,
    ) -> StoreResult<bool>;

    /// Write a user-submitted review.
    ///
    /// The name and body are run through the profanity filter here, at the
    /// point of writing, whatever the caller already checked. Accepted
    /// reviews are stored approved.
    async fn create_review(&self, input: &CreateReview) -> StoreResult<ReviewOutcome> {
        if !self.is_configured() {
            return Ok(ReviewOutcome::Unavailable(NOT_CONFIGURED));
        }
        if contains_profanity(&input.name) || contains_profanity(&input.review_text) {
            tracing::info!(user_id = ?input.user_id, "Review rejected by profanity filter");
            return Ok(ReviewOutcome::Rejected(INAPPROPRIATE_CONTENT));
        }
        Ok(match self.insert_review(input, true).await? {
            Some(review) => ReviewOutcome::Created(review),
            None => ReviewOutcome::Unavailable(NOT_CONFIGURED),
        })
    }
}

/// Accounts and refresh-token sessions.
#[async_trait]
pub trait IdentityStore: Send + Sync {
    fn is_configured(&self) -> bool {
        true
    }

    async fn find_user(&self, id: DbId) -> StoreResult<Option<User>>;
    async fn find_user_by_email(&self, email: &str) -> StoreResult<Option<User>>;
    /// Fails with [`StoreError::Conflict`] when the email is taken.
    async fn create_email_user(&self, input: &CreateEmailUser) -> StoreResult<User>;
    async fn upsert_external_user(&self, profile: &ExternalProfile) -> StoreResult<User>;

    async fn create_session(&self, input: &CreateSession) -> StoreResult<Session>;
    /// A session matching `token_hash` that is neither revoked nor expired.
    async fn find_active_session(&self, token_hash: &str) -> StoreResult<Option<Session>>;
    async fn revoke_session(&self, id: DbId) -> StoreResult<bool>;
    async fn revoke_user_sessions(&self, user_id: DbId) -> StoreResult<u64>;
}
