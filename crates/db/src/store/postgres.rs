use async_trait::async_trait;
use folio_core::site_content::SitePage;
use folio_core::types::DbId;
use serde_json::{Map, Value};

use super::{ContentStore, StoreResult};
use crate::models::faq::{CreateFaq, Faq, UpdateFaq};
use crate::models::pricing::{CreatePricingPlan, PricingPlan, UpdatePricingPlan};
use crate::models::project::{CreateProject, Project, UpdateProject};
use crate::models::review::{CreateReview, Review, UpdateReview};
use crate::models::terms::{
    AdditionalTerm, CreateAdditionalTerm, CreateTermsSection, TermsSection, UpdateAdditionalTerm,
    UpdateTermsSection,
};
use crate::repositories::{
    AdditionalTermRepo, FaqRepo, PricingRepo, ProjectRepo, ReviewRepo, SiteContentRepo,
    TermsSectionRepo,
};
use crate::DbPool;

/// [`ContentStore`] backed by the Postgres repositories.
#[derive(Clone)]
pub struct PgContentStore {
    pool: DbPool,
}

impl PgContentStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ContentStore for PgContentStore {
    async fn health_check(&self) -> bool {
        crate::health_check(&self.pool).await.is_ok()
    }

    async fn list_projects(&self) -> StoreResult<Vec<Project>> {
        Ok(ProjectRepo::list(&self.pool).await?)
    }

    async fn find_project(&self, id: DbId) -> StoreResult<Option<Project>> {
        Ok(ProjectRepo::find_by_id(&self.pool, id).await?)
    }

    async fn create_project(&self, input: &CreateProject) -> StoreResult<Option<Project>> {
        Ok(Some(ProjectRepo::create(&self.pool, input).await?))
    }

    async fn update_project(&self, id: DbId, input: &UpdateProject) -> StoreResult<bool> {
        Ok(ProjectRepo::update(&self.pool, id, input).await?.is_some())
    }

    async fn delete_project(&self, id: DbId) -> StoreResult<bool> {
        Ok(ProjectRepo::delete(&self.pool, id).await?)
    }

    async fn list_pricing(&self) -> StoreResult<Vec<PricingPlan>> {
        Ok(PricingRepo::list(&self.pool).await?)
    }

    async fn find_pricing(&self, id: DbId) -> StoreResult<Option<PricingPlan>> {
        Ok(PricingRepo::find_by_id(&self.pool, id).await?)
    }

    async fn create_pricing(
        &self,
        input: &CreatePricingPlan,
    ) -> StoreResult<Option<PricingPlan>> {
        Ok(Some(PricingRepo::create(&self.pool, input).await?))
    }

    async fn update_pricing(&self, id: DbId, input: &UpdatePricingPlan) -> StoreResult<bool> {
        Ok(PricingRepo::update(&self.pool, id, input).await?.is_some())
    }

    async fn delete_pricing(&self, id: DbId) -> StoreResult<bool> {
        Ok(PricingRepo::delete(&self.pool, id).await?)
    }

    async fn list_terms_sections(&self) -> StoreResult<Vec<TermsSection>> {
        Ok(TermsSectionRepo::list(&self.pool).await?)
    }

    async fn find_terms_section(&self, id: DbId) -> StoreResult<Option<TermsSection>> {
        Ok(TermsSectionRepo::find_by_id(&self.pool, id).await?)
    }

    async fn create_terms_section(
        &self,
        input: &CreateTermsSection,
    ) -> StoreResult<Option<TermsSection>> {
        Ok(Some(TermsSectionRepo::create(&self.pool, input).await?))
    }

    async fn update_terms_section(
        &self,
        id: DbId,
        input: &UpdateTermsSection,
    ) -> StoreResult<bool> {
        Ok(TermsSectionRepo::update(&self.pool, id, input)
            .await?
            .is_some())
    }

    async fn delete_terms_section(&self, id: DbId) -> StoreResult<bool> {
        Ok(TermsSectionRepo::delete(&self.pool, id).await?)
    }

    async fn list_additional_terms(&self) -> StoreResult<Vec<AdditionalTerm>> {
        Ok(AdditionalTermRepo::list(&self.pool).await?)
    }

    async fn find_additional_term(&self, id: DbId) -> StoreResult<Option<AdditionalTerm>> {
        Ok(AdditionalTermRepo::find_by_id(&self.pool, id).await?)
    }

    async fn create_additional_term(
        &self,
        input: &CreateAdditionalTerm,
    ) -> StoreResult<Option<AdditionalTerm>> {
        Ok(Some(AdditionalTermRepo::create(&self.pool, input).await?))
    }

    async fn update_additional_term(
        &self,
        id: DbId,
        input: &UpdateAdditionalTerm,
    ) -> StoreResult<bool> {
        Ok(AdditionalTermRepo::update(&self.pool, id, input)
            .await?
            .is_some())
    }

    async fn delete_additional_term(&self, id: DbId) -> StoreResult<bool> {
        Ok(AdditionalTermRepo::delete(&self.pool, id).await?)
    }

    async fn list_faqs(&self) -> StoreResult<Vec<Faq>> {
        Ok(FaqRepo::list(&self.pool).await?)
    }

    async fn find_faq(&self, id: DbId) -> StoreResult<Option<Faq>> {
        Ok(FaqRepo::find_by_id(&self.pool, id).await?)
    }

    async fn create_faq(&self, input: &CreateFaq) -> StoreResult<Option<Faq>> {
        Ok(Some(FaqRepo::create(&self.pool, input).await?))
    }

    async fn update_faq(&self, id: DbId, input: &UpdateFaq) -> StoreResult<bool> {
        Ok(FaqRepo::update(&self.pool, id, input).await?.is_some())
    }

    async fn delete_faq(&self, id: DbId) -> StoreResult<bool> {
        Ok(FaqRepo::delete(&self.pool, id).await?)
    }

    async fn list_approved_reviews(&self) -> StoreResult<Vec<Review>> {
        Ok(ReviewRepo::list_approved(&self.pool).await?)
    }

    async fn list_all_reviews(&self) -> StoreResult<Vec<Review>> {
        Ok(ReviewRepo::list_all(&self.pool).await?)
    }

    async fn insert_review(
        &self,
        input: &CreateReview,
        is_approved: bool,
    ) -> StoreResult<Option<Review>> {
        Ok(Some(ReviewRepo::create(&self.pool, input, is_approved).await?))
    }

    async fn update_review(&self, id: DbId, input: &UpdateReview) -> StoreResult<bool> {
        Ok(ReviewRepo::update(&self.pool, id, input).await?.is_some())
    }

    async fn delete_review(&self, id: DbId) -> StoreResult<bool> {
        Ok(ReviewRepo::delete(&self.pool, id).await?)
    }

    async fn has_user_reviewed(&self, user_id: DbId) -> StoreResult<bool> {
        Ok(ReviewRepo::find_by_user(&self.pool, user_id)
            .await?
            .is_some())
    }

    async fn get_site_content(&self, page: SitePage) -> StoreResult<Map<String, Value>> {
        let rows = SiteContentRepo::list_for_page(&self.pool, page.as_str()).await?;
        Ok(rows
            .into_iter()
            .map(|row| (row.section, row.content))
            .collect())
    }

    async fn upsert_site_content(
        &self,
        page: SitePage,
        section: &str,
        content: &Value,
    ) -> StoreResult<bool> {
        SiteContentRepo::upsert(&self.pool, page.as_str(), section, content).await?;
        Ok(true)
    }
}
