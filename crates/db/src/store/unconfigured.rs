use async_trait::async_trait;
use folio_core::site_content::SitePage;
use folio_core::types::DbId;
use serde_json::{Map, Value};

use super::{ContentStore, IdentityStore, StoreError, StoreResult};
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

/// Stand-in used when no store endpoint is configured.
///
/// Content behaves like an empty store that ignores writes. Identity calls
/// fail, since there is no empty answer to "sign this user in".
#[derive(Debug, Clone, Copy, Default)]
pub struct UnconfiguredStore;

#[async_trait]
impl ContentStore for UnconfiguredStore {
    fn is_configured(&self) -> bool {
        false
    }

    async fn health_check(&self) -> bool {
        false
    }

    async fn list_projects(&self) -> StoreResult<Vec<Project>> {
        Ok(Vec::new())
    }

    async fn find_project(&self, _id: DbId) -> StoreResult<Option<Project>> {
        Ok(None)
    }

    async fn create_project(&self, _input: &CreateProject) -> StoreResult<Option<Project>> {
        Ok(None)
    }

    async fn update_project(&self, _id: DbId, _input: &UpdateProject) -> StoreResult<bool> {
        Ok(false)
    }

    async fn delete_project(&self, _id: DbId) -> StoreResult<bool> {
        Ok(false)
    }

    async fn list_pricing(&self) -> StoreResult<Vec<PricingPlan>> {
        Ok(Vec::new())
    }

    async fn find_pricing(&self, _id: DbId) -> StoreResult<Option<PricingPlan>> {
        Ok(None)
    }

    async fn create_pricing(
        &self,
        _input: &CreatePricingPlan,
    ) -> StoreResult<Option<PricingPlan>> {
        Ok(None)
    }

    async fn update_pricing(&self, _id: DbId, _input: &UpdatePricingPlan) -> StoreResult<bool> {
        Ok(false)
    }

    async fn delete_pricing(&self, _id: DbId) -> StoreResult<bool> {
        Ok(false)
    }

    async fn list_terms_sections(&self) -> StoreResult<Vec<TermsSection>> {
        Ok(Vec::new())
    }

    async fn find_terms_section(&self, _id: DbId) -> StoreResult<Option<TermsSection>> {
        Ok(None)
    }

    async fn create_terms_section(
        &self,
        _input: &CreateTermsSection,
    ) -> StoreResult<Option<TermsSection>> {
        Ok(None)
    }

    async fn update_terms_section(
        &self,
        _id: DbId,
        _input: &UpdateTermsSection,
    ) -> StoreResult<bool> {
        Ok(false)
    }

    async fn delete_terms_section(&self, _id: DbId) -> StoreResult<bool> {
        Ok(false)
    }

    async fn list_additional_terms(&self) -> StoreResult<Vec<AdditionalTerm>> {
        Ok(Vec::new())
    }

    async fn find_additional_term(&self, _id: DbId) -> StoreResult<Option<AdditionalTerm>> {
        Ok(None)
    }

    async fn create_additional_term(
        &self,
        _input: &CreateAdditionalTerm,
    ) -> StoreResult<Option<AdditionalTerm>> {
        Ok(None)
    }

    async fn update_additional_term(
        &self,
        _id: DbId,
        _input: &UpdateAdditionalTerm,
    ) -> StoreResult<bool> {
        Ok(false)
    }

    async fn delete_additional_term(&self, _id: DbId) -> StoreResult<bool> {
        Ok(false)
    }

    async fn list_faqs(&self) -> StoreResult<Vec<Faq>> {
        Ok(Vec::new())
    }

    async fn find_faq(&self, _id: DbId) -> StoreResult<Option<Faq>> {
        Ok(None)
    }

    async fn create_faq(&self, _input: &CreateFaq) -> StoreResult<Option<Faq>> {
        Ok(None)
    }

    async fn update_faq(&self, _id: DbId, _input: &UpdateFaq) -> StoreResult<bool> {
        Ok(false)
    }

    async fn delete_faq(&self, _id: DbId) -> StoreResult<bool> {
        Ok(false)
    }

    async fn list_approved_reviews(&self) -> StoreResult<Vec<Review>> {
        Ok(Vec::new())
    }

    async fn list_all_reviews(&self) -> StoreResult<Vec<Review>> {
        Ok(Vec::new())
    }

    async fn insert_review(
        &self,
        _input: &CreateReview,
        _is_approved: bool,
    ) -> StoreResult<Option<Review>> {
        Ok(None)
    }

    async fn update_review(&self, _id: DbId, _input: &UpdateReview) -> StoreResult<bool> {
        Ok(false)
    }

    async fn delete_review(&self, _id: DbId) -> StoreResult<bool> {
        Ok(false)
    }

    async fn has_user_reviewed(&self, _user_id: DbId) -> StoreResult<bool> {
        Ok(false)
    }

    async fn get_site_content(&self, _page: SitePage) -> StoreResult<Map<String, Value>> {
        Ok(Map::new())
    }

    async fn upsert_site_content(
        &self,
        _page: SitePage,
        _section: &str,
        _content: &Value,
    ) -> StoreResult<bool> {
        Ok(false)
    }
}

#[async_trait]
impl IdentityStore for UnconfiguredStore {
    fn is_configured(&self) -> bool {
        false
    }

    async fn find_user(&self, _id: DbId) -> StoreResult<Option<User>> {
        Err(StoreError::Unconfigured)
    }

    async fn find_user_by_email(&self, _email: &str) -> StoreResult<Option<User>> {
        Err(StoreError::Unconfigured)
    }

    async fn create_email_user(&self, _input: &CreateEmailUser) -> StoreResult<User> {
        Err(StoreError::Unconfigured)
    }

    async fn upsert_external_user(&self, _profile: &ExternalProfile) -> StoreResult<User> {
        Err(StoreError::Unconfigured)
    }

    async fn create_session(&self, _input: &CreateSession) -> StoreResult<Session> {
        Err(StoreError::Unconfigured)
    }

    async fn find_active_session(&self, _token_hash: &str) -> StoreResult<Option<Session>> {
        Err(StoreError::Unconfigured)
    }

    async fn revoke_session(&self, _id: DbId) -> StoreResult<bool> {
        Err(StoreError::Unconfigured)
    }

    async fn revoke_user_sessions(&self, _user_id: DbId) -> StoreResult<u64> {
        Err(StoreError::Unconfigured)
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;
    use crate::store::{ReviewOutcome, NOT_CONFIGURED};

    #[tokio::test]
    async fn reads_are_empty() {
        let store = UnconfiguredStore;
        assert!(store.list_projects().await.unwrap().is_empty());
        assert!(store.list_approved_reviews().await.unwrap().is_empty());
        assert!(store.find_project(1).await.unwrap().is_none());
        assert!(store.get_site_content(SitePage::Home).await.unwrap().is_empty());
        assert!(!ContentStore::is_configured(&store));
        assert!(!store.health_check().await);
    }

    #[tokio::test]
    async fn writes_report_nothing_written() {
        let store = UnconfiguredStore;
        let faq = CreateFaq {
            question: "Do you do rigs?".into(),
            answer: "Yes".into(),
            order_index: 1,
        };
        assert!(store.create_faq(&faq).await.unwrap().is_none());
        assert!(!store.delete_faq(1).await.unwrap());
        assert!(!store.update_review(1, &UpdateReview::default()).await.unwrap());
    }

    #[tokio::test]
    async fn review_creation_is_unavailable() {
        let input = CreateReview {
            user_id: Some(1),
            name: "Mika".into(),
            rating: 5,
            review_text: "Great model, fast delivery".into(),
            discord_username: None,
            discord_avatar: None,
        };
        let outcome = UnconfiguredStore.create_review(&input).await.unwrap();
        assert_matches!(outcome, ReviewOutcome::Unavailable(msg) if msg == NOT_CONFIGURED);
    }

    #[tokio::test]
    async fn identity_calls_fail() {
        let result = UnconfiguredStore.find_user_by_email("a@b.test").await;
        assert_matches!(result, Err(StoreError::Unconfigured));
    }
}
