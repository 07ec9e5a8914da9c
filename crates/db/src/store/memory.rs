//! Process-local [`ContentStore`].
//!
//! Rows live behind a single `RwLock`. Every successful write calls the
//! optional change hook after the lock is released, which is how the API
//! wires this store into the change feed.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use folio_core::catalog::{ChangeKind, Collection};
use folio_core::site_content::SitePage;
use folio_core::types::{DbId, Timestamp};
use serde_json::{Map, Value};
use tokio::sync::RwLock;

use super::{ContentStore, StoreResult};
use crate::models::faq::{CreateFaq, Faq, UpdateFaq};
use crate::models::pricing::{CreatePricingPlan, PricingPlan, UpdatePricingPlan};
use crate::models::project::{CreateProject, Project, UpdateProject};
use crate::models::review::{CreateReview, Review, UpdateReview};
use crate::models::site_content::SiteContentEntry;
use crate::models::terms::{
    AdditionalTerm, CreateAdditionalTerm, CreateTermsSection, TermsSection, UpdateAdditionalTerm,
    UpdateTermsSection,
};

/// Callback invoked after each committed write.
pub type ChangeHook = Arc<dyn Fn(Collection, ChangeKind) + Send + Sync>;

#[derive(Default)]
struct Tables {
    last_id: DbId,
    projects: Vec<Project>,
    pricing: Vec<PricingPlan>,
    terms_sections: Vec<TermsSection>,
    additional_terms: Vec<AdditionalTerm>,
    faqs: Vec<Faq>,
    reviews: Vec<Review>,
    site_content: Vec<SiteContentEntry>,
}

impl Tables {
    /// Next id (shared across tables) and the write timestamp.
    fn allocate(&mut self) -> (DbId, Timestamp) {
        self.last_id += 1;
        (self.last_id, Utc::now())
    }
}

/// Row behaviour the generic helpers need.
trait Row: Clone {
    fn id(&self) -> DbId;
    fn order_index(&self) -> i32;
    fn touch(&mut self, at: Timestamp);
}

macro_rules! ordered_row {
    ($($ty:ty),+) => {
        $(impl Row for $ty {
            fn id(&self) -> DbId {
                self.id
            }
            fn order_index(&self) -> i32 {
                self.order_index
            }
            fn touch(&mut self, at: Timestamp) {
                self.updated_at = at;
            }
        })+
    };
}

ordered_row!(Project, PricingPlan, TermsSection, AdditionalTerm, Faq);

/// Rows sorted by `order_index`, ties broken by id.
fn ordered<T: Row>(rows: &[T]) -> Vec<T> {
    let mut out = rows.to_vec();
    out.sort_by_key(|r| (r.order_index(), r.id()));
    out
}

fn find_row<T: Row>(rows: &[T], id: DbId) -> Option<T> {
    rows.iter().find(|r| r.id() == id).cloned()
}

fn update_row<T: Row>(rows: &mut [T], id: DbId, apply: impl FnOnce(&mut T)) -> bool {
    match rows.iter_mut().find(|r| r.id() == id) {
        Some(row) => {
            apply(row);
            row.touch(Utc::now());
            true
        }
        None => false,
    }
}

fn delete_row<T: Row>(rows: &mut Vec<T>, id: DbId) -> bool {
    let before = rows.len();
    rows.retain(|r| r.id() != id);
    rows.len() != before
}

#[derive(Default)]
pub struct MemoryContentStore {
    tables: RwLock<Tables>,
    on_change: Option<ChangeHook>,
}

impl MemoryContentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store that reports every write to `hook`.
    pub fn with_change_hook(hook: ChangeHook) -> Self {
        Self {
            tables: RwLock::default(),
            on_change: Some(hook),
        }
    }

    fn notify(&self, collection: Collection, kind: ChangeKind) {
        if let Some(hook) = &self.on_change {
            hook(collection, kind);
        }
    }

    /// Notify when `changed`, then hand it back.
    fn settle(&self, changed: bool, collection: Collection, kind: ChangeKind) -> bool {
        if changed {
            self.notify(collection, kind);
        }
        changed
    }
}

#[async_trait]
impl ContentStore for MemoryContentStore {
    async fn health_check(&self) -> bool {
        true
    }

    // -- projects --

    async fn list_projects(&self) -> StoreResult<Vec<Project>> {
        Ok(ordered(&self.tables.read().await.projects))
    }

    async fn find_project(&self, id: DbId) -> StoreResult<Option<Project>> {
        Ok(find_row(&self.tables.read().await.projects, id))
    }

    async fn create_project(&self, input: &CreateProject) -> StoreResult<Option<Project>> {
        let project = {
            let mut t = self.tables.write().await;
            let (id, now) = t.allocate();
            let project = Project {
                id,
                title: input.title.clone(),
                description: input.description.clone(),
                image_url: input.image_url.clone(),
                images: input.images.clone(),
                category: input.category.clone(),
                tags: input.tags.clone(),
                order_index: input.order_index,
                created_at: now,
                updated_at: now,
            };
            t.projects.push(project.clone());
            project
        };
        self.notify(Collection::Projects, ChangeKind::Insert);
        Ok(Some(project))
    }

    async fn update_project(&self, id: DbId, input: &UpdateProject) -> StoreResult<bool> {
        let changed = update_row(&mut self.tables.write().await.projects, id, |p| {
            input.apply_to(p)
        });
        Ok(self.settle(changed, Collection::Projects, ChangeKind::Update))
    }

    async fn delete_project(&self, id: DbId) -> StoreResult<bool> {
        let changed = delete_row(&mut self.tables.write().await.projects, id);
        Ok(self.settle(changed, Collection::Projects, ChangeKind::Delete))
    }

    // -- pricing --

    async fn list_pricing(&self) -> StoreResult<Vec<PricingPlan>> {
        Ok(ordered(&self.tables.read().await.pricing))
    }

    async fn find_pricing(&self, id: DbId) -> StoreResult<Option<PricingPlan>> {
        Ok(find_row(&self.tables.read().await.pricing, id))
    }

    async fn create_pricing(
        &self,
        input: &CreatePricingPlan,
    ) -> StoreResult<Option<PricingPlan>> {
        let plan = {
            let mut t = self.tables.write().await;
            let (id, now) = t.allocate();
            let plan = PricingPlan {
                id,
                name: input.name.clone(),
                price: input.price,
                price_label: input.price_label.clone(),
                delivery_time: input.delivery_time.clone(),
                description: input.description.clone(),
                features: input.features.clone(),
                is_popular: input.is_popular,
                order_index: input.order_index,
                created_at: now,
                updated_at: now,
            };
            t.pricing.push(plan.clone());
            plan
        };
        self.notify(Collection::Pricing, ChangeKind::Insert);
        Ok(Some(plan))
    }

    async fn update_pricing(&self, id: DbId, input: &UpdatePricingPlan) -> StoreResult<bool> {
        let changed = update_row(&mut self.tables.write().await.pricing, id, |p| {
            input.apply_to(p)
        });
        Ok(self.settle(changed, Collection::Pricing, ChangeKind::Update))
    }

    async fn delete_pricing(&self, id: DbId) -> StoreResult<bool> {
        let changed = delete_row(&mut self.tables.write().await.pricing, id);
        Ok(self.settle(changed, Collection::Pricing, ChangeKind::Delete))
    }

    // -- terms sections --

    async fn list_terms_sections(&self) -> StoreResult<Vec<TermsSection>> {
        Ok(ordered(&self.tables.read().await.terms_sections))
    }

    async fn find_terms_section(&self, id: DbId) -> StoreResult<Option<TermsSection>> {
        Ok(find_row(&self.tables.read().await.terms_sections, id))
    }

    async fn create_terms_section(
        &self,
        input: &CreateTermsSection,
    ) -> StoreResult<Option<TermsSection>> {
        let section = {
            let mut t = self.tables.write().await;
            let (id, now) = t.allocate();
            let section = TermsSection {
                id,
                title: input.title.clone(),
                icon: input.icon.clone(),
                items: input.items.clone(),
                order_index: input.order_index,
                created_at: now,
                updated_at: now,
            };
            t.terms_sections.push(section.clone());
            section
        };
        self.notify(Collection::TermsSections, ChangeKind::Insert);
        Ok(Some(section))
    }

    async fn update_terms_section(
        &self,
        id: DbId,
        input: &UpdateTermsSection,
    ) -> StoreResult<bool> {
        let changed = update_row(&mut self.tables.write().await.terms_sections, id, |s| {
            input.apply_to(s)
        });
        Ok(self.settle(changed, Collection::TermsSections, ChangeKind::Update))
    }

    async fn delete_terms_section(&self, id: DbId) -> StoreResult<bool> {
        let changed = delete_row(&mut self.tables.write().await.terms_sections, id);
        Ok(self.settle(changed, Collection::TermsSections, ChangeKind::Delete))
    }

    // -- additional terms --

    async fn list_additional_terms(&self) -> StoreResult<Vec<AdditionalTerm>> {
        Ok(ordered(&self.tables.read().await.additional_terms))
    }

    async fn find_additional_term(&self, id: DbId) -> StoreResult<Option<AdditionalTerm>> {
        Ok(find_row(&self.tables.read().await.additional_terms, id))
    }

    async fn create_additional_term(
        &self,
        input: &CreateAdditionalTerm,
    ) -> StoreResult<Option<AdditionalTerm>> {
        let term = {
            let mut t = self.tables.write().await;
            let (id, now) = t.allocate();
            let term = AdditionalTerm {
                id,
                title: input.title.clone(),
                content: input.content.clone(),
                order_index: input.order_index,
                created_at: now,
                updated_at: now,
            };
            t.additional_terms.push(term.clone());
            term
        };
        self.notify(Collection::AdditionalTerms, ChangeKind::Insert);
        Ok(Some(term))
    }

    async fn update_additional_term(
        &self,
        id: DbId,
        input: &UpdateAdditionalTerm,
    ) -> StoreResult<bool> {
        let changed = update_row(&mut self.tables.write().await.additional_terms, id, |a| {
            input.apply_to(a)
        });
        Ok(self.settle(changed, Collection::AdditionalTerms, ChangeKind::Update))
    }

    async fn delete_additional_term(&self, id: DbId) -> StoreResult<bool> {
        let changed = delete_row(&mut self.tables.write().await.additional_terms, id);
        Ok(self.settle(changed, Collection::AdditionalTerms, ChangeKind::Delete))
    }

    // -- faqs --

    async fn list_faqs(&self) -> StoreResult<Vec<Faq>> {
        Ok(ordered(&self.tables.read().await.faqs))
    }

    async fn find_faq(&self, id: DbId) -> StoreResult<Option<Faq>> {
        Ok(find_row(&self.tables.read().await.faqs, id))
    }

    async fn create_faq(&self, input: &CreateFaq) -> StoreResult<Option<Faq>> {
        let faq = {
            let mut t = self.tables.write().await;
            let (id, now) = t.allocate();
            let faq = Faq {
                id,
                question: input.question.clone(),
                answer: input.answer.clone(),
                order_index: input.order_index,
                created_at: now,
                updated_at: now,
            };
            t.faqs.push(faq.clone());
            faq
        };
        self.notify(Collection::Faqs, ChangeKind::Insert);
        Ok(Some(faq))
    }

    async fn update_faq(&self, id: DbId, input: &UpdateFaq) -> StoreResult<bool> {
        let changed = update_row(&mut self.tables.write().await.faqs, id, |f| input.apply_to(f));
        Ok(self.settle(changed, Collection::Faqs, ChangeKind::Update))
    }

    async fn delete_faq(&self, id: DbId) -> StoreResult<bool> {
        let changed = delete_row(&mut self.tables.write().await.faqs, id);
        Ok(self.settle(changed, Collection::Faqs, ChangeKind::Delete))
    }

    // -- reviews --

    async fn list_approved_reviews(&self) -> StoreResult<Vec<Review>> {
        Ok(self
            .list_all_reviews()
            .await?
            .into_iter()
            .filter(|r| r.is_approved)
            .collect())
    }

    async fn list_all_reviews(&self) -> StoreResult<Vec<Review>> {
        let mut reviews = self.tables.read().await.reviews.clone();
        reviews.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(reviews)
    }

    async fn insert_review(
        &self,
        input: &CreateReview,
        is_approved: bool,
    ) -> StoreResult<Option<Review>> {
        let review = {
            let mut t = self.tables.write().await;
            let (id, now) = t.allocate();
            let review = Review {
                id,
                user_id: input.user_id,
                name: input.name.clone(),
                rating: input.rating,
                review_text: input.review_text.clone(),
                discord_username: input.discord_username.clone(),
                discord_avatar: input.discord_avatar.clone(),
                is_approved,
                created_at: now,
            };
            t.reviews.push(review.clone());
            review
        };
        self.notify(Collection::Reviews, ChangeKind::Insert);
        Ok(Some(review))
    }

    async fn update_review(&self, id: DbId, input: &UpdateReview) -> StoreResult<bool> {
        let changed = {
            let mut t = self.tables.write().await;
            match t.reviews.iter_mut().find(|r| r.id == id) {
                Some(review) => {
                    input.apply_to(review);
                    true
                }
                None => false,
            }
        };
        Ok(self.settle(changed, Collection::Reviews, ChangeKind::Update))
    }

    async fn delete_review(&self, id: DbId) -> StoreResult<bool> {
        let changed = {
            let mut t = self.tables.write().await;
            let before = t.reviews.len();
            t.reviews.retain(|r| r.id != id);
            t.reviews.len() != before
        };
        Ok(self.settle(changed, Collection::Reviews, ChangeKind::Delete))
    }

    async fn has_user_reviewed(&self, user_id: DbId) -> StoreResult<bool> {
        Ok(self
            .tables
            .read()
            .await
            .reviews
            .iter()
            .any(|r| r.user_id == Some(user_id)))
    }

    // -- site content --

    async fn get_site_content(&self, page: SitePage) -> StoreResult<Map<String, Value>> {
        Ok(self
            .tables
            .read()
            .await
            .site_content
            .iter()
            .filter(|e| e.page == page.as_str())
            .map(|e| (e.section.clone(), e.content.clone()))
            .collect())
    }

    async fn upsert_site_content(
        &self,
        page: SitePage,
        section: &str,
        content: &Value,
    ) -> StoreResult<bool> {
        let kind = {
            let mut t = self.tables.write().await;
            let existing = t
                .site_content
                .iter_mut()
                .find(|e| e.page == page.as_str() && e.section == section);
            match existing {
                Some(entry) => {
                    entry.content = content.clone();
                    entry.updated_at = Utc::now();
                    ChangeKind::Update
                }
                None => {
                    let (id, now) = t.allocate();
                    t.site_content.push(SiteContentEntry {
                        id,
                        page: page.as_str().to_string(),
                        section: section.to_string(),
                        content: content.clone(),
                        updated_at: now,
                    });
                    ChangeKind::Insert
                }
            }
        };
        self.notify(Collection::SiteContent, kind);
        Ok(true)
    }
}
