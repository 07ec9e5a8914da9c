//! Repository layer: one zero-sized struct per table, static async methods
//! taking `&PgPool`.

pub mod faq_repo;
pub mod pricing_repo;
pub mod project_repo;
pub mod review_repo;
pub mod session_repo;
pub mod site_content_repo;
pub mod terms_repo;
pub mod user_repo;

pub use faq_repo::FaqRepo;
pub use pricing_repo::PricingRepo;
pub use project_repo::ProjectRepo;
pub use review_repo::ReviewRepo;
pub use session_repo::SessionRepo;
pub use site_content_repo::SiteContentRepo;
pub use terms_repo::{AdditionalTermRepo, TermsSectionRepo};
pub use user_repo::UserRepo;
