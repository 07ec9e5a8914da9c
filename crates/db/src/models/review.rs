//! Client review models and DTOs.

use folio_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `reviews` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Review {
    pub id: DbId,
    /// Submitting account, if the review came through the public page.
    pub user_id: Option<DbId>,
    pub name: String,
    pub rating: i32,
    pub review_text: String,
    pub discord_username: Option<String>,
    pub discord_avatar: Option<String>,
    /// Only approved reviews are shown publicly.
    pub is_approved: bool,
    pub created_at: Timestamp,
}

/// DTO for inserting a review. New reviews are stored approved.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateReview {
    pub user_id: Option<DbId>,
    pub name: String,
    pub rating: i32,
    pub review_text: String,
    pub discord_username: Option<String>,
    pub discord_avatar: Option<String>,
}

/// DTO for patching a review (admin moderation).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateReview {
    pub is_approved: Option<bool>,
}

impl UpdateReview {
    pub fn apply_to(&self, review: &mut Review) {
        if let Some(v) = self.is_approved {
            review.is_approved = v;
        }
    }
}
