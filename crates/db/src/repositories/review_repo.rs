//! Repository for the `reviews` table.

use folio_core::types::DbId;
use sqlx::PgPool;

use crate::models::review::{CreateReview, Review, UpdateReview};

const COLUMNS: &str = "\
    id, user_id, name, rating, review_text, discord_username, discord_avatar, \
    is_approved, created_at";

/// Provides CRUD and moderation queries for reviews.
pub struct ReviewRepo;

impl ReviewRepo {
    /// Approved reviews, newest first.
    pub async fn list_approved(pool: &PgPool) -> Result<Vec<Review>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM reviews \
             WHERE is_approved = TRUE \
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, Review>(&query).fetch_all(pool).await
    }

    /// Every review regardless of approval, newest first.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<Review>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM reviews ORDER BY created_at DESC, id DESC");
        sqlx::query_as::<_, Review>(&query).fetch_all(pool).await
    }

    /// The review left by `user_id`, if any.
    pub async fn find_by_user(pool: &PgPool, user_id: DbId) -> Result<Option<Review>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM reviews WHERE user_id = $1 ORDER BY id LIMIT 1"
        );
        sqlx::query_as::<_, Review>(&query)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    pub async fn create(
        pool: &PgPool,
        input: &CreateReview,
        is_approved: bool,
    ) -> Result<Review, sqlx::Error> {
        let query = format!(
            "INSERT INTO reviews \
                 (user_id, name, rating, review_text, discord_username, discord_avatar, \
                  is_approved) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Review>(&query)
            .bind(input.user_id)
            .bind(&input.name)
            .bind(input.rating)
            .bind(&input.review_text)
            .bind(&input.discord_username)
            .bind(&input.discord_avatar)
            .bind(is_approved)
            .fetch_one(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateReview,
    ) -> Result<Option<Review>, sqlx::Error> {
        let query = format!(
            "UPDATE reviews SET is_approved = COALESCE($2, is_approved) \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Review>(&query)
            .bind(id)
            .bind(input.is_approved)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM reviews WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
