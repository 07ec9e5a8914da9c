//! Repository for the `pricing` table.

use folio_core::types::DbId;
use sqlx::PgPool;

use crate::models::pricing::{CreatePricingPlan, PricingPlan, UpdatePricingPlan};

const COLUMNS: &str = "\
    id, name, price, price_label, delivery_time, description, features, \
    is_popular, order_index, created_at, updated_at";

/// Provides CRUD operations for pricing plans.
pub struct PricingRepo;

impl PricingRepo {
    /// List plans by stored `order_index`. Display ordering happens above this layer.
    pub async fn list(pool: &PgPool) -> Result<Vec<PricingPlan>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM pricing ORDER BY order_index, id");
        sqlx::query_as::<_, PricingPlan>(&query)
            .fetch_all(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<PricingPlan>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM pricing WHERE id = $1");
        sqlx::query_as::<_, PricingPlan>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn create(
        pool: &PgPool,
        input: &CreatePricingPlan,
    ) -> Result<PricingPlan, sqlx::Error> {
        let query = format!(
            "INSERT INTO pricing \
                 (name, price, price_label, delivery_time, description, features, \
                  is_popular, order_index) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, PricingPlan>(&query)
            .bind(&input.name)
            .bind(input.price)
            .bind(&input.price_label)
            .bind(&input.delivery_time)
            .bind(&input.description)
            .bind(&input.features)
            .bind(input.is_popular)
            .bind(input.order_index)
            .fetch_one(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdatePricingPlan,
    ) -> Result<Option<PricingPlan>, sqlx::Error> {
        let query = format!(
            "UPDATE pricing SET \
                 name = COALESCE($2, name), \
                 price = COALESCE($3, price), \
                 price_label = COALESCE($4, price_label), \
                 delivery_time = COALESCE($5, delivery_time), \
                 description = COALESCE($6, description), \
                 features = COALESCE($7, features), \
                 is_popular = COALESCE($8, is_popular), \
                 order_index = COALESCE($9, order_index) \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, PricingPlan>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(input.price)
            .bind(&input.price_label)
            .bind(&input.delivery_time)
            .bind(&input.description)
            .bind(&input.features)
            .bind(input.is_popular)
            .bind(input.order_index)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM pricing WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
