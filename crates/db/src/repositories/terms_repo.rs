//! Repositories for the `terms_sections` and `additional_terms` tables.

use folio_core::types::DbId;
use sqlx::PgPool;

use crate::models::terms::{
    AdditionalTerm, CreateAdditionalTerm, CreateTermsSection, TermsSection, UpdateAdditionalTerm,
    UpdateTermsSection,
};

const SECTION_COLUMNS: &str = "id, title, icon, items, order_index, created_at, updated_at";

const TERM_COLUMNS: &str = "id, title, content, order_index, created_at, updated_at";

// ---------------------------------------------------------------------------
// Terms sections
// ---------------------------------------------------------------------------

pub struct TermsSectionRepo;

impl TermsSectionRepo {
    pub async fn list(pool: &PgPool) -> Result<Vec<TermsSection>, sqlx::Error> {
        let query =
            format!("SELECT {SECTION_COLUMNS} FROM terms_sections ORDER BY order_index, id");
        sqlx::query_as::<_, TermsSection>(&query)
            .fetch_all(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<TermsSection>, sqlx::Error> {
        let query = format!("SELECT {SECTION_COLUMNS} FROM terms_sections WHERE id = $1");
        sqlx::query_as::<_, TermsSection>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn create(
        pool: &PgPool,
        input: &CreateTermsSection,
    ) -> Result<TermsSection, sqlx::Error> {
        let query = format!(
            "INSERT INTO terms_sections (title, icon, items, order_index) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {SECTION_COLUMNS}"
        );
        sqlx::query_as::<_, TermsSection>(&query)
            .bind(&input.title)
            .bind(&input.icon)
            .bind(&input.items)
            .bind(input.order_index)
            .fetch_one(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateTermsSection,
    ) -> Result<Option<TermsSection>, sqlx::Error> {
        let query = format!(
            "UPDATE terms_sections SET \
                 title = COALESCE($2, title), \
                 icon = COALESCE($3, icon), \
                 items = COALESCE($4, items), \
                 order_index = COALESCE($5, order_index) \
             WHERE id = $1 \
             RETURNING {SECTION_COLUMNS}"
        );
        sqlx::query_as::<_, TermsSection>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.icon)
            .bind(&input.items)
            .bind(input.order_index)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM terms_sections WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

// ---------------------------------------------------------------------------
// Additional terms
// ---------------------------------------------------------------------------

pub struct AdditionalTermRepo;

impl AdditionalTermRepo {
    pub async fn list(pool: &PgPool) -> Result<Vec<AdditionalTerm>, sqlx::Error> {
        let query =
            format!("SELECT {TERM_COLUMNS} FROM additional_terms ORDER BY order_index, id");
        sqlx::query_as::<_, AdditionalTerm>(&query)
            .fetch_all(pool)
            .await
    }

    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<AdditionalTerm>, sqlx::Error> {
        let query = format!("SELECT {TERM_COLUMNS} FROM additional_terms WHERE id = $1");
        sqlx::query_as::<_, AdditionalTerm>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn create(
        pool: &PgPool,
        input: &CreateAdditionalTerm,
    ) -> Result<AdditionalTerm, sqlx::Error> {
        let query = format!(
            "INSERT INTO additional_terms (title, content, order_index) \
             VALUES ($1, $2, $3) \
             RETURNING {TERM_COLUMNS}"
        );
        sqlx::query_as::<_, AdditionalTerm>(&query)
            .bind(&input.title)
            .bind(&input.content)
            .bind(input.order_index)
            .fetch_one(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateAdditionalTerm,
    ) -> Result<Option<AdditionalTerm>, sqlx::Error> {
        let query = format!(
            "UPDATE additional_terms SET \
                 title = COALESCE($2, title), \
                 content = COALESCE($3, content), \
                 order_index = COALESCE($4, order_index) \
             WHERE id = $1 \
             RETURNING {TERM_COLUMNS}"
        );
        sqlx::query_as::<_, AdditionalTerm>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.content)
            .bind(input.order_index)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM additional_terms WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
