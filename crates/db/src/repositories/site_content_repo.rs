//! Repository for the `site_content` table.

use sqlx::PgPool;

use crate::models::site_content::SiteContentEntry;

const COLUMNS: &str = "id, page, section, content, updated_at";

pub struct SiteContentRepo;

impl SiteContentRepo {
    /// All stored sections of one page.
    pub async fn list_for_page(
        pool: &PgPool,
        page: &str,
    ) -> Result<Vec<SiteContentEntry>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM site_content WHERE page = $1 ORDER BY section");
        sqlx::query_as::<_, SiteContentEntry>(&query)
            .bind(page)
            .fetch_all(pool)
            .await
    }

    /// Insert or replace the content of `(page, section)`.
    pub async fn upsert(
        pool: &PgPool,
        page: &str,
        section: &str,
        content: &serde_json::Value,
    ) -> Result<SiteContentEntry, sqlx::Error> {
        let query = format!(
            "INSERT INTO site_content (page, section, content) \
             VALUES ($1, $2, $3) \
             ON CONFLICT ON CONSTRAINT uq_site_content_page_section \
             DO UPDATE SET content = EXCLUDED.content, updated_at = NOW() \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, SiteContentEntry>(&query)
            .bind(page)
            .bind(section)
            .bind(content)
            .fetch_one(pool)
            .await
    }
}
