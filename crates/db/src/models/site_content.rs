//! Site content (editable page copy) model.

use folio_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `site_content` table. Unique per `(page, section)`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SiteContentEntry {
    pub id: DbId,
    pub page: String,
    pub section: String,
    pub content: serde_json::Value,
    pub updated_at: Timestamp,
}
