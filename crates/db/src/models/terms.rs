//! Terms section and additional term models and DTOs.

use folio_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

// ---------------------------------------------------------------------------
// Terms sections
// ---------------------------------------------------------------------------

/// A row from the `terms_sections` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TermsSection {
    pub id: DbId,
    pub title: String,
    pub icon: String,
    pub items: Vec<String>,
    pub order_index: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateTermsSection {
    pub title: String,
    pub icon: String,
    pub items: Vec<String>,
    pub order_index: i32,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateTermsSection {
    pub title: Option<String>,
    pub icon: Option<String>,
    pub items: Option<Vec<String>>,
    pub order_index: Option<i32>,
}

impl UpdateTermsSection {
    pub fn apply_to(&self, section: &mut TermsSection) {
        if let Some(v) = &self.title {
            section.title = v.clone();
        }
        if let Some(v) = &self.icon {
            section.icon = v.clone();
        }
        if let Some(v) = &self.items {
            section.items = v.clone();
        }
        if let Some(v) = self.order_index {
            section.order_index = v;
        }
    }
}

// ---------------------------------------------------------------------------
// Additional terms
// ---------------------------------------------------------------------------

/// A row from the `additional_terms` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AdditionalTerm {
    pub id: DbId,
    pub title: String,
    pub content: String,
    pub order_index: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateAdditionalTerm {
    pub title: String,
    pub content: String,
    pub order_index: i32,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateAdditionalTerm {
    pub title: Option<String>,
    pub content: Option<String>,
    pub order_index: Option<i32>,
}

impl UpdateAdditionalTerm {
    pub fn apply_to(&self, term: &mut AdditionalTerm) {
        if let Some(v) = &self.title {
            term.title = v.clone();
        }
        if let Some(v) = &self.content {
            term.content = v.clone();
        }
        if let Some(v) = self.order_index {
            term.order_index = v;
        }
    }
}
