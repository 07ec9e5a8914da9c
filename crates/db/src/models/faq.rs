//! FAQ models and DTOs.

use folio_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `faqs` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Faq {
    pub id: DbId,
    pub question: String,
    pub answer: String,
    pub order_index: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateFaq {
    pub question: String,
    pub answer: String,
    pub order_index: i32,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateFaq {
    pub question: Option<String>,
    pub answer: Option<String>,
    pub order_index: Option<i32>,
}

impl UpdateFaq {
    pub fn apply_to(&self, faq: &mut Faq) {
        if let Some(v) = &self.question {
            faq.question = v.clone();
        }
        if let Some(v) = &self.answer {
            faq.answer = v.clone();
        }
        if let Some(v) = self.order_index {
            faq.order_index = v;
        }
    }
}
