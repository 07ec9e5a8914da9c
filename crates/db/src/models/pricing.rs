//! Pricing plan models and DTOs.

use folio_core::pricing::RankedPlan;
use folio_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `pricing` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PricingPlan {
    pub id: DbId,
    pub name: String,
    pub price: f64,
    /// Unit shown after the price, e.g. `"per model"`.
    pub price_label: String,
    pub delivery_time: String,
    pub description: String,
    pub features: Vec<String>,
    pub is_popular: bool,
    pub order_index: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl RankedPlan for PricingPlan {
    fn is_popular(&self) -> bool {
        self.is_popular
    }

    fn order_index(&self) -> i32 {
        self.order_index
    }
}

/// DTO for inserting a pricing plan.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatePricingPlan {
    pub name: String,
    pub price: f64,
    pub price_label: String,
    pub delivery_time: String,
    pub description: String,
    pub features: Vec<String>,
    pub is_popular: bool,
    pub order_index: i32,
}

/// DTO for patching a pricing plan.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdatePricingPlan {
    pub name: Option<String>,
    pub price: Option<f64>,
    pub price_label: Option<String>,
    pub delivery_time: Option<String>,
    pub description: Option<String>,
    pub features: Option<Vec<String>>,
    pub is_popular: Option<bool>,
    pub order_index: Option<i32>,
}

impl UpdatePricingPlan {
    pub fn apply_to(&self, plan: &mut PricingPlan) {
        if let Some(v) = &self.name {
            plan.name = v.clone();
        }
        if let Some(v) = self.price {
            plan.price = v;
        }
        if let Some(v) = &self.price_label {
            plan.price_label = v.clone();
        }
        if let Some(v) = &self.delivery_time {
            plan.delivery_time = v.clone();
        }
        if let Some(v) = &self.description {
            plan.description = v.clone();
        }
        if let Some(v) = &self.features {
            plan.features = v.clone();
        }
        if let Some(v) = self.is_popular {
            plan.is_popular = v;
        }
        if let Some(v) = self.order_index {
            plan.order_index = v;
        }
    }
}
