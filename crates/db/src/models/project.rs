//! Portfolio project models and DTOs.

use folio_core::types::{DbId, Timestamp};
use folio_core::variants::{resolve_variants, ProjectImage};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `projects` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Project {
    pub id: DbId,
    pub title: String,
    pub description: String,
    /// Primary image url. Legacy projects only have this.
    pub image_url: String,
    #[sqlx(json)]
    pub images: Vec<ProjectImage>,
    pub category: String,
    pub tags: Vec<String>,
    pub order_index: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Project {
    /// Effective image list (stored variants or the primary-url fallback).
    pub fn variants(&self) -> Vec<ProjectImage> {
        resolve_variants(&self.images, &self.image_url)
    }
}

/// DTO for inserting a project.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateProject {
    pub title: String,
    pub description: String,
    pub image_url: String,
    pub images: Vec<ProjectImage>,
    pub category: String,
    pub tags: Vec<String>,
    pub order_index: i32,
}

/// DTO for patching a project. `None` leaves the column unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateProject {
    pub title: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub images: Option<Vec<ProjectImage>>,
    pub category: Option<String>,
    pub tags: Option<Vec<String>>,
    pub order_index: Option<i32>,
}

impl UpdateProject {
    pub fn apply_to(&self, project: &mut Project) {
        if let Some(v) = &self.title {
            project.title = v.clone();
        }
        if let Some(v) = &self.description {
            project.description = v.clone();
        }
        if let Some(v) = &self.image_url {
            project.image_url = v.clone();
        }
        if let Some(v) = &self.images {
            project.images = v.clone();
        }
        if let Some(v) = &self.category {
            project.category = v.clone();
        }
        if let Some(v) = &self.tags {
            project.tags = v.clone();
        }
        if let Some(v) = self.order_index {
            project.order_index = v;
        }
    }
}
