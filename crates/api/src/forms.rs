//! Admin create/edit form payloads.
//!
//! The dashboard posts forms as typed: list fields arrive as delimited text
//! and enums as their display labels. Each form validates itself with
//! `check`, which needs no store, and turns into the matching create DTO, or
//! into an update DTO that overwrites every field, stamped with the
//! `order_index` the handler computed.

use folio_core::catalog::{ProjectCategory, TermsIcon};
use folio_core::error::CoreError;
use folio_core::forms::{normalize_image_rows, require_non_empty, split_lines, split_tags};
use folio_core::variants::ProjectImage;
use folio_db::models::faq::{CreateFaq, UpdateFaq};
use folio_db::models::pricing::{CreatePricingPlan, UpdatePricingPlan};
use folio_db::models::project::{CreateProject, UpdateProject};
use folio_db::models::terms::{
    CreateAdditionalTerm, CreateTermsSection, UpdateAdditionalTerm, UpdateTermsSection,
};
use serde::Deserialize;
use validator::Validate;

/// Default unit label for a new pricing plan.
pub const DEFAULT_PRICE_LABEL: &str = "per model";

fn run_validator<T: Validate>(form: &T) -> Result<(), CoreError> {
    form.validate()
        .map_err(|e| CoreError::Validation(e.to_string()))
}

// ---------------------------------------------------------------------------
// Project
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default)]
pub struct ProjectForm {
    #[validate(length(max = 200))]
    pub title: String,
    pub description: String,
    /// Category label; blank means `Characters`.
    pub category: String,
    /// Comma-separated.
    pub tags: String,
    /// Image rows as entered, blank rows included.
    pub images: Vec<ProjectImage>,
}

impl ProjectForm {
    fn category(&self) -> Result<ProjectCategory, CoreError> {
        if self.category.is_empty() {
            Ok(ProjectCategory::default())
        } else {
            self.category
                .parse::<ProjectCategory>()
                .map_err(CoreError::Validation)
        }
    }

    pub fn check(&self) -> Result<(), CoreError> {
        run_validator(self)?;
        require_non_empty(&self.title, "Title")?;
        self.category().map(|_| ())
    }

    pub fn into_create(self, order_index: i32) -> Result<CreateProject, CoreError> {
        self.check()?;
        let category = self.category()?;
        let normalized = normalize_image_rows(&self.images);
        Ok(CreateProject {
            title: self.title,
            description: self.description,
            image_url: normalized.primary_url,
            images: normalized.images,
            category: category.to_string(),
            tags: split_tags(&self.tags),
            order_index,
        })
    }

    pub fn into_update(self, order_index: i32) -> Result<UpdateProject, CoreError> {
        let c = self.into_create(order_index)?;
        Ok(UpdateProject {
            title: Some(c.title),
            description: Some(c.description),
            image_url: Some(c.image_url),
            images: Some(c.images),
            category: Some(c.category),
            tags: Some(c.tags),
            order_index: Some(c.order_index),
        })
    }
}

// ---------------------------------------------------------------------------
// Pricing
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default)]
pub struct PricingForm {
    #[validate(length(max = 100))]
    pub name: String,
    #[validate(range(min = 0.0))]
    pub price: f64,
    /// Blank means `per model`.
    pub price_label: String,
    pub delivery_time: String,
    pub description: String,
    /// One feature per line.
    pub features: String,
    pub is_popular: bool,
}

impl PricingForm {
    pub fn check(&self) -> Result<(), CoreError> {
        run_validator(self)?;
        require_non_empty(&self.name, "Name")
    }

    pub fn into_create(self, order_index: i32) -> Result<CreatePricingPlan, CoreError> {
        self.check()?;
        let price_label = if self.price_label.is_empty() {
            DEFAULT_PRICE_LABEL.to_string()
        } else {
            self.price_label
        };
        Ok(CreatePricingPlan {
            name: self.name,
            price: self.price,
            price_label,
            delivery_time: self.delivery_time,
            description: self.description,
            features: split_lines(&self.features),
            is_popular: self.is_popular,
            order_index,
        })
    }

    pub fn into_update(self, order_index: i32) -> Result<UpdatePricingPlan, CoreError> {
        let c = self.into_create(order_index)?;
        Ok(UpdatePricingPlan {
            name: Some(c.name),
            price: Some(c.price),
            price_label: Some(c.price_label),
            delivery_time: Some(c.delivery_time),
            description: Some(c.description),
            features: Some(c.features),
            is_popular: Some(c.is_popular),
            order_index: Some(c.order_index),
        })
    }
}

// ---------------------------------------------------------------------------
// Terms
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default)]
pub struct TermsSectionForm {
    #[validate(length(max = 200))]
    pub title: String,
    /// Icon name; blank means `FileText`.
    pub icon: String,
    /// One item per line.
    pub items: String,
}

impl TermsSectionForm {
    fn icon(&self) -> Result<TermsIcon, CoreError> {
        if self.icon.is_empty() {
            Ok(TermsIcon::default())
        } else {
            self.icon.parse::<TermsIcon>().map_err(CoreError::Validation)
        }
    }

    pub fn check(&self) -> Result<(), CoreError> {
        run_validator(self)?;
        require_non_empty(&self.title, "Title")?;
        self.icon().map(|_| ())
    }

    pub fn into_create(self, order_index: i32) -> Result<CreateTermsSection, CoreError> {
        self.check()?;
        let icon = self.icon()?;
        Ok(CreateTermsSection {
            title: self.title,
            icon: icon.as_str().to_string(),
            items: split_lines(&self.items),
            order_index,
        })
    }

    pub fn into_update(self, order_index: i32) -> Result<UpdateTermsSection, CoreError> {
        let c = self.into_create(order_index)?;
        Ok(UpdateTermsSection {
            title: Some(c.title),
            icon: Some(c.icon),
            items: Some(c.items),
            order_index: Some(c.order_index),
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default)]
pub struct AdditionalTermForm {
    #[validate(length(max = 200))]
    pub title: String,
    pub content: String,
}

impl AdditionalTermForm {
    pub fn check(&self) -> Result<(), CoreError> {
        run_validator(self)?;
        require_non_empty(&self.title, "Title")
    }

    pub fn into_create(self, order_index: i32) -> Result<CreateAdditionalTerm, CoreError> {
        self.check()?;
        Ok(CreateAdditionalTerm {
            title: self.title,
            content: self.content,
            order_index,
        })
    }

    pub fn into_update(self, order_index: i32) -> Result<UpdateAdditionalTerm, CoreError> {
        let c = self.into_create(order_index)?;
        Ok(UpdateAdditionalTerm {
            title: Some(c.title),
            content: Some(c.content),
            order_index: Some(c.order_index),
        })
    }
}

// ---------------------------------------------------------------------------
// FAQ
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default)]
pub struct FaqForm {
    #[validate(length(max = 500))]
    pub question: String,
    pub answer: String,
}

impl FaqForm {
    pub fn check(&self) -> Result<(), CoreError> {
        run_validator(self)?;
        require_non_empty(&self.question, "Question")
    }

    pub fn into_create(self, order_index: i32) -> Result<CreateFaq, CoreError> {
        self.check()?;
        Ok(CreateFaq {
            question: self.question,
            answer: self.answer,
            order_index,
        })
    }

    pub fn into_update(self, order_index: i32) -> Result<UpdateFaq, CoreError> {
        let c = self.into_create(order_index)?;
        Ok(UpdateFaq {
            question: Some(c.question),
            answer: Some(c.answer),
            order_index: Some(c.order_index),
        })
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn image(url: &str, name: &str) -> ProjectImage {
        ProjectImage {
            url: url.into(),
            color: String::new(),
            name: name.into(),
        }
    }

    #[test]
    fn project_form_applies_defaults_and_transforms() {
        let form = ProjectForm {
            title: "Knight".into(),
            tags: "low poly, rigged,".into(),
            images: vec![image("https://cdn.test/a.png", ""), image("", "Blank")],
            ..Default::default()
        };
        let created = form.into_create(4).unwrap();

        assert_eq!(created.category, "Characters");
        assert_eq!(created.tags, vec!["low poly", "rigged"]);
        assert_eq!(created.image_url, "https://cdn.test/a.png");
        assert_eq!(created.images.len(), 1);
        assert_eq!(created.images[0].name, "Variant");
        assert_eq!(created.order_index, 4);
    }

    #[test]
    fn blank_title_is_rejected() {
        let err = ProjectForm::default().into_create(1).unwrap_err();
        assert_matches!(err, CoreError::Validation(msg) if msg == "Title required");
    }

    #[test]
    fn unknown_category_is_rejected() {
        let form = ProjectForm {
            title: "Castle".into(),
            category: "Buildings".into(),
            ..Default::default()
        };
        assert_matches!(form.into_create(1), Err(CoreError::Validation(_)));
    }

    #[test]
    fn check_matches_into_create() {
        let bad_icon = TermsSectionForm {
            title: "Payment".into(),
            icon: "Rocket".into(),
            ..Default::default()
        };
        assert_matches!(bad_icon.check(), Err(CoreError::Validation(_)));
        assert_matches!(bad_icon.into_create(1), Err(CoreError::Validation(_)));

        let fine = AdditionalTermForm {
            title: "Revisions".into(),
            ..Default::default()
        };
        assert!(fine.check().is_ok());
    }

    #[test]
    fn pricing_form_defaults_label_and_splits_features() {
        let form = PricingForm {
            name: "Basic".into(),
            price: 25.0,
            features: "One model\n\nTwo revisions\n".into(),
            ..Default::default()
        };
        let update = form.into_update(3).unwrap();
        assert_eq!(update.price_label.as_deref(), Some(DEFAULT_PRICE_LABEL));
        assert_eq!(
            update.features,
            Some(vec!["One model".to_string(), "Two revisions".to_string()])
        );
        assert_eq!(update.order_index, Some(3));
    }

    #[test]
    fn negative_price_is_rejected() {
        let form = PricingForm {
            name: "Basic".into(),
            price: -1.0,
            ..Default::default()
        };
        assert_matches!(form.into_create(1), Err(CoreError::Validation(_)));
    }

    #[test]
    fn terms_section_defaults_icon() {
        let form = TermsSectionForm {
            title: "Payment".into(),
            items: "Half upfront\nRest on delivery".into(),
            ..Default::default()
        };
        let created = form.into_create(1).unwrap();
        assert_eq!(created.icon, "FileText");
        assert_eq!(created.items.len(), 2);
    }

    #[test]
    fn faq_requires_a_question() {
        let err = FaqForm {
            answer: "Yes".into(),
            ..Default::default()
        }
        .into_create(1)
        .unwrap_err();
        assert_eq!(err.to_string(), "Validation failed: Question required");
    }
}
