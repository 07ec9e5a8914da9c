//! Image variants of a project.
//!
//! Projects created before multi-variant support only carry a primary image
//! url. Every surface that shows images (portfolio grid, admin preview,
//! viewer, bundle download) goes through [`resolve_variants`] so those
//! projects look the same everywhere.

use serde::{Deserialize, Serialize};

/// Color given to the variant synthesized from a primary image url.
pub const DEFAULT_VARIANT_COLOR: &str = "#ffffff";

/// Name given to the variant synthesized from a primary image url.
pub const DEFAULT_VARIANT_NAME: &str = "Default";

/// One color/style option of a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectImage {
    pub url: String,
    pub color: String,
    pub name: String,
}

/// The effective image list of a project.
///
/// - stored `images` when non-empty, unchanged;
/// - otherwise one `Default` white variant for a non-empty `primary_url`;
/// - otherwise nothing.
pub fn resolve_variants(images: &[ProjectImage], primary_url: &str) -> Vec<ProjectImage> {
    if !images.is_empty() {
        return images.to_vec();
    }
    if primary_url.is_empty() {
        return Vec::new();
    }
    vec![ProjectImage {
        url: primary_url.to_string(),
        color: DEFAULT_VARIANT_COLOR.to_string(),
        name: DEFAULT_VARIANT_NAME.to_string(),
    }]
}

/// Pick the variant at `index`, falling back to the first one.
pub fn select_variant(variants: &[ProjectImage], index: usize) -> Option<&ProjectImage> {
    variants.get(index).or_else(|| variants.first())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image(url: &str, color: &str, name: &str) -> ProjectImage {
        ProjectImage {
            url: url.into(),
            color: color.into(),
            name: name.into(),
        }
    }

    #[test]
    fn legacy_project_gets_single_default_variant() {
        let variants = resolve_variants(&[], "https://cdn.test/sword.png");
        assert_eq!(
            variants,
            vec![image("https://cdn.test/sword.png", "#ffffff", "Default")]
        );
    }

    #[test]
    fn no_images_and_no_primary_is_empty() {
        assert!(resolve_variants(&[], "").is_empty());
    }

    #[test]
    fn stored_images_are_returned_unchanged() {
        let stored = vec![
            image("https://cdn.test/red.png", "#ff0000", "Red"),
            image("https://cdn.test/blue.png", "#0000ff", "Blue"),
        ];
        assert_eq!(resolve_variants(&stored, "https://cdn.test/other.png"), stored);
    }

    #[test]
    fn out_of_range_selection_falls_back_to_first() {
        let stored = vec![image("a", "#000000", "A"), image("b", "#111111", "B")];
        assert_eq!(select_variant(&stored, 1).map(|v| v.name.as_str()), Some("B"));
        assert_eq!(select_variant(&stored, 9).map(|v| v.name.as_str()), Some("A"));
        assert!(select_variant(&[], 0).is_none());
    }
}
