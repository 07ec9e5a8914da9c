//! Text transforms shared by the admin create/edit forms.
//!
//! Forms carry list fields as delimited text: tags are comma-separated,
//! features and terms items are one per line.

use crate::error::CoreError;
use crate::variants::ProjectImage;

/// Colors pre-filled into new image rows, cycled by row index.
pub const VARIANT_PALETTE: [&str; 10] = [
    "#ff0000", "#00ff00", "#0000ff", "#ffff00", "#ff00ff", "#00ffff", "#ff8000", "#8000ff",
    "#00ff80", "#ff0080",
];

/// Name stored for an image row saved without one.
pub const UNNAMED_VARIANT: &str = "Variant";

/// Palette color for the image row at `index`.
pub fn palette_color(index: usize) -> &'static str {
    VARIANT_PALETTE[index % VARIANT_PALETTE.len()]
}

/// Split a comma-separated list, trimming entries and dropping empty ones.
pub fn split_tags(input: &str) -> Vec<String> {
    split_on(input, ',')
}

/// Split a newline-separated list, trimming entries and dropping empty ones.
pub fn split_lines(input: &str) -> Vec<String> {
    split_on(input, '\n')
}

fn split_on(input: &str, sep: char) -> Vec<String> {
    input
        .split(sep)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// `order_index` assigned on every admin save, create and edit alike.
///
/// An edited record therefore moves to the end of its collection. Indices
/// are not compacted after deletes, so duplicates can appear.
pub fn next_order_index(current_len: usize) -> i32 {
    i32::try_from(current_len).map_or(i32::MAX, |n| n.saturating_add(1))
}

/// Reject a blank required field with `"<label> required"`.
pub fn require_non_empty(value: &str, label: &str) -> Result<(), CoreError> {
    if value.is_empty() {
        return Err(CoreError::Validation(format!("{label} required")));
    }
    Ok(())
}

/// Result of normalizing the image rows of a project form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedImages {
    /// Url of the first row as entered, even when blank.
    pub primary_url: String,
    /// Rows with a url; blank names replaced, blank colors filled from the palette.
    pub images: Vec<ProjectImage>,
}

/// Turn raw form rows into the stored `image_url` and `images` fields.
pub fn normalize_image_rows(rows: &[ProjectImage]) -> NormalizedImages {
    let primary_url = rows.first().map(|r| r.url.clone()).unwrap_or_default();
    let images = rows
        .iter()
        .enumerate()
        .filter(|(_, r)| !r.url.is_empty())
        .map(|(i, r)| ProjectImage {
            url: r.url.clone(),
            color: if r.color.is_empty() {
                palette_color(i).to_string()
            } else {
                r.color.clone()
            },
            name: if r.name.is_empty() {
                UNNAMED_VARIANT.to_string()
            } else {
                r.name.clone()
            },
        })
        .collect();
    NormalizedImages {
        primary_url,
        images,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(url: &str, color: &str, name: &str) -> ProjectImage {
        ProjectImage {
            url: url.into(),
            color: color.into(),
            name: name.into(),
        }
    }

    #[test]
    fn tags_are_trimmed_and_blank_entries_dropped() {
        assert_eq!(
            split_tags(" low poly, stylized ,, roblox ,"),
            vec!["low poly", "stylized", "roblox"]
        );
        assert!(split_tags("").is_empty());
    }

    #[test]
    fn lines_are_trimmed_and_blank_lines_dropped() {
        assert_eq!(
            split_lines("Rigged model\n\n  2 revisions  \r\nSource file"),
            vec!["Rigged model", "2 revisions", "Source file"]
        );
    }

    #[test]
    fn order_index_is_length_plus_one() {
        assert_eq!(next_order_index(0), 1);
        assert_eq!(next_order_index(4), 5);
    }

    #[test]
    fn required_field() {
        assert!(require_non_empty("Sword", "Title").is_ok());
        let err = require_non_empty("", "Title").unwrap_err();
        assert_eq!(err.to_string(), "Validation failed: Title required");
    }

    #[test]
    fn rows_without_url_are_dropped_and_names_defaulted() {
        let rows = vec![
            row("https://cdn.test/a.png", "#ff0000", ""),
            row("", "#00ff00", "Green"),
            row("https://cdn.test/c.png", "", "Blue"),
        ];
        let normalized = normalize_image_rows(&rows);
        assert_eq!(normalized.primary_url, "https://cdn.test/a.png");
        assert_eq!(
            normalized.images,
            vec![
                row("https://cdn.test/a.png", "#ff0000", "Variant"),
                row("https://cdn.test/c.png", "#0000ff", "Blue"),
            ]
        );
    }

    #[test]
    fn blank_first_row_gives_blank_primary_url() {
        let rows = vec![row("", "#ff0000", ""), row("https://cdn.test/b.png", "#00ff00", "B")];
        let normalized = normalize_image_rows(&rows);
        assert_eq!(normalized.primary_url, "");
        assert_eq!(normalized.images.len(), 1);
    }

    #[test]
    fn palette_cycles() {
        assert_eq!(palette_color(0), "#ff0000");
        assert_eq!(palette_color(10), "#ff0000");
        assert_eq!(palette_color(11), "#00ff00");
    }
}
