//! Fixed vocabularies: record collections, project categories, terms icons.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Collections
// ---------------------------------------------------------------------------

/// A named record collection in the backing store.
///
/// The string form is the table name, which is also the name carried by
/// change notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Collection {
    Projects,
    Pricing,
    Reviews,
    TermsSections,
    AdditionalTerms,
    Faqs,
    SiteContent,
}

impl Collection {
    pub const ALL: [Collection; 7] = [
        Collection::Projects,
        Collection::Pricing,
        Collection::Reviews,
        Collection::TermsSections,
        Collection::AdditionalTerms,
        Collection::Faqs,
        Collection::SiteContent,
    ];

    pub fn table_name(self) -> &'static str {
        match self {
            Collection::Projects => "projects",
            Collection::Pricing => "pricing",
            Collection::Reviews => "reviews",
            Collection::TermsSections => "terms_sections",
            Collection::AdditionalTerms => "additional_terms",
            Collection::Faqs => "faqs",
            Collection::SiteContent => "site_content",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.table_name())
    }
}

impl FromStr for Collection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Collection::ALL
            .into_iter()
            .find(|c| c.table_name() == s)
            .ok_or_else(|| format!("Unknown collection '{s}'"))
    }
}

/// Kind of write that touched a collection.
///
/// Subscribers are not told which row changed; the kind is informational.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeKind {
    Insert,
    Update,
    Delete,
    /// The source did not say (e.g. a bare notification payload).
    Unknown,
}

impl FromStr for ChangeKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "insert" => Ok(ChangeKind::Insert),
            "update" => Ok(ChangeKind::Update),
            "delete" => Ok(ChangeKind::Delete),
            other => Err(format!("Unknown change kind '{other}'")),
        }
    }
}

// ---------------------------------------------------------------------------
// Project categories
// ---------------------------------------------------------------------------

/// Portfolio category a project belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ProjectCategory {
    #[default]
    Characters,
    #[serde(rename = "UGC")]
    Ugc,
    Weapons,
    #[serde(rename = "Stud Style")]
    StudStyle,
    Vehicles,
}

/// Pseudo-category on the portfolio filter bar that matches every project.
pub const ALL_CATEGORIES_FILTER: &str = "All";

impl ProjectCategory {
    pub const ALL: [ProjectCategory; 5] = [
        ProjectCategory::Characters,
        ProjectCategory::Ugc,
        ProjectCategory::Weapons,
        ProjectCategory::StudStyle,
        ProjectCategory::Vehicles,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ProjectCategory::Characters => "Characters",
            ProjectCategory::Ugc => "UGC",
            ProjectCategory::Weapons => "Weapons",
            ProjectCategory::StudStyle => "Stud Style",
            ProjectCategory::Vehicles => "Vehicles",
        }
    }

    /// Labels for the portfolio filter bar, `"All"` first.
    pub fn filter_labels() -> Vec<&'static str> {
        std::iter::once(ALL_CATEGORIES_FILTER)
            .chain(Self::ALL.iter().map(|c| c.as_str()))
            .collect()
    }
}

impl fmt::Display for ProjectCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProjectCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ProjectCategory::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| format!("Unknown project category '{s}'"))
    }
}

/// Whether a stored category string passes the portfolio filter.
///
/// `None` and `"All"` match everything; otherwise the match is exact.
pub fn category_matches(filter: Option<&str>, category: &str) -> bool {
    match filter {
        None | Some(ALL_CATEGORIES_FILTER) => true,
        Some(wanted) => wanted == category,
    }
}

// ---------------------------------------------------------------------------
// Terms icons
// ---------------------------------------------------------------------------

/// Icon shown next to a terms section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TermsIcon {
    #[default]
    FileText,
    CreditCard,
    Clock,
    Shield,
}

impl TermsIcon {
    pub const ALL: [TermsIcon; 4] = [
        TermsIcon::FileText,
        TermsIcon::CreditCard,
        TermsIcon::Clock,
        TermsIcon::Shield,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            TermsIcon::FileText => "FileText",
            TermsIcon::CreditCard => "CreditCard",
            TermsIcon::Clock => "Clock",
            TermsIcon::Shield => "Shield",
        }
    }
}

impl FromStr for TermsIcon {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TermsIcon::ALL
            .into_iter()
            .find(|i| i.as_str() == s)
            .ok_or_else(|| format!("Unknown terms icon '{s}'"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collection_round_trips_through_table_name() {
        for c in Collection::ALL {
            assert_eq!(c.table_name().parse::<Collection>(), Ok(c));
        }
        assert!("users".parse::<Collection>().is_err());
    }

    #[test]
    fn category_labels_start_with_all() {
        assert_eq!(
            ProjectCategory::filter_labels(),
            vec!["All", "Characters", "UGC", "Weapons", "Stud Style", "Vehicles"]
        );
    }

    #[test]
    fn category_serializes_with_display_names() {
        let json = serde_json::to_string(&ProjectCategory::StudStyle).unwrap();
        assert_eq!(json, "\"Stud Style\"");
        assert_eq!("UGC".parse::<ProjectCategory>(), Ok(ProjectCategory::Ugc));
    }

    #[test]
    fn category_filter() {
        assert!(category_matches(None, "Weapons"));
        assert!(category_matches(Some("All"), "Weapons"));
        assert!(category_matches(Some("Weapons"), "Weapons"));
        assert!(!category_matches(Some("Vehicles"), "Weapons"));
    }

    #[test]
    fn unknown_icon_is_rejected() {
        assert_eq!("Clock".parse::<TermsIcon>(), Ok(TermsIcon::Clock));
        assert!("Star".parse::<TermsIcon>().is_err());
    }
}
