//! Editable page copy stored in the `site_content` collection.
//!
//! Each page has a set of sections (`hero`, `header`, `cta`, ...). A stored
//! section replaces the default section as a whole; sections that were never
//! saved keep their defaults.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

/// Pages whose copy is editable from the admin dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SitePage {
    Home,
    Pricing,
    Reviews,
    Terms,
}

impl SitePage {
    pub const ALL: [SitePage; 4] = [
        SitePage::Home,
        SitePage::Pricing,
        SitePage::Reviews,
        SitePage::Terms,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SitePage::Home => "home",
            SitePage::Pricing => "pricing",
            SitePage::Reviews => "reviews",
            SitePage::Terms => "terms",
        }
    }

    /// Built-in copy used until the admin saves a section.
    pub fn defaults(self) -> Value {
        match self {
            SitePage::Home => json!({
                "hero": {
                    "name": "Michael",
                    "subtitle": "I'm 19 years old with 3 years of experience in 3D modeling"
                },
                "about": {
                    "title": "About Me",
                    "text": "I make game-ready 3D models using Blender, focusing on stylized characters, weapons, and props for Roblox games. I enjoy turning ideas into clean, optimized models that look great and perform well in-game.",
                    "highlight": "Blender"
                },
                "cta": {
                    "title": "Ready to bring your ideas to life?",
                    "subtitle": "Let's collaborate and create something amazing together"
                },
                "tools": {
                    "modeling": ["Blender", "Roblox Studio", "ZBrush"],
                    "texturing": ["Adobe Substance 3D Painter", "Krita"]
                }
            }),
            SitePage::Pricing => json!({
                "header": { "title": "Pricing Plans", "subtitle": "1$ = 250 Robux" },
                "package_deals": {
                    "title": "Package Deals",
                    "subtitle": "Order multiple models and save!",
                    "items": ["3 Models = 5% OFF", "5 Models = 10% OFF", "10+ Models = 15% OFF"]
                },
                "rush_delivery": {
                    "title": "Rush Delivery",
                    "subtitle": "Need it faster? We've got you covered!",
                    "items": ["24-48 hours delivery", "+30% of base price", "Priority queue"]
                },
                "loyalty": {
                    "title": "Loyalty Program",
                    "description": "Returning customers get special discounts! After 5 completed orders, enjoy 5% off all future projects. After 10 orders, get 10% off permanently."
                },
                "custom_quote": {
                    "title": "Need a custom quote?",
                    "description": "For large projects, bulk orders, or specialized requirements, I offer custom pricing tailored to your specific needs."
                }
            }),
            SitePage::Reviews => json!({
                "header": {
                    "title": "Client Reviews",
                    "subtitle": "See what my clients say about their experience working with me on their 3D modeling projects."
                },
                "stats": {
                    "stat1_value": "4+", "stat1_label": "Total Projects",
                    "stat2_value": "100%", "stat2_label": "Happy Clients",
                    "stat3_value": "5.0/5", "stat3_label": "Average Rating",
                    "stat4_value": "100%", "stat4_label": "On-Time Delivery"
                },
                "cta": {
                    "title": "Ready to join my satisfied clients?",
                    "subtitle": "Let's discuss your project and bring your 3D vision to life with the same quality and attention to detail."
                }
            }),
            SitePage::Terms => json!({
                "header": {
                    "title": "Terms & Conditions",
                    "subtitle": "Clear and transparent terms for our professional 3D modeling services. Please read carefully before starting your project."
                },
                "footer": { "text": "Last updated: December 2024" },
                "contact": {
                    "title": "Questions about these terms?",
                    "subtitle": "If you have any questions about these terms and conditions, feel free to reach out before starting your project."
                }
            }),
        }
    }
}

impl fmt::Display for SitePage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SitePage {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SitePage::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| format!("Unknown page '{s}'"))
    }
}

/// Overlay stored sections on the page defaults (shallow, per section).
pub fn merge_with_defaults(page: SitePage, stored: &Map<String, Value>) -> Value {
    let mut merged = match page.defaults() {
        Value::Object(map) => map,
        _ => Map::new(),
    };
    for (section, content) in stored {
        merged.insert(section.clone(), content.clone());
    }
    Value::Object(merged)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_store_gives_defaults() {
        let merged = merge_with_defaults(SitePage::Home, &Map::new());
        assert_eq!(merged, SitePage::Home.defaults());
        assert_eq!(merged["hero"]["name"], "Michael");
    }

    #[test]
    fn stored_section_replaces_whole_default_section() {
        let mut stored = Map::new();
        stored.insert("hero".into(), json!({ "name": "Ana" }));
        let merged = merge_with_defaults(SitePage::Home, &stored);

        assert_eq!(merged["hero"], json!({ "name": "Ana" }));
        assert!(merged["hero"].get("subtitle").is_none());
        assert_eq!(merged["cta"]["title"], "Ready to bring your ideas to life?");
    }

    #[test]
    fn unknown_sections_are_kept() {
        let mut stored = Map::new();
        stored.insert("banner".into(), json!({ "text": "Sale" }));
        let merged = merge_with_defaults(SitePage::Terms, &stored);
        assert_eq!(merged["banner"]["text"], "Sale");
        assert_eq!(merged["footer"]["text"], "Last updated: December 2024");
    }

    #[test]
    fn page_names_parse() {
        assert_eq!("reviews".parse::<SitePage>(), Ok(SitePage::Reviews));
        assert!("admin".parse::<SitePage>().is_err());
    }
}
