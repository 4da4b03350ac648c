//! Page metadata and link status text for the active dataset.

use std::fmt;

use normalize::Brand;
use serde::Serialize;

use crate::registry::region_label;

const SITE_SUFFIX: &str = "WEB WAVE STUDIO";

/// Title, description and keywords describing the active brand and region.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageMeta {
    pub title: String,
    pub description: String,
    pub keywords: String,
}

fn base_description(brand: Brand) -> &'static str {
    match brand {
        Brand::Starbucks => {
            "Free Starbucks nutrition calculator. Instantly calculate calories, protein, carbs, fat, sugar, and sodium by country dataset (US, UK, International)."
        }
        Brand::Mcdonalds => {
            "Free McDonald’s nutrition calculator. Instantly calculate calories and macros by country dataset (US, UK, Canada, Pakistan)."
        }
        Brand::Kfc => {
            "Free KFC nutrition calculator. Instantly calculate calories, protein, carbs, fat, sugar, and sodium by country dataset (US, UK, International)."
        }
    }
}

fn base_keywords(brand: Brand) -> &'static str {
    match brand {
        Brand::Starbucks => {
            "starbucks nutrition calculator, starbucks calories, starbucks macros calculator, starbucks protein carbs fat sugar sodium"
        }
        Brand::Mcdonalds => {
            "mcdonalds nutrition calculator, mcdonalds calories, mcdonalds macros calculator, mcdonalds protein carbs fat sugar sodium"
        }
        Brand::Kfc => {
            "kfc nutrition calculator, kfc calories, kfc macros calculator, kfc protein carbs fat sugar sodium"
        }
    }
}

impl PageMeta {
    pub fn for_dataset(brand: Brand, region: &str) -> Self {
        let label = brand.label();
        let region_text = region_label(region);
        Self {
            title: format!("{label} Nutrition Calculator ({region_text}) | {SITE_SUFFIX}"),
            description: format!(
                "{} Current dataset: {label} {region_text}.",
                base_description(brand)
            ),
            keywords: format!("{}, {} {region} nutrition", base_keywords(brand), brand.key()),
        }
    }
}

/// Whether the active dataset is loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum LinkStatus {
    Linked { region_label: String },
    NotLinked,
    Failed { message: String },
}

/// Shown in place of the menu when a dataset fails to load.
pub const LOAD_FAILED_MESSAGE: &str = "Dataset could not be loaded. Please check file path in /data.";

impl LinkStatus {
    pub fn is_linked(&self) -> bool {
        matches!(self, LinkStatus::Linked { .. })
    }
}

impl fmt::Display for LinkStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LinkStatus::Linked { region_label } => write!(f, "Linked {region_label}"),
            LinkStatus::NotLinked | LinkStatus::Failed { .. } => f.write_str("Not linked"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn meta_for_kfc_uk() {
        let meta = PageMeta::for_dataset(Brand::Kfc, "uk");
        assert_eq!(meta.title, "KFC Nutrition Calculator (UK) | WEB WAVE STUDIO");
        assert!(meta.description.ends_with(" Current dataset: KFC UK."));
        assert!(meta.keywords.ends_with(", kfc uk nutrition"));
    }

    #[test]
    fn meta_uses_brand_label() {
        let meta = PageMeta::for_dataset(Brand::Mcdonalds, "pakistan");
        assert_eq!(
            meta.title,
            "McDonald's Nutrition Calculator (Pakistan) | WEB WAVE STUDIO"
        );
        assert!(meta.keywords.starts_with("mcdonalds nutrition calculator"));
    }

    #[test]
    fn status_text() {
        let linked = LinkStatus::Linked {
            region_label: "US".into(),
        };
        assert_eq!(linked.to_string(), "Linked US");
        assert!(linked.is_linked());
        assert_eq!(LinkStatus::NotLinked.to_string(), "Not linked");
        let failed = LinkStatus::Failed {
            message: LOAD_FAILED_MESSAGE.into(),
        };
        assert_eq!(failed.to_string(), "Not linked");
        assert!(!failed.is_linked());
    }
}
