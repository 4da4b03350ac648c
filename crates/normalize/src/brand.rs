//! The closed set of restaurant brands a dataset can belong to.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error returned when a brand key does not name a supported brand.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown brand key: {0:?}")]
pub struct BrandParseError(pub String);

/// Supported restaurant chains.
///
/// The serialized form is the stable lowercase key (`starbucks`, `mcdonalds`,
/// `kfc`), which is also the prefix of every generated item id.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Brand {
    #[default]
    Starbucks,
    Mcdonalds,
    Kfc,
}

impl Brand {
    /// Every brand, in tab order.
    pub const ALL: [Brand; 3] = [Brand::Starbucks, Brand::Mcdonalds, Brand::Kfc];

    /// Stable key used in ids, dataset paths and configuration.
    pub fn key(self) -> &'static str {
        match self {
            Brand::Starbucks => "starbucks",
            Brand::Mcdonalds => "mcdonalds",
            Brand::Kfc => "kfc",
        }
    }

    /// Human-facing brand name.
    pub fn label(self) -> &'static str {
        match self {
            Brand::Starbucks => "Starbucks",
            Brand::Mcdonalds => "McDonald's",
            Brand::Kfc => "KFC",
        }
    }

    /// Lenient lookup from a display string such as a tab caption.
    ///
    /// Matching is by case-insensitive substring; anything unrecognised maps
    /// to [`Brand::Starbucks`].
    pub fn from_display(text: &str) -> Brand {
        let lowered = text.to_lowercase();
        if lowered.contains("starbucks") {
            Brand::Starbucks
        } else if lowered.contains("mcdonald") {
            Brand::Mcdonalds
        } else if lowered.contains("kfc") {
            Brand::Kfc
        } else {
            Brand::Starbucks
        }
    }
}

impl fmt::Display for Brand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Brand {
    type Err = BrandParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Brand::ALL
            .into_iter()
            .find(|brand| brand.key().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| BrandParseError(s.to_string()))
    }
}
