//! The canonical menu record every dataset shape is reduced to.

use serde::{Deserialize, Serialize};

use crate::brand::Brand;

/// Category assigned when a source record carries none.
pub const DEFAULT_CATEGORY: &str = "Uncategorized";

/// Name assigned when a source record carries none.
pub const DEFAULT_NAME: &str = "Item";

/// One normalized menu entry.
///
/// Every numeric field is always populated; values that were absent or
/// unparseable in the source are `0.0`. The `id` is derived from
/// brand, region, category and name (see [`item_id`](crate::item_id)).
///
/// Field names on the wire follow the public record shape
/// (`country` carries the region key).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanonicalItem {
    pub id: String,
    pub brand: Brand,
    #[serde(rename = "country")]
    pub region: String,
    pub category: String,
    pub name: String,
    /// Energy in kcal, as reported by the source.
    pub calories: f64,
    /// Grams.
    pub protein: f64,
    /// Grams.
    pub carbs: f64,
    /// Grams.
    pub fat: f64,
    /// Grams.
    pub sugar: f64,
    /// Milligrams.
    pub sodium: f64,
}

impl CanonicalItem {
    /// Nutrition values in display order.
    pub fn nutrition(&self) -> Nutrition {
        Nutrition {
            calories: self.calories,
            protein: self.protein,
            carbs: self.carbs,
            fat: self.fat,
            sugar: self.sugar,
            sodium: self.sodium,
        }
    }
}

/// The six tracked nutrition dimensions of a single item.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Nutrition {
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
    pub sugar: f64,
    pub sodium: f64,
}
