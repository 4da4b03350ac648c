//! Field resolution for a single raw menu record.
//!
//! Source datasets disagree on what to call each nutrition value, so every
//! dimension is resolved from an ordered list of candidate keys. The first
//! key that is present (exists and is not `null`) wins and is then coerced to
//! a number. A present value that fails to coerce yields `0.0`; it does not
//! fall through to later candidates.
//!
//! Nothing in here fails. A record missing every known key still produces a
//! fully populated [`CanonicalItem`] named [`DEFAULT_NAME`].

use serde_json::{Map, Value};

use crate::brand::Brand;
use crate::id::item_id;
use crate::item::{CanonicalItem, DEFAULT_CATEGORY, DEFAULT_NAME};

/// Keys tried, in order, for the item name.
pub const NAME_KEYS: &[&str] = &["name", "item", "title"];

/// Keys tried, in order, for energy.
///
/// `kj_to_kcal` is read as-is; no kilojoule conversion is applied.
pub const CALORIE_KEYS: &[&str] = &["calories", "kcal", "energy_kcal", "energy", "kj_to_kcal"];

pub const PROTEIN_KEYS: &[&str] = &["protein_g", "protein"];

pub const CARB_KEYS: &[&str] = &[
    "carbs_g",
    "carbohydrates_g",
    "total_carbs_g",
    "total_carbs",
    "total_carbohydrates_g",
];

pub const FAT_KEYS: &[&str] = &["fat_g", "total_fat_g", "total_fat"];

pub const SUGAR_KEYS: &[&str] = &["sugar_g", "sugars_g", "total_sugars_g"];

/// Sodium in milligrams; takes precedence over [`SALT_KEY`].
pub const SODIUM_KEY: &str = "sodium_mg";

/// Salt in grams, converted with [`sodium_from_salt_g`].
pub const SALT_KEY: &str = "salt_g";

/// Milligrams of sodium per gram of salt (salt is ~40% sodium by mass).
const SODIUM_MG_PER_SALT_G: f64 = 400.0;

/// Coerce an arbitrary JSON value to a finite number, or `0.0`.
pub fn coerce_number(value: &Value) -> f64 {
    let parsed = match value {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                0.0
            } else {
                trimmed.parse::<f64>().unwrap_or(0.0)
            }
        }
        Value::Bool(true) => 1.0,
        Value::Bool(false) | Value::Null | Value::Array(_) | Value::Object(_) => 0.0,
    };
    if parsed.is_finite() {
        parsed
    } else {
        0.0
    }
}

/// Convert grams of salt to milligrams of sodium, rounded half-up.
pub fn sodium_from_salt_g(salt_g: f64) -> f64 {
    (salt_g * SODIUM_MG_PER_SALT_G + 0.5).floor()
}

/// Render a value as display text when it carries something meaningful.
///
/// Non-empty strings, non-zero numbers and `true` qualify; empty strings,
/// zero, `false`, `null`, arrays and objects do not.
pub fn truthy_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => match n.as_f64() {
            // Whole floats print without a fraction: `12.0` reads as "12".
            Some(f) if f != 0.0 && n.is_f64() && f.fract() == 0.0 && f.abs() < 1e21 => {
                Some(format!("{f}"))
            }
            Some(f) if f != 0.0 && !f.is_nan() => Some(n.to_string()),
            _ => None,
        },
        Value::Bool(true) => Some("true".to_string()),
        _ => None,
    }
}

/// First candidate key whose value is present (exists and is not `null`).
fn first_present<'a>(raw: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a Value> {
    keys.iter()
        .filter_map(|key| raw.get(*key))
        .find(|value| !value.is_null())
}

fn resolve_number(raw: &Map<String, Value>, keys: &[&str]) -> f64 {
    first_present(raw, keys).map_or(0.0, coerce_number)
}

/// Resolve the display name of a raw record, falling back to [`DEFAULT_NAME`].
pub fn resolve_name(raw: &Map<String, Value>) -> String {
    NAME_KEYS
        .iter()
        .filter_map(|key| raw.get(*key))
        .find_map(truthy_text)
        .unwrap_or_else(|| DEFAULT_NAME.to_string())
}

fn resolve_sodium(raw: &Map<String, Value>) -> f64 {
    if let Some(sodium) = raw.get(SODIUM_KEY).filter(|v| !v.is_null()) {
        return coerce_number(sodium);
    }
    match raw.get(SALT_KEY).filter(|v| !v.is_null()) {
        Some(salt) => sodium_from_salt_g(coerce_number(salt)),
        None => 0.0,
    }
}

/// Normalize one raw record into a [`CanonicalItem`].
///
/// `category` is the already-resolved category of the record; an empty
/// string is replaced with [`DEFAULT_CATEGORY`]. Non-object values are
/// treated as an empty record.
pub fn normalize_item(raw: &Value, brand: Brand, region: &str, category: &str) -> CanonicalItem {
    let empty = Map::new();
    let record = raw.as_object().unwrap_or(&empty);
    normalize_record(record, brand, region, category)
}

pub(crate) fn normalize_record(
    raw: &Map<String, Value>,
    brand: Brand,
    region: &str,
    category: &str,
) -> CanonicalItem {
    let category = if category.is_empty() {
        DEFAULT_CATEGORY
    } else {
        category
    };
    let name = resolve_name(raw);

    CanonicalItem {
        id: item_id(brand, region, category, &name),
        brand,
        region: region.to_string(),
        category: category.to_string(),
        calories: resolve_number(raw, CALORIE_KEYS),
        protein: resolve_number(raw, PROTEIN_KEYS),
        carbs: resolve_number(raw, CARB_KEYS),
        fat: resolve_number(raw, FAT_KEYS),
        sugar: resolve_number(raw, SUGAR_KEYS),
        sodium: resolve_sodium(raw),
        name,
    }
}
