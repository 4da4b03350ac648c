//! Whole-document normalization.
//!
//! A dataset document arrives in one of two shapes:
//!
//! ```text
//! grouped: { "menu": [ { "category": "Drinks", "items": [ {...}, ... ] }, ... ] }
//! flat:    [ { "category": "Mains", "name": "Burger", ... }, ... ]
//! ```
//!
//! Grouped items may carry `variants` (typically sizes); each variant becomes
//! its own item named `"<base name> (<size>)"`. Anything else is an unknown
//! shape and normalizes to an empty menu. Output follows encounter order:
//! groups, then items, then variants.

use std::collections::HashSet;

use serde_json::{Map, Value};
use tracing::debug;

use crate::brand::Brand;
use crate::fields::{normalize_record, resolve_name, truthy_text};
use crate::item::{CanonicalItem, DEFAULT_CATEGORY};

/// The top-level layout of a dataset document.
#[derive(Debug, Clone, Copy)]
pub enum DatasetShape<'a> {
    /// An object whose `menu` field is an array of category groups.
    Grouped(&'a [Value]),
    /// A bare array of items, each carrying its own category.
    Flat(&'a [Value]),
    /// Any other document.
    Unknown,
}

impl<'a> DatasetShape<'a> {
    /// Classify a document. The grouped shape is checked first.
    pub fn detect(document: &'a Value) -> Self {
        if let Some(Value::Array(groups)) = document.get("menu") {
            return DatasetShape::Grouped(groups);
        }
        match document {
            Value::Array(items) => DatasetShape::Flat(items),
            _ => DatasetShape::Unknown,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            DatasetShape::Grouped(_) => "grouped",
            DatasetShape::Flat(_) => "flat",
            DatasetShape::Unknown => "unknown",
        }
    }
}

/// Normalize a dataset document into the ordered master menu.
pub fn normalize_dataset(document: &Value, brand: Brand, region: &str) -> Vec<CanonicalItem> {
    let shape = DatasetShape::detect(document);
    let items = match shape {
        DatasetShape::Grouped(groups) => normalize_grouped(groups, brand, region),
        DatasetShape::Flat(items) => normalize_flat(items, brand, region),
        DatasetShape::Unknown => Vec::new(),
    };

    let mut seen = HashSet::with_capacity(items.len());
    let colliding_ids = items.iter().filter(|item| !seen.insert(&item.id)).count();
    debug!(
        brand = %brand,
        region,
        shape = shape.name(),
        items = items.len(),
        colliding_ids,
        "dataset_normalized"
    );
    items
}

fn category_of(record: &Map<String, Value>) -> String {
    record
        .get("category")
        .and_then(truthy_text)
        .unwrap_or_else(|| DEFAULT_CATEGORY.to_string())
}

fn normalize_grouped(groups: &[Value], brand: Brand, region: &str) -> Vec<CanonicalItem> {
    let empty = Map::new();
    let mut out = Vec::new();

    for group in groups {
        let Some(group) = group.as_object() else {
            continue;
        };
        let category = category_of(group);
        let Some(Value::Array(items)) = group.get("items") else {
            continue;
        };

        for item in items {
            let record = item.as_object().unwrap_or(&empty);
            match record.get("variants") {
                Some(Value::Array(variants)) => {
                    let base = resolve_name(record);
                    out.extend(variants.iter().map(|variant| {
                        let variant = variant_record(&base, variant);
                        normalize_record(&variant, brand, region, &category)
                    }));
                }
                _ => out.push(normalize_record(record, brand, region, &category)),
            }
        }
    }
    out
}

/// Build the raw record for one variant: its own fields plus a synthesized name.
///
/// The base is the parent's resolved name, so `item` and `title` parents name
/// their variants too, not just `name`. A variant without a usable `size`
/// takes the base name with no suffix rather than `"<base> (undefined)"`.
fn variant_record(base: &str, variant: &Value) -> Map<String, Value> {
    let mut record = variant.as_object().cloned().unwrap_or_default();
    let name = match record.get("size").and_then(truthy_text) {
        Some(size) => format!("{base} ({size})"),
        None => base.to_string(),
    };
    record.insert("name".to_string(), Value::String(name));
    record
}

fn normalize_flat(items: &[Value], brand: Brand, region: &str) -> Vec<CanonicalItem> {
    let empty = Map::new();
    items
        .iter()
        .map(|item| {
            let record = item.as_object().unwrap_or(&empty);
            normalize_record(record, brand, region, &category_of(record))
        })
        .collect()
}
