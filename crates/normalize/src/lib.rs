//! Menu dataset normalization layer.
//!
//! Fast-food nutrition datasets come in whatever shape their authors felt
//! like: nested category groups with size variants, flat arrays, and half a
//! dozen spellings for every macro. This crate reduces all of them to one
//! uniform [`CanonicalItem`] record.
//!
//! ## What we do
//!
//! - Detect the document shape (grouped, flat, unknown) and walk it in order
//! - Expand grouped item variants into standalone items
//! - Resolve each nutrition value from an ordered list of field aliases
//! - Convert salt (g) to sodium (mg) when no direct sodium value exists
//! - Derive a stable, readable id from brand, region, category and name
//!
//! ## Never fails
//!
//! Unknown shapes produce an empty menu. Missing or malformed values become
//! `0.0`. There is no error type on the normalization path; the only fallible
//! operation here is parsing a [`Brand`] key.
//!
//! ## Pure function guarantee
//!
//! No I/O, no clock. Same document, brand and region give the same items in
//! the same order.

mod brand;
mod dataset;
mod fields;
mod id;
mod item;

pub use crate::brand::{Brand, BrandParseError};
pub use crate::dataset::{normalize_dataset, DatasetShape};
pub use crate::fields::{
    coerce_number, normalize_item, resolve_name, sodium_from_salt_g, truthy_text, CALORIE_KEYS,
    CARB_KEYS, FAT_KEYS, NAME_KEYS, PROTEIN_KEYS, SALT_KEY, SODIUM_KEY, SUGAR_KEYS,
};
pub use crate::id::item_id;
pub use crate::item::{CanonicalItem, Nutrition, DEFAULT_CATEGORY, DEFAULT_NAME};
