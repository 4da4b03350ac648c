//! Workspace umbrella crate for the menucalc nutrition calculator.
//!
//! The pure stages live in member crates: `normalize` turns raw restaurant
//! datasets into canonical items and `meal` filters menus and sums meals.
//! This crate adds everything with side effects: the dataset registry,
//! HTTP and directory sources, the [`Session`] that ties a loaded menu to a
//! meal, the theme preference store, page metadata and YAML configuration.
//!
//! ```no_run
//! use menucalc::{Brand, DatasetRegistry, DirSource, Session};
//!
//! # async fn run() {
//! let mut session = Session::new(DirSource::new("."), DatasetRegistry::default());
//! session.select_brand(Brand::Kfc).await;
//! if let Some(first) = session.menu().first().map(|item| item.id.clone()) {
//!     session.add(&first);
//! }
//! println!("{}", session.display_totals());
//! # }
//! ```

pub mod config;
pub mod error;
pub mod registry;
pub mod seo;
pub mod session;
pub mod source;
pub mod theme;

pub use meal::{
    ALL_CATEGORIES, DisplayTotals, Meal, MealLine, MenuFilter, NutritionTotals, category_options,
    filter_menu, line_totals, round_half_up,
};
pub use normalize::{
    Brand, BrandParseError, CanonicalItem, DEFAULT_CATEGORY, DEFAULT_NAME, DatasetShape,
    Nutrition, item_id, normalize_dataset, normalize_item,
};

pub use crate::config::{AppConfig, ConfigLoadError, SourceKind};
pub use crate::error::LoadError;
pub use crate::registry::{DatasetRegistry, PREFERRED_REGION, RegionDataset, region_label};
pub use crate::seo::{LOAD_FAILED_MESSAGE, LinkStatus, PageMeta};
pub use crate::session::{LoadMetrics, Session, set_load_metrics};
pub use crate::source::{DatasetSource, DirSource, HttpSource};
pub use crate::theme::{Theme, ThemeParseError, ThemeStore};
