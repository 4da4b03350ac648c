//! Menu filtering and meal aggregation.
//!
//! Everything here operates on the canonical items produced by the
//! `normalize` crate and is synchronous and infallible:
//!
//! - [`MenuFilter`] / [`filter_menu`] select the visible subset of a menu
//! - [`category_options`] lists the selector values for a menu
//! - [`Meal`] holds quantity-annotated snapshots of menu items
//! - [`NutritionTotals`] sums a meal; [`DisplayTotals`] rounds it for humans
//!
//! Operations on ids that do not exist are no-ops, never errors.

mod filter;
mod meal;
mod totals;

pub use crate::filter::{category_options, filter_menu, MenuFilter, ALL_CATEGORIES};
pub use crate::meal::{line_totals, Meal, MealLine};
pub use crate::totals::{round_half_up, DisplayTotals, NutritionTotals};
