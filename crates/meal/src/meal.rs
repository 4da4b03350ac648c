//! The user-built meal: an ordered, id-keyed list of quantity-annotated items.

use normalize::CanonicalItem;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::totals::NutritionTotals;

/// A snapshot of a menu item plus how many of it are in the meal.
///
/// The item is copied at insertion time; reloading the master menu does not
/// touch existing lines. `qty` is always at least 1.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MealLine {
    #[serde(flatten)]
    pub item: CanonicalItem,
    pub qty: u32,
}

impl MealLine {
    pub fn id(&self) -> &str {
        &self.item.id
    }
}

/// Ordered meal lines, unique by item id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Meal {
    lines: Vec<MealLine>,
}

impl Meal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one of the menu item with `item_id`.
    ///
    /// An existing line gains one quantity; otherwise a new line with
    /// quantity 1 is appended. When several menu items share the id, the
    /// first in menu order is used. Returns `false` (and does nothing) when
    /// the id is not on the menu.
    pub fn add(&mut self, menu: &[CanonicalItem], item_id: &str) -> bool {
        let Some(item) = menu.iter().find(|item| item.id == item_id) else {
            debug!(item_id, "meal_add_unknown_item");
            return false;
        };

        match self.line_mut(item_id) {
            Some(line) => line.qty = line.qty.saturating_add(1),
            None => self.lines.push(MealLine {
                item: item.clone(),
                qty: 1,
            }),
        }
        true
    }

    /// Adjust the quantity of a line by `delta`, never going below 1.
    ///
    /// Returns `false` when no line has `item_id`.
    pub fn change_qty(&mut self, item_id: &str, delta: i64) -> bool {
        let Some(line) = self.line_mut(item_id) else {
            return false;
        };
        let next = i64::from(line.qty)
            .saturating_add(delta)
            .clamp(1, i64::from(u32::MAX));
        line.qty = u32::try_from(next).unwrap_or(u32::MAX);
        true
    }

    /// Drop the line with `item_id`. Returns `false` when there was none.
    pub fn remove(&mut self, item_id: &str) -> bool {
        let before = self.lines.len();
        self.lines.retain(|line| line.id() != item_id);
        self.lines.len() != before
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    pub fn get(&self, item_id: &str) -> Option<&MealLine> {
        self.lines.iter().find(|line| line.id() == item_id)
    }

    pub fn lines(&self) -> &[MealLine] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Unrounded nutrition sums, each value weighted by line quantity.
    pub fn totals(&self) -> NutritionTotals {
        line_totals(&self.lines)
    }

    fn line_mut(&mut self, item_id: &str) -> Option<&mut MealLine> {
        self.lines.iter_mut().find(|line| line.id() == item_id)
    }
}

/// Sum `value * qty` per nutrition dimension across `lines`.
pub fn line_totals(lines: &[MealLine]) -> NutritionTotals {
    lines
        .iter()
        .fold(NutritionTotals::default(), |mut acc, line| {
            acc.add_scaled(&line.item.nutrition(), f64::from(line.qty));
            acc
        })
}

#[cfg(test)]
mod tests {
    use normalize::{item_id, Brand};

    use super::*;

    fn item(name: &str, calories: f64) -> CanonicalItem {
        CanonicalItem {
            id: item_id(Brand::Mcdonalds, "uk", "Mains", name),
            brand: Brand::Mcdonalds,
            region: "uk".into(),
            category: "Mains".into(),
            name: name.into(),
            calories,
            protein: 1.5,
            carbs: 0.0,
            fat: 0.0,
            sugar: 0.0,
            sodium: 10.0,
        }
    }

    fn menu() -> Vec<CanonicalItem> {
        vec![item("A", 100.0), item("B", 50.0)]
    }

    #[test]
    fn adding_twice_increments() {
        let menu = menu();
        let mut meal = Meal::new();
        assert!(meal.add(&menu, "mcdonalds_uk_mains_a"));
        assert!(meal.add(&menu, "mcdonalds_uk_mains_a"));
        assert_eq!(meal.len(), 1);
        assert_eq!(meal.lines()[0].qty, 2);
    }

    #[test]
    fn unknown_ids_are_noops() {
        let menu = menu();
        let mut meal = Meal::new();
        assert!(!meal.add(&menu, "nope"));
        assert!(meal.is_empty());

        meal.add(&menu, "mcdonalds_uk_mains_a");
        let before = meal.clone();
        assert!(!meal.change_qty("nope", 3));
        assert!(!meal.remove("nope"));
        assert_eq!(meal, before);
    }

    #[test]
    fn quantity_floors_at_one() {
        let menu = menu();
        let mut meal = Meal::new();
        meal.add(&menu, "mcdonalds_uk_mains_a");
        meal.add(&menu, "mcdonalds_uk_mains_a");
        assert!(meal.change_qty("mcdonalds_uk_mains_a", -5));
        assert_eq!(meal.get("mcdonalds_uk_mains_a").map(|l| l.qty), Some(1));
        assert!(meal.change_qty("mcdonalds_uk_mains_a", 4));
        assert_eq!(meal.get("mcdonalds_uk_mains_a").map(|l| l.qty), Some(5));
        assert!(meal.change_qty("mcdonalds_uk_mains_a", i64::MAX));
        assert_eq!(meal.get("mcdonalds_uk_mains_a").map(|l| l.qty), Some(u32::MAX));
    }

    #[test]
    fn remove_and_clear() {
        let menu = menu();
        let mut meal = Meal::new();
        meal.add(&menu, "mcdonalds_uk_mains_a");
        meal.add(&menu, "mcdonalds_uk_mains_b");
        assert!(meal.remove("mcdonalds_uk_mains_a"));
        assert_eq!(meal.len(), 1);
        assert_eq!(meal.lines()[0].item.name, "B");

        meal.clear();
        assert!(meal.is_empty());
        meal.clear();
        assert!(meal.is_empty());
    }

    #[test]
    fn lines_are_snapshots() {
        let mut menu = menu();
        let mut meal = Meal::new();
        meal.add(&menu, "mcdonalds_uk_mains_a");
        menu[0].calories = 9999.0;
        assert_eq!(meal.lines()[0].item.calories, 100.0);
    }

    #[test]
    fn duplicate_menu_ids_resolve_to_first() {
        let mut menu = menu();
        menu.push(item("A", 700.0));
        let mut meal = Meal::new();
        meal.add(&menu, "mcdonalds_uk_mains_a");
        assert_eq!(meal.lines()[0].item.calories, 100.0);
    }

    #[test]
    fn totals_weight_by_quantity() {
        let menu = menu();
        let mut meal = Meal::new();
        meal.add(&menu, "mcdonalds_uk_mains_a");
        meal.add(&menu, "mcdonalds_uk_mains_a");
        for _ in 0..3 {
            meal.add(&menu, "mcdonalds_uk_mains_b");
        }
        let totals = meal.totals();
        assert_eq!(totals.calories, 350.0);
        assert_eq!(totals.protein, 7.5);
        assert_eq!(totals.sodium, 50.0);
        assert_eq!(Meal::new().totals(), NutritionTotals::default());
    }

    #[test]
    fn line_serializes_flat() {
        let menu = menu();
        let mut meal = Meal::new();
        meal.add(&menu, "mcdonalds_uk_mains_b");
        let value = serde_json::to_value(&meal).unwrap();
        assert_eq!(value[0]["name"], "B");
        assert_eq!(value[0]["qty"], 1);
        assert_eq!(value[0]["country"], "uk");
    }
}
