//! Visible-subset selection over the master menu.

use std::collections::BTreeSet;

use normalize::CanonicalItem;

/// Category selector value that matches every item.
pub const ALL_CATEGORIES: &str = "All";

/// A category selector plus free-text query.
///
/// Category matching is exact and case-sensitive unless the selector is
/// [`ALL_CATEGORIES`]. The query is trimmed; an empty query matches every
/// item, otherwise it is a case-insensitive substring test on the name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuFilter {
    category: String,
    query: String,
}

impl Default for MenuFilter {
    fn default() -> Self {
        Self {
            category: ALL_CATEGORIES.to_string(),
            query: String::new(),
        }
    }
}

impl MenuFilter {
    pub fn new(category: impl Into<String>, query: &str) -> Self {
        Self {
            category: category.into(),
            query: query.trim().to_lowercase(),
        }
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    /// The normalized (trimmed, lowercased) query.
    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn matches(&self, item: &CanonicalItem) -> bool {
        let category_ok = self.category == ALL_CATEGORIES || item.category == self.category;
        let query_ok = self.query.is_empty() || item.name.to_lowercase().contains(&self.query);
        category_ok && query_ok
    }

    /// The matching items of `menu`, in menu order.
    pub fn apply<'a>(&self, menu: &'a [CanonicalItem]) -> Vec<&'a CanonicalItem> {
        menu.iter().filter(|item| self.matches(item)).collect()
    }
}

/// Filter `menu` by category selector and query, preserving order.
pub fn filter_menu(menu: &[CanonicalItem], category: &str, query: &str) -> Vec<CanonicalItem> {
    let filter = MenuFilter::new(category, query);
    menu.iter()
        .filter(|item| filter.matches(item))
        .cloned()
        .collect()
}

/// Selector options for a menu: [`ALL_CATEGORIES`] followed by the distinct
/// categories present, sorted lexicographically.
pub fn category_options(menu: &[CanonicalItem]) -> Vec<String> {
    let distinct: BTreeSet<&str> = menu.iter().map(|item| item.category.as_str()).collect();
    std::iter::once(ALL_CATEGORIES.to_string())
        .chain(distinct.into_iter().map(str::to_string))
        .collect()
}

#[cfg(test)]
mod tests {
    use normalize::{item_id, Brand};

    use super::*;

    fn item(category: &str, name: &str) -> CanonicalItem {
        CanonicalItem {
            id: item_id(Brand::Kfc, "us", category, name),
            brand: Brand::Kfc,
            region: "us".into(),
            category: category.into(),
            name: name.into(),
            calories: 100.0,
            protein: 0.0,
            carbs: 0.0,
            fat: 0.0,
            sugar: 0.0,
            sodium: 0.0,
        }
    }

    fn menu() -> Vec<CanonicalItem> {
        vec![
            item("Chicken", "Original Recipe Breast"),
            item("Sides", "Fries"),
            item("Chicken", "Hot Wings"),
            item("Burgers", "Zinger Burger"),
        ]
    }

    #[test]
    fn all_and_empty_query_is_identity() {
        let menu = menu();
        assert_eq!(filter_menu(&menu, "All", ""), menu);
        assert_eq!(filter_menu(&menu, "All", "   "), menu);
    }

    #[test]
    fn unmatched_query_is_empty() {
        assert!(filter_menu(&menu(), "All", "sushi").is_empty());
    }

    #[test]
    fn category_is_exact_and_case_sensitive() {
        let menu = menu();
        let names: Vec<_> = MenuFilter::new("Chicken", "")
            .apply(&menu)
            .into_iter()
            .map(|i| i.name.as_str())
            .collect();
        assert_eq!(names, ["Original Recipe Breast", "Hot Wings"]);
        assert!(filter_menu(&menu, "chicken", "").is_empty());
    }

    #[test]
    fn query_is_case_insensitive_substring_and_anded() {
        let menu = menu();
        let hits = filter_menu(&menu, "All", "  WING ");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "Hot Wings");

        assert!(filter_menu(&menu, "Sides", "wing").is_empty());
    }

    #[test]
    fn options_are_sorted_and_distinct() {
        assert_eq!(
            category_options(&menu()),
            ["All", "Burgers", "Chicken", "Sides"]
        );
        assert_eq!(category_options(&[]), ["All"]);
    }

    #[test]
    fn default_filter_passes_everything() {
        let filter = MenuFilter::default();
        assert_eq!(filter.category(), "All");
        assert!(menu().iter().all(|i| filter.matches(i)));
    }
}
