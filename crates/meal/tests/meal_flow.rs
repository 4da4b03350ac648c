use meal::{category_options, filter_menu, Meal, ALL_CATEGORIES};
use normalize::{normalize_dataset, Brand};
use serde_json::json;

#[test]
fn browse_filter_and_total_a_meal() {
    let doc = json!({"menu": [
        {"category": "Chicken", "items": [
            {"name": "Original Recipe Breast", "calories": 390, "protein_g": 39, "salt_g": 2.5},
            {"name": "Hot Wings", "variants": [
                {"size": "3pc", "calories": 210, "protein_g": 15, "sodium_mg": 690},
                {"size": "6pc", "calories": 420, "protein_g": 30, "sodium_mg": 1380}
            ]}
        ]},
        {"category": "Sides", "items": [{"name": "Coleslaw", "calories": 170, "sugar_g": 14}]}
    ]});
    let menu = normalize_dataset(&doc, Brand::Kfc, "us");

    assert_eq!(category_options(&menu), [ALL_CATEGORIES, "Chicken", "Sides"]);

    let wings = filter_menu(&menu, "Chicken", "wings");
    assert_eq!(wings.len(), 2);
    assert_eq!(wings[1].name, "Hot Wings (6pc)");

    let mut meal = Meal::new();
    meal.add(&menu, &wings[1].id);
    meal.add(&menu, "kfc_us_sides_coleslaw");
    meal.add(&menu, "kfc_us_sides_coleslaw");
    meal.add(&menu, "kfc_us_chicken_original_recipe_breast");
    meal.change_qty("kfc_us_chicken_original_recipe_breast", -1);

    let totals = meal.totals();
    assert_eq!(totals.calories, 420.0 + 2.0 * 170.0 + 390.0);
    assert_eq!(totals.protein, 69.0);
    assert_eq!(totals.sugar, 28.0);
    assert_eq!(totals.sodium, 1380.0 + 1000.0);

    let shown = totals.display();
    assert_eq!(shown.calories, 1150);
    assert_eq!(shown.protein, "69.0");

    meal.remove(&wings[1].id);
    assert_eq!(meal.len(), 2);
    meal.clear();
    assert!(meal.is_empty());
}
