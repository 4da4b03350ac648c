use crate::brand::Brand;

/// Build the deterministic id of a menu item.
///
/// Brand key, region, category and name are joined with `_`, lowercased,
/// and every maximal run of characters outside `[a-z0-9]` is collapsed to a
/// single `_`. Two items with the same name in the same category of one
/// dataset share an id; callers resolve such collisions by encounter order.
pub fn item_id(brand: Brand, region: &str, category: &str, name: &str) -> String {
    let joined = format!("{}_{region}_{category}_{name}", brand.key()).to_lowercase();

    let mut id = String::with_capacity(joined.len());
    let mut in_gap = false;
    for ch in joined.chars() {
        if ch.is_ascii_lowercase() || ch.is_ascii_digit() {
            id.push(ch);
            in_gap = false;
        } else if !in_gap {
            id.push('_');
            in_gap = true;
        }
    }
    id
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn special_characters_collapse() {
        let id = item_id(Brand::Starbucks, "us", "Drinks", "Caffè Latte!");
        assert_eq!(id, "starbucks_us_drinks_caff_latte_");
    }

    #[test]
    fn deterministic() {
        let a = item_id(Brand::Kfc, "uk", "Buckets", "10 Piece Bucket");
        let b = item_id(Brand::Kfc, "uk", "Buckets", "10 Piece Bucket");
        assert_eq!(a, b);
        assert_eq!(a, "kfc_uk_buckets_10_piece_bucket");
    }

    #[test]
    fn separators_merge_with_neighbouring_runs() {
        let id = item_id(Brand::Mcdonalds, "us", "Burgers & Sandwiches", "  Big Mac®  ");
        assert_eq!(id, "mcdonalds_us_burgers_sandwiches_big_mac_");
    }

    #[test]
    fn output_alphabet() {
        let id = item_id(Brand::Mcdonalds, "pakistan", "Deals/Combos", "McArabia™ (Chicken)");
        assert!(id.chars().all(|c| c == '_' || c.is_ascii_lowercase() || c.is_ascii_digit()));
        assert!(!id.contains("__"));
    }
}
