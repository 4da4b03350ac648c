//! Which datasets exist for each brand, and where they live.

use std::collections::BTreeMap;

use normalize::Brand;
use serde::{Deserialize, Serialize};

/// Region selected when a brand offers it (or when nothing is registered).
pub const PREFERRED_REGION: &str = "us";

/// One region offered by a brand and the relative path of its dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionDataset {
    pub region: String,
    pub path: String,
}

impl RegionDataset {
    pub fn new(region: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            region: region.into(),
            path: path.into(),
        }
    }
}

/// Brand to ordered region datasets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DatasetRegistry {
    brands: BTreeMap<Brand, Vec<RegionDataset>>,
}

impl Default for DatasetRegistry {
    /// The bundled datasets: `data/<brand>_<region>.json`.
    fn default() -> Self {
        let table: [(Brand, &[&str]); 3] = [
            (Brand::Starbucks, &["us", "uk", "international"]),
            (Brand::Mcdonalds, &["us", "uk", "canada", "pakistan"]),
            (Brand::Kfc, &["us", "uk", "international"]),
        ];
        let brands = table
            .into_iter()
            .map(|(brand, regions)| {
                let datasets = regions
                    .iter()
                    .map(|region| {
                        RegionDataset::new(*region, format!("data/{}_{region}.json", brand.key()))
                    })
                    .collect();
                (brand, datasets)
            })
            .collect();
        Self { brands }
    }
}

impl DatasetRegistry {
    pub fn new(brands: BTreeMap<Brand, Vec<RegionDataset>>) -> Self {
        Self { brands }
    }

    /// Region keys offered for `brand`, in declared order.
    pub fn regions(&self, brand: Brand) -> Vec<&str> {
        self.brands
            .get(&brand)
            .map(|datasets| datasets.iter().map(|d| d.region.as_str()).collect())
            .unwrap_or_default()
    }

    pub fn path(&self, brand: Brand, region: &str) -> Option<&str> {
        self.brands
            .get(&brand)?
            .iter()
            .find(|d| d.region == region)
            .map(|d| d.path.as_str())
    }

    /// [`PREFERRED_REGION`] when offered, else the first region, else
    /// [`PREFERRED_REGION`].
    pub fn default_region(&self, brand: Brand) -> String {
        let regions = self.regions(brand);
        if regions.contains(&PREFERRED_REGION) {
            return PREFERRED_REGION.to_string();
        }
        regions
            .first()
            .map_or_else(|| PREFERRED_REGION.to_string(), |r| r.to_string())
    }

    pub fn brands(&self) -> impl Iterator<Item = Brand> + '_ {
        self.brands.keys().copied()
    }
}

/// Human-facing label for a region key.
pub fn region_label(key: &str) -> String {
    match key {
        "" => String::new(),
        "us" => "US".to_string(),
        "uk" => "UK".to_string(),
        "pakistan" => "Pakistan".to_string(),
        "canada" => "Canada".to_string(),
        "international" => "International".to_string(),
        other => other.to_uppercase(),
    }
}
