//! Interactive calculator state: the active dataset, its menu and the meal.
//!
//! A [`Session`] owns everything a front end needs to render. Every
//! operation is a plain method call; loads go through `&mut self`, so the
//! last load to finish is the state that remains.

use std::sync::{Arc, OnceLock, RwLock};
use std::time::{Duration, Instant};

use meal::{ALL_CATEGORIES, DisplayTotals, Meal, MenuFilter, NutritionTotals, category_options};
use normalize::{Brand, CanonicalItem, normalize_dataset};
use tracing::{Instrument, Level, error, info};

use crate::error::LoadError;
use crate::registry::{DatasetRegistry, region_label};
use crate::seo::{LOAD_FAILED_MESSAGE, LinkStatus, PageMeta};
use crate::source::DatasetSource;

/// Observer for dataset loads.
pub trait LoadMetrics: Send + Sync {
    fn record_load(
        &self,
        brand: Brand,
        region: &str,
        latency: Duration,
        result: Result<usize, &LoadError>,
    );
}

/// Install or clear the global load metrics recorder.
pub fn set_load_metrics(recorder: Option<Arc<dyn LoadMetrics>>) {
    let mut guard = metrics_lock()
        .write()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    *guard = recorder;
}

fn metrics_lock() -> &'static RwLock<Option<Arc<dyn LoadMetrics>>> {
    static METRICS: OnceLock<RwLock<Option<Arc<dyn LoadMetrics>>>> = OnceLock::new();
    METRICS.get_or_init(|| RwLock::new(None))
}

fn metrics_recorder() -> Option<Arc<dyn LoadMetrics>> {
    let guard = metrics_lock()
        .read()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    guard.clone()
}

/// One user's view of the calculator.
pub struct Session<S> {
    source: S,
    registry: DatasetRegistry,
    brand: Brand,
    region: String,
    menu: Vec<CanonicalItem>,
    categories: Vec<String>,
    meal: Meal,
    status: LinkStatus,
}

impl<S: DatasetSource> Session<S> {
    /// A session on the default brand and its default region. Nothing is
    /// loaded until [`Session::load`] (or a selection) runs.
    pub fn new(source: S, registry: DatasetRegistry) -> Self {
        let brand = Brand::default();
        let region = registry.default_region(brand);
        Self {
            source,
            registry,
            brand,
            region,
            menu: Vec::new(),
            categories: vec![ALL_CATEGORIES.to_string()],
            meal: Meal::new(),
            status: LinkStatus::NotLinked,
        }
    }

    /// Switch brand, reset the region to the brand's default, clear the
    /// meal, then load.
    pub async fn select_brand(&mut self, brand: Brand) {
        self.brand = brand;
        self.region = self.registry.default_region(brand);
        self.meal.clear();
        self.load().await;
    }

    /// Switch brand and region together, clear the meal, then load once.
    ///
    /// `None` picks the brand's default region.
    pub async fn select(&mut self, brand: Brand, region: Option<String>) {
        self.brand = brand;
        self.region = region.unwrap_or_else(|| self.registry.default_region(brand));
        self.meal.clear();
        self.load().await;
    }

    /// Switch region within the current brand, clear the meal, then load.
    pub async fn select_region(&mut self, region: impl Into<String>) {
        self.region = region.into();
        self.meal.clear();
        self.load().await;
    }

    /// Fetch and normalize the active dataset.
    ///
    /// Never fails: an unregistered combination leaves an empty menu marked
    /// [`LinkStatus::NotLinked`], and a fetch error leaves an empty menu
    /// marked [`LinkStatus::Failed`].
    pub async fn load(&mut self) {
        let span = tracing::span!(
            Level::INFO,
            "session.load",
            brand = %self.brand,
            region = %self.region
        );
        self.load_inner().instrument(span).await;
    }

    async fn load_inner(&mut self) {
        let start = Instant::now();
        let Some(path) = self.registry.path(self.brand, &self.region).map(str::to_owned) else {
            let err = LoadError::NotRegistered {
                brand: self.brand,
                region: self.region.clone(),
            };
            info!(error = %err, "dataset_not_registered");
            self.replace_menu(Vec::new(), LinkStatus::NotLinked);
            return;
        };

        let outcome = self.source.fetch(&path).await;
        let elapsed = start.elapsed();
        let elapsed_micros = elapsed.as_micros();

        match outcome {
            Ok(doc) => {
                let items = normalize_dataset(&doc, self.brand, &self.region);
                info!(
                    path = %path,
                    source = %self.source.describe(),
                    items = items.len(),
                    elapsed_micros,
                    "dataset_loaded"
                );
                if let Some(recorder) = metrics_recorder() {
                    recorder.record_load(self.brand, &self.region, elapsed, Ok(items.len()));
                }
                let status = LinkStatus::Linked {
                    region_label: region_label(&self.region),
                };
                self.replace_menu(items, status);
            }
            Err(err) => {
                error!(
                    path = %path,
                    source = %self.source.describe(),
                    error = %err,
                    elapsed_micros,
                    "dataset_load_failed"
                );
                if let Some(recorder) = metrics_recorder() {
                    recorder.record_load(self.brand, &self.region, elapsed, Err(&err));
                }
                let status = LinkStatus::Failed {
                    message: LOAD_FAILED_MESSAGE.to_string(),
                };
                self.replace_menu(Vec::new(), status);
            }
        }
    }

    fn replace_menu(&mut self, menu: Vec<CanonicalItem>, status: LinkStatus) {
        self.categories = category_options(&menu);
        self.menu = menu;
        self.status = status;
    }

    pub fn brand(&self) -> Brand {
        self.brand
    }

    pub fn region(&self) -> &str {
        &self.region
    }

    /// Regions the registry offers for the current brand.
    pub fn regions(&self) -> Vec<&str> {
        self.registry.regions(self.brand)
    }

    pub fn registry(&self) -> &DatasetRegistry {
        &self.registry
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn menu(&self) -> &[CanonicalItem] {
        &self.menu
    }

    /// `"All"` followed by the menu's distinct categories, sorted.
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    /// Menu items matching a category selection and search text.
    pub fn visible(&self, category: &str, query: &str) -> Vec<&CanonicalItem> {
        MenuFilter::new(category, query).apply(&self.menu)
    }

    pub fn item_count_label(&self) -> String {
        format!("{} items", self.menu.len())
    }

    pub fn status(&self) -> &LinkStatus {
        &self.status
    }

    pub fn page_meta(&self) -> PageMeta {
        PageMeta::for_dataset(self.brand, &self.region)
    }

    pub fn meal(&self) -> &Meal {
        &self.meal
    }

    pub fn totals(&self) -> NutritionTotals {
        self.meal.totals()
    }

    pub fn display_totals(&self) -> DisplayTotals {
        self.meal.totals().display()
    }

    /// Add one of a menu item to the meal. `false` if the id is not on the
    /// current menu.
    pub fn add(&mut self, item_id: &str) -> bool {
        self.meal.add(&self.menu, item_id)
    }

    pub fn change_qty(&mut self, item_id: &str, delta: i64) -> bool {
        self.meal.change_qty(item_id, delta)
    }

    pub fn remove(&mut self, item_id: &str) -> bool {
        self.meal.remove(item_id)
    }

    pub fn clear_meal(&mut self) {
        self.meal.clear();
    }
}
