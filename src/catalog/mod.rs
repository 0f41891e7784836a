pub mod builtin;
pub mod custom;
pub mod item;
pub mod selector;

use std::collections::{BTreeSet, HashSet};
use std::path::Path;

use chrono::NaiveDate;

use crate::error::SparkError;
pub use custom::{CustomTask, NewCustomTask};
pub use item::{CatalogItem, Category};
pub use selector::SelectError;

/// Static, read-only list of skills. Loaded once at startup.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    items: Vec<CatalogItem>,
}

impl Catalog {
    /// Build a catalog, rejecting duplicate ids
    pub fn new(items: Vec<CatalogItem>) -> Result<Catalog, SparkError> {
        let mut seen = HashSet::new();
        for item in &items {
            if !seen.insert(item.id.as_str()) {
                return Err(SparkError::new(
                    format!("Duplicate catalog id '{}'", item.id),
                    "catalog",
                ));
            }
        }
        Ok(Catalog { items })
    }

    pub fn builtin() -> Catalog {
        Catalog {
            items: builtin::builtin_items(),
        }
    }

    /// Load a catalog from a JSON array of items
    pub fn load_from_path(path: &Path) -> Result<Catalog, SparkError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            SparkError::new(format!("Failed to read catalog: {}", e), "io")
                .with_context(format!("path: {:?}", path))
        })?;
        let items: Vec<CatalogItem> = serde_json::from_str(&content).map_err(|e| {
            SparkError::new(format!("Failed to parse catalog: {}", e), "json_parse")
                .with_context(format!("path: {:?}", path))
        })?;
        tracing::info!(path = ?path, count = items.len(), "Loaded catalog from file");
        Catalog::new(items)
    }

    /// Configured catalog file if one is set, otherwise the built-in list
    pub fn load(path: Option<&Path>) -> Result<Catalog, SparkError> {
        match path {
            Some(path) => Catalog::load_from_path(path),
            None => Ok(Catalog::builtin()),
        }
    }

    pub fn items(&self) -> &[CatalogItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&CatalogItem> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn items_by_category(&self, category: Category) -> Vec<&CatalogItem> {
        selector::items_by_category(&self.items, category)
    }

    /// Categories that have at least one item
    pub fn categories(&self) -> BTreeSet<Category> {
        self.items.iter().map(|item| item.category).collect()
    }

    pub fn select_daily(
        &self,
        interests: &HashSet<Category>,
        excluded_ids: &HashSet<String>,
        today: NaiveDate,
    ) -> Result<&CatalogItem, SelectError> {
        selector::select_daily(&self.items, interests, excluded_ids, today)
    }
}
