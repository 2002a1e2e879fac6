use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock};

use tracing::{debug, info, warn};

use crate::error::{MealError, Result};
use crate::fusion::identity::normalize_label;
use crate::models::MacroDensity;

/// Read-only mapping from normalized food id to its macro density.
#[derive(Debug, Clone, Default)]
pub struct NutritionTable {
    foods: HashMap<String, MacroDensity>,

    /// Keys in sorted order, for deterministic scans.
    sorted_ids: Vec<String>,
}

impl NutritionTable {
    /// Build a table from raw (name, density) pairs.
    ///
    /// Names are normalized. When two names normalize to the same id the
    /// later pair wins. Any invalid density rejects the whole table.
    pub fn new<I, S>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, MacroDensity)>,
        S: AsRef<str>,
    {
        let mut foods = HashMap::new();
        for (name, density) in entries {
            let name = name.as_ref();
            let id = normalize_label(name);
            if id.is_empty() {
                return Err(MealError::Storage(format!("empty food name '{}'", name)));
            }
            if !density.is_valid() {
                return Err(MealError::Storage(format!(
                    "invalid macro density for '{}': {:?}",
                    name, density
                )));
            }
            if foods.insert(id.clone(), density).is_some() {
                warn!(food_id = %id, raw_name = name, "duplicate food id in table, keeping last");
            }
        }

        let mut sorted_ids: Vec<String> = foods.keys().cloned().collect();
        sorted_ids.sort();

        Ok(Self { foods, sorted_ids })
    }

    pub fn get(&self, food_id: &str) -> Option<&MacroDensity> {
        self.foods.get(food_id)
    }

    pub fn contains(&self, food_id: &str) -> bool {
        self.foods.contains_key(food_id)
    }

    /// All food ids, sorted.
    pub fn food_ids(&self) -> &[String] {
        &self.sorted_ids
    }

    pub fn len(&self) -> usize {
        self.foods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.foods.is_empty()
    }
}

/// Source of a nutrition table.
pub trait TableLoader {
    fn load(&self) -> Result<NutritionTable>;
}

/// Loads a table from a JSON object of `name -> { calories, protein, carbs, fat }`.
#[derive(Debug, Clone)]
pub struct JsonTableLoader {
    path: PathBuf,
}

impl JsonTableLoader {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl TableLoader for JsonTableLoader {
    fn load(&self) -> Result<NutritionTable> {
        let content = fs::read_to_string(&self.path).map_err(|e| {
            MealError::Storage(format!("cannot read {}: {}", self.path.display(), e))
        })?;

        // BTreeMap keeps duplicate resolution independent of hash order.
        let raw: BTreeMap<String, MacroDensity> = serde_json::from_str(&content).map_err(|e| {
            MealError::Storage(format!("cannot parse {}: {}", self.path.display(), e))
        })?;

        let table = NutritionTable::new(raw)?;
        debug!(path = %self.path.display(), foods = table.len(), "nutrition table loaded");
        Ok(table)
    }
}

/// Shared handle to the current table.
///
/// Readers take an `Arc` snapshot; a reload swaps the pointer, so a
/// resolution in flight keeps seeing the table it started with.
#[derive(Debug)]
pub struct SharedTable {
    current: RwLock<Arc<NutritionTable>>,
}

impl SharedTable {
    pub fn new(table: NutritionTable) -> Self {
        Self {
            current: RwLock::new(Arc::new(table)),
        }
    }

    pub fn snapshot(&self) -> Arc<NutritionTable> {
        let guard = self.current.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&guard)
    }

    pub fn replace(&self, table: NutritionTable) {
        let next = Arc::new(table);
        let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
        *guard = next;
    }

    /// Load a new table and publish it. On failure the current table stays.
    pub fn reload(&self, loader: &dyn TableLoader) -> Result<()> {
        let table = loader.load()?;
        info!(foods = table.len(), "nutrition table reloaded");
        self.replace(table);
        Ok(())
    }
}
