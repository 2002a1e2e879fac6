use strsim::jaro_winkler;
use tracing::debug;

use crate::fusion::constants::{ID_SEPARATOR, SUGGESTION_MIN_SIMILARITY};
use crate::journal::NutritionTable;

/// Normalize a free-text label into id form: lowercase, trimmed, whitespace
/// runs replaced by the id separator.
pub fn normalize_label(raw: &str) -> String {
    raw.trim()
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<&str>>()
        .join(ID_SEPARATOR)
}

/// Map a raw label to a food id present in `table`.
///
/// Exact key match first. Otherwise the first key, in sorted order, that
/// contains the label or is contained in it.
pub fn resolve_food(raw_label: &str, table: &NutritionTable) -> Option<String> {
    let label = normalize_label(raw_label);
    if label.is_empty() {
        return None;
    }

    if table.contains(&label) {
        debug!(label = %label, "food resolved by exact match");
        return Some(label);
    }

    let found = table
        .food_ids()
        .iter()
        .find(|id| id.contains(label.as_str()) || label.contains(id.as_str()))
        .cloned();

    match &found {
        Some(id) => debug!(label = %label, food_id = %id, "food resolved by substring match"),
        None => debug!(label = %label, "no food matches label"),
    }
    found
}

/// Food ids similar to `raw_label`, best first.
pub fn suggest(raw_label: &str, table: &NutritionTable, limit: usize) -> Vec<String> {
    let label = normalize_label(raw_label);
    if label.is_empty() {
        return Vec::new();
    }

    let mut candidates: Vec<(&String, f64)> = table
        .food_ids()
        .iter()
        .map(|id| (id, jaro_winkler(id, &label)))
        .filter(|(_, score)| *score > SUGGESTION_MIN_SIMILARITY)
        .collect();

    // Stable sort keeps ties in id order.
    candidates.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

    candidates
        .into_iter()
        .take(limit)
        .map(|(id, _)| id.clone())
        .collect()
}
