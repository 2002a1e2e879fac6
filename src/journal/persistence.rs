use std::fs;
use std::path::Path;

use crate::error::Result;
use crate::journal::JournalSnapshot;
use crate::models::MealEntry;

/// Load a journal snapshot from a JSON file.
///
/// A missing file is an empty session, not an error.
pub fn load_snapshot<P: AsRef<Path>>(path: P) -> Result<Option<JournalSnapshot>> {
    let path = path.as_ref();
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path)?;
    let snapshot: JournalSnapshot = serde_json::from_str(&content)?;
    Ok(Some(snapshot))
}

/// Save a journal snapshot as pretty JSON.
pub fn save_snapshot<P: AsRef<Path>>(path: P, snapshot: &JournalSnapshot) -> Result<()> {
    let json = serde_json::to_string_pretty(snapshot)?;
    fs::write(path, json)?;
    Ok(())
}

/// Write journal entries to a CSV file, one row per meal.
pub fn export_csv<P: AsRef<Path>>(entries: &[MealEntry], path: P) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record([
        "seq",
        "recorded_at",
        "food",
        "weight_g",
        "weight_source",
        "calories",
        "protein",
        "carbs",
        "fat",
        "health_score",
    ])?;

    for entry in entries {
        wtr.write_record([
            entry.seq.to_string(),
            entry.recorded_at.to_rfc3339(),
            entry.food.clone(),
            format!("{:.1}", entry.weight_g),
            entry.weight_source.to_string(),
            format!("{:.2}", entry.nutrition.calories),
            format!("{:.2}", entry.nutrition.protein),
            format!("{:.2}", entry.nutrition.carbs),
            format!("{:.2}", entry.nutrition.fat),
            entry.health_score.to_string(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}
