use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::nutrition::AbsoluteNutrition;
use crate::fusion::constants::ID_SEPARATOR;

/// Which candidate supplied the portion weight of a meal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeightSource {
    Manual,
    Sensor,
    Default,
}

impl fmt::Display for WeightSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            WeightSource::Manual => "manual",
            WeightSource::Sensor => "sensor",
            WeightSource::Default => "default",
        };
        f.write_str(name)
    }
}

/// Human-readable form of a food id: `white_rice` -> `White Rice`.
pub fn display_name(food_id: &str) -> String {
    food_id
        .split(ID_SEPARATOR)
        .filter(|w| !w.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

/// One committed meal in the journal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MealEntry {
    /// Creation order within the journal, starting at 1.
    pub seq: u64,

    /// Table key the meal was resolved to.
    pub food_id: String,

    /// Display form of the food.
    pub food: String,

    pub weight_g: f64,

    pub weight_source: WeightSource,

    pub nutrition: AbsoluteNutrition,

    pub health_score: u8,

    pub recorded_at: DateTime<Utc>,
}

/// Result of a successful meal recording.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MealOutcome {
    pub entry: MealEntry,

    /// Running calorie total after this meal was added.
    pub daily_total: f64,
}

/// Read-only snapshot of the journal.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailySummary {
    pub daily_total: f64,
    pub last_sensor_weight: Option<f64>,

    /// Most recent first.
    pub recent: Vec<MealEntry>,
}
