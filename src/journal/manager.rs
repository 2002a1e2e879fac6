use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::collaborators::classifier::{pick_label, Prediction};
use crate::config::FusionConfig;
use crate::error::{MealError, Result};
use crate::fusion::{
    compute_nutrition, health_score, resolve_food, resolve_weight, validate_weight,
    ResolvedWeight,
};
use crate::journal::table::{NutritionTable, SharedTable};
use crate::models::{
    display_name, round2, AbsoluteNutrition, DailySummary, MealEntry, MealOutcome,
};

#[derive(Debug, Default)]
struct JournalState {
    /// Most recent first.
    entries: VecDeque<MealEntry>,
    daily_total: f64,
    last_sensor_weight: Option<f64>,
    last_seq: u64,
}

/// Serializable copy of a journal, used to carry a session across processes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JournalSnapshot {
    pub daily_total: f64,
    pub last_sensor_weight: Option<f64>,

    /// Most recent first.
    pub entries: Vec<MealEntry>,

    #[serde(default)]
    pub last_seq: u64,
}

/// Ordered meal entries plus the running calorie total for one session.
///
/// All mutation happens under one lock. Food and weight resolution,
/// nutrition and scoring run before the lock is taken for the commit, so a
/// failed resolution never touches the journal.
pub struct MealJournal {
    table: Arc<SharedTable>,
    config: FusionConfig,
    state: Mutex<JournalState>,
}

impl MealJournal {
    pub fn new(table: Arc<SharedTable>, config: FusionConfig) -> Self {
        Self {
            table,
            config,
            state: Mutex::new(JournalState::default()),
        }
    }

    /// Rebuild a journal from a snapshot, re-applying the retention limit.
    pub fn restore(
        table: Arc<SharedTable>,
        config: FusionConfig,
        snapshot: JournalSnapshot,
    ) -> Result<Self> {
        if !(snapshot.daily_total.is_finite() && snapshot.daily_total >= 0.0) {
            return Err(MealError::InvalidInput(format!(
                "journal daily total is invalid: {}",
                snapshot.daily_total
            )));
        }
        let last_sensor_weight = match snapshot.last_sensor_weight {
            Some(w) => Some(validate_weight("last_sensor_weight", w)?),
            None => None,
        };

        let last_seq = snapshot
            .entries
            .iter()
            .map(|e| e.seq)
            .max()
            .unwrap_or(0)
            .max(snapshot.last_seq);

        let mut entries: VecDeque<MealEntry> = snapshot.entries.into();
        entries.truncate(config.journal_capacity.max(1));

        let journal = Self::new(table, config);
        {
            let mut state = journal.lock();
            state.entries = entries;
            state.daily_total = snapshot.daily_total;
            state.last_sensor_weight = last_sensor_weight;
            state.last_seq = last_seq;
        }
        Ok(journal)
    }

    fn lock(&self) -> MutexGuard<'_, JournalState> {
        // The critical sections cannot leave the state half-updated.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Record the latest reading from the scale.
    pub fn record_sensor_weight(&self, grams: f64) -> Result<()> {
        let grams = validate_weight("sensor_weight", grams)?;
        self.lock().last_sensor_weight = Some(grams);
        info!(grams, "sensor weight recorded");
        Ok(())
    }

    /// Resolve, score and commit a meal from a food label or id.
    pub fn record_meal(&self, label: &str, manual_weight: Option<f64>) -> Result<MealOutcome> {
        let table = self.table.snapshot();

        let food_id = resolve_food(label, &table).ok_or_else(|| MealError::FoodNotRecognized {
            label: label.trim().to_string(),
        })?;

        let last_sensor = self.lock().last_sensor_weight;
        let weight = resolve_weight(manual_weight, last_sensor, self.config.default_weight_g);

        let nutrition = Self::nutrition_for(&food_id, &weight, &table)?;
        let score = health_score(&nutrition);

        self.commit(food_id, weight, nutrition, score)
    }

    /// Record a meal from ranked classifier output.
    ///
    /// The first prediction above the configured confidence threshold is
    /// used as the label.
    pub fn record_classified_meal(
        &self,
        predictions: &[Prediction],
        manual_weight: Option<f64>,
    ) -> Result<MealOutcome> {
        let threshold = self.config.confidence_threshold();
        match pick_label(predictions, threshold) {
            Some(prediction) => self.record_meal(&prediction.label, manual_weight),
            None => Err(MealError::FoodNotRecognized {
                label: predictions
                    .first()
                    .map(|p| p.label.clone())
                    .unwrap_or_default(),
            }),
        }
    }

    fn nutrition_for(
        food_id: &str,
        weight: &ResolvedWeight,
        table: &NutritionTable,
    ) -> Result<AbsoluteNutrition> {
        compute_nutrition(food_id, weight.grams, table).inspect_err(|e| {
            if let MealError::UnknownFood(id) = e {
                warn!(food_id = %id, "resolved food missing from its own table snapshot");
            }
        })
    }

    fn commit(
        &self,
        food_id: String,
        weight: ResolvedWeight,
        nutrition: AbsoluteNutrition,
        health_score: u8,
    ) -> Result<MealOutcome> {
        let mut state = self.lock();

        // Checked before anything is mutated.
        let daily_total = round2(state.daily_total + nutrition.calories);
        if !daily_total.is_finite() {
            return Err(MealError::invalid_weight(
                "weight_g",
                "too large for the daily total",
            ));
        }

        state.last_seq += 1;
        let entry = MealEntry {
            seq: state.last_seq,
            food: display_name(&food_id),
            food_id,
            weight_g: weight.grams,
            weight_source: weight.source,
            nutrition,
            health_score,
            recorded_at: Utc::now(),
        };

        state.entries.push_front(entry.clone());
        state.entries.truncate(self.config.journal_capacity.max(1));
        state.daily_total = daily_total;

        info!(
            seq = entry.seq,
            food_id = %entry.food_id,
            weight_g = entry.weight_g,
            source = %entry.weight_source,
            calories = nutrition.calories,
            health_score,
            daily_total = state.daily_total,
            "meal recorded"
        );

        Ok(MealOutcome {
            entry,
            daily_total: state.daily_total,
        })
    }

    /// Running total with at most `limit` of the most recent entries.
    pub fn summary(&self, limit: usize) -> DailySummary {
        let state = self.lock();
        DailySummary {
            daily_total: state.daily_total,
            last_sensor_weight: state.last_sensor_weight,
            recent: state.entries.iter().take(limit).cloned().collect(),
        }
    }

    /// Summary using the configured entry limit.
    pub fn daily_summary(&self) -> DailySummary {
        self.summary(self.config.summary_limit)
    }

    /// All retained entries, most recent first.
    pub fn entries(&self) -> Vec<MealEntry> {
        self.lock().entries.iter().cloned().collect()
    }

    pub fn daily_total(&self) -> f64 {
        self.lock().daily_total
    }

    pub fn last_sensor_weight(&self) -> Option<f64> {
        self.lock().last_sensor_weight
    }

    pub fn len(&self) -> usize {
        self.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().entries.is_empty()
    }

    pub fn config(&self) -> &FusionConfig {
        &self.config
    }

    /// Current table snapshot.
    pub fn table(&self) -> Arc<NutritionTable> {
        self.table.snapshot()
    }

    pub fn snapshot(&self) -> JournalSnapshot {
        let state = self.lock();
        JournalSnapshot {
            daily_total: state.daily_total,
            last_sensor_weight: state.last_sensor_weight,
            entries: state.entries.iter().cloned().collect(),
            last_seq: state.last_seq,
        }
    }
}
