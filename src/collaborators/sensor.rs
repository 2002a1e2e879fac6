use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::error::{MealError, Result};
use crate::journal::MealJournal;

/// Source of scale readings in grams. `None` means no reading is available.
pub trait WeightSensor {
    fn read_grams(&mut self) -> Option<f64>;
}

/// Reports the same weight on every read.
#[derive(Debug, Clone)]
pub struct FixedScale {
    grams: f64,
}

impl FixedScale {
    pub fn new(grams: f64) -> Self {
        Self { grams }
    }
}

impl Default for FixedScale {
    fn default() -> Self {
        Self::new(250.0)
    }
}

impl WeightSensor for FixedScale {
    fn read_grams(&mut self) -> Option<f64> {
        Some(self.grams)
    }
}

/// Noisy scale for demos and tests: `base ± jitter`, rounded to 0.1 g.
#[derive(Debug, Clone)]
pub struct SimulatedScale {
    base: f64,
    jitter: f64,
    rng: StdRng,
}

impl SimulatedScale {
    /// Fails when `base` is not finite or the `-jitter..=jitter` span is not.
    pub fn new(base: f64, jitter: f64, seed: u64) -> Result<Self> {
        let jitter = jitter.abs();
        if !base.is_finite() || !(jitter * 2.0).is_finite() {
            return Err(MealError::InvalidInput(format!(
                "simulated scale needs a finite base and jitter, got {} ± {}",
                base, jitter
            )));
        }
        Ok(Self {
            base,
            jitter,
            rng: StdRng::seed_from_u64(seed),
        })
    }
}

impl WeightSensor for SimulatedScale {
    fn read_grams(&mut self) -> Option<f64> {
        let noise = if self.jitter > 0.0 {
            self.rng.gen_range(-self.jitter..=self.jitter)
        } else {
            0.0
        };
        let grams = ((self.base + noise).max(0.0) * 10.0).round() / 10.0;

        // An empty scale is no reading.
        (grams > 0.0).then_some(grams)
    }
}

/// Take one reading from `sensor` and push it into the journal.
///
/// Returns the recorded weight, or `None` when the sensor had nothing.
pub fn pump_sensor(sensor: &mut dyn WeightSensor, journal: &MealJournal) -> Result<Option<f64>> {
    match sensor.read_grams() {
        Some(grams) => {
            journal.record_sensor_weight(grams)?;
            Ok(Some(grams))
        }
        None => {
            debug!("sensor returned no reading");
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FusionConfig;
    use crate::journal::{NutritionTable, SharedTable};
    use std::sync::Arc;

    fn empty_journal() -> MealJournal {
        MealJournal::new(
            Arc::new(SharedTable::new(NutritionTable::default())),
            FusionConfig::default(),
        )
    }

    #[test]
    fn test_simulated_scale_is_seeded() {
        let mut a = SimulatedScale::new(250.0, 5.0, 7).unwrap();
        let mut b = SimulatedScale::new(250.0, 5.0, 7).unwrap();
        for _ in 0..20 {
            let reading = a.read_grams().unwrap();
            assert_eq!(Some(reading), b.read_grams());
            assert!((245.0..=255.0).contains(&reading));
        }
    }

    #[test]
    fn test_simulated_empty_scale() {
        let mut scale = SimulatedScale::new(0.0, 0.0, 1).unwrap();
        assert_eq!(scale.read_grams(), None);
    }

    #[test]
    fn test_simulated_scale_rejects_unbounded_jitter() {
        for jitter in [f64::INFINITY, f64::NAN, 1e308, -1e308] {
            assert!(matches!(
                SimulatedScale::new(250.0, jitter, 1),
                Err(MealError::InvalidInput(_))
            ));
        }
        assert!(SimulatedScale::new(f64::INFINITY, 5.0, 1).is_err());

        // Wide but finite jitter still reads without panicking.
        let mut scale = SimulatedScale::new(250.0, 1e300, 1).unwrap();
        assert!(scale.read_grams().is_none_or(f64::is_finite));
    }

    #[test]
    fn test_pump_sensor() {
        let journal = empty_journal();
        let recorded = pump_sensor(&mut FixedScale::default(), &journal).unwrap();
        assert_eq!(recorded, Some(250.0));
        assert_eq!(journal.last_sensor_weight(), Some(250.0));
    }

    #[test]
    fn test_pump_sensor_no_reading_keeps_cache() {
        let journal = empty_journal();
        journal.record_sensor_weight(180.0).unwrap();
        let mut empty = SimulatedScale::new(0.0, 0.0, 1).unwrap();
        let recorded = pump_sensor(&mut empty, &journal).unwrap();
        assert_eq!(recorded, None);
        assert_eq!(journal.last_sensor_weight(), Some(180.0));
    }

    #[test]
    fn test_pump_sensor_rejects_bad_reading() {
        let journal = empty_journal();
        assert!(pump_sensor(&mut FixedScale::new(-3.0), &journal).is_err());
        assert_eq!(journal.last_sensor_weight(), None);
    }
}
