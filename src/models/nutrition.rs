use serde::{Deserialize, Serialize};

/// Round a value to 2 decimal places.
#[inline]
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Macro content of one food per 100 g.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MacroDensity {
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
}

impl MacroDensity {
    pub fn new(calories: f64, protein: f64, carbs: f64, fat: f64) -> Self {
        Self {
            calories,
            protein,
            carbs,
            fat,
        }
    }

    /// All four fields finite and non-negative.
    pub fn is_valid(&self) -> bool {
        [self.calories, self.protein, self.carbs, self.fat]
            .into_iter()
            .all(|v| v.is_finite() && v >= 0.0)
    }
}

/// Macros for an actual portion. Values are rounded once, on creation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AbsoluteNutrition {
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
}

impl AbsoluteNutrition {
    pub fn new(calories: f64, protein: f64, carbs: f64, fat: f64) -> Self {
        Self {
            calories: round2(calories),
            protein: round2(protein),
            carbs: round2(carbs),
            fat: round2(fat),
        }
    }

    pub fn is_finite(&self) -> bool {
        [self.calories, self.protein, self.carbs, self.fat]
            .into_iter()
            .all(f64::is_finite)
    }

    /// Scale a density record by `factor` (portion grams / 100).
    pub fn scaled(density: &MacroDensity, factor: f64) -> Self {
        Self::new(
            density.calories * factor,
            density.protein * factor,
            density.carbs * factor,
            density.fat * factor,
        )
    }
}
