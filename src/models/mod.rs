mod meal;
mod nutrition;

pub use meal::{display_name, DailySummary, MealEntry, MealOutcome, WeightSource};
pub use nutrition::{round2, AbsoluteNutrition, MacroDensity};
