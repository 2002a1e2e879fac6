pub mod cli;
pub mod collaborators;
pub mod config;
pub mod error;
pub mod fusion;
pub mod interface;
pub mod journal;
pub mod models;

pub use config::{ClassifierMode, FusionConfig};
pub use error::{MealError, Result};
pub use journal::{MealJournal, NutritionTable, SharedTable};
pub use models::{AbsoluteNutrition, MacroDensity, MealEntry, MealOutcome};
