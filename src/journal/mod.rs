mod manager;
mod persistence;
pub mod table;

pub use manager::{JournalSnapshot, MealJournal};
pub use persistence::{export_csv, load_snapshot, save_snapshot};
pub use table::{JsonTableLoader, NutritionTable, SharedTable, TableLoader};
