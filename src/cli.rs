use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::ClassifierMode;

/// smart_meal — resolve meals into nutrition, a health score and a daily total.
#[derive(Parser, Debug)]
#[command(name = "smart_meal")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Path to the nutrition table JSON file.
    #[arg(short, long, default_value = "nutrition_db.json")]
    pub table: String,

    /// Path to the journal file carrying today's session.
    #[arg(short, long, default_value = "meal_journal.json")]
    pub journal: String,

    /// Optional engine configuration JSON file.
    #[arg(short, long)]
    pub config: Option<String>,

    /// How classifier labels are interpreted (sets the default confidence threshold).
    #[arg(long, value_enum)]
    pub mode: Option<ClassifierMode>,

    /// Confidence a prediction must exceed, overriding the mode default.
    #[arg(long)]
    pub threshold: Option<f64>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List foods in the nutrition table.
    Foods,

    /// Record a scale reading.
    Weigh {
        /// Weight in grams.
        grams: Option<String>,

        /// Read from a simulated scale instead.
        #[arg(long)]
        simulate: bool,

        /// Simulated scale base weight in grams.
        #[arg(long, default_value = "250")]
        base: f64,

        /// Simulated scale jitter in grams.
        #[arg(long, default_value = "2")]
        jitter: f64,

        /// Random seed for the simulated scale.
        #[arg(long, default_value = "123")]
        seed: u64,
    },

    /// Record a meal from a food name or a classified image.
    Log {
        /// Food name or id.
        food: Option<String>,

        /// Image whose predictions (<image>.predictions.json) identify the food.
        #[arg(long, conflicts_with = "food")]
        image: Option<PathBuf>,

        /// Fall back to the fixed mock classifier when no predictions are found.
        #[arg(long, requires = "image")]
        allow_mock: bool,

        /// Portion weight in grams. Defaults to the scale reading, then 100 g.
        #[arg(short, long)]
        weight: Option<String>,
    },

    /// Show the running total and recent meals.
    Daily {
        /// Number of recent meals to show.
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Export journal entries to CSV.
    Export {
        /// Output CSV path.
        path: PathBuf,
    },

    /// Log several meals interactively.
    Session,
}

impl Default for Command {
    fn default() -> Self {
        Command::Daily { limit: None }
    }
}
