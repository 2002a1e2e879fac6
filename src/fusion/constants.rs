/// Separator used in normalized food ids.
pub const ID_SEPARATOR: &str = "_";

/// Portion weight used when neither a manual nor a sensor weight is usable.
pub const DEFAULT_WEIGHT_G: f64 = 100.0;

/// Density records are expressed per this many grams.
pub const DENSITY_BASIS_G: f64 = 100.0;

/// Entries retained by the journal.
pub const JOURNAL_CAPACITY: usize = 20;

/// Entries returned by a daily summary when no limit is given.
pub const SUMMARY_LIMIT: usize = 10;

// ─────────────────────────────────────────────────────────────────────────────
// Classifier confidence thresholds
// ─────────────────────────────────────────────────────────────────────────────

/// Threshold when raw classifier labels are used directly.
pub const SIMPLE_CONFIDENCE_THRESHOLD: f64 = 0.5;

/// Threshold when classifier labels go through a label map first.
pub const LABEL_MAPPED_CONFIDENCE_THRESHOLD: f64 = 0.2;

/// Minimum Jaro-Winkler similarity for a "did you mean" suggestion.
pub const SUGGESTION_MIN_SIMILARITY: f64 = 0.7;

// ─────────────────────────────────────────────────────────────────────────────
// Health score ladder
// ─────────────────────────────────────────────────────────────────────────────

pub const SCORE_MAX: u8 = 100;

/// Calorie bands. Only the highest band that applies is deducted.
pub const CALORIES_HIGH: f64 = 700.0;
pub const CALORIES_HIGH_PENALTY: u8 = 25;
pub const CALORIES_MODERATE: f64 = 500.0;
pub const CALORIES_MODERATE_PENALTY: u8 = 10;

/// Protein below this many grams is penalized.
pub const PROTEIN_MIN: f64 = 10.0;
pub const PROTEIN_LOW_PENALTY: u8 = 15;

/// Fat above this many grams is penalized.
pub const FAT_MAX: f64 = 25.0;
pub const FAT_HIGH_PENALTY: u8 = 10;
