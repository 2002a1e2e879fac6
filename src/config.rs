use std::fs;
use std::path::Path;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{MealError, Result};
use crate::fusion::constants::{
    DEFAULT_WEIGHT_G, JOURNAL_CAPACITY, LABEL_MAPPED_CONFIDENCE_THRESHOLD,
    SIMPLE_CONFIDENCE_THRESHOLD, SUMMARY_LIMIT,
};

/// How classifier labels reach the identity resolver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum ClassifierMode {
    /// Raw labels are matched against the table directly.
    #[default]
    Simple,

    /// Labels pass through a label map, so lower confidences are accepted.
    LabelMapped,
}

impl ClassifierMode {
    pub fn default_threshold(self) -> f64 {
        match self {
            ClassifierMode::Simple => SIMPLE_CONFIDENCE_THRESHOLD,
            ClassifierMode::LabelMapped => LABEL_MAPPED_CONFIDENCE_THRESHOLD,
        }
    }
}

/// Tunables for the fusion engine and journal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FusionConfig {
    /// Portion weight used when no manual or sensor weight is usable.
    pub default_weight_g: f64,

    /// Maximum entries kept in the journal.
    pub journal_capacity: usize,

    /// Entries returned by a daily summary.
    pub summary_limit: usize,

    pub classifier_mode: ClassifierMode,

    /// Overrides the threshold implied by `classifier_mode`.
    pub confidence_threshold: Option<f64>,
}

impl Default for FusionConfig {
    fn default() -> Self {
        Self {
            default_weight_g: DEFAULT_WEIGHT_G,
            journal_capacity: JOURNAL_CAPACITY,
            summary_limit: SUMMARY_LIMIT,
            classifier_mode: ClassifierMode::default(),
            confidence_threshold: None,
        }
    }
}

impl FusionConfig {
    /// Load from a JSON file. A missing file yields the defaults.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            debug!(path = %path.display(), "config file not found, using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        let config: FusionConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.default_weight_g.is_finite() && self.default_weight_g > 0.0) {
            return Err(MealError::InvalidInput(format!(
                "default_weight_g must be positive, got {}",
                self.default_weight_g
            )));
        }
        if self.journal_capacity == 0 {
            return Err(MealError::InvalidInput(
                "journal_capacity must be at least 1".to_string(),
            ));
        }
        if let Some(t) = self.confidence_threshold {
            if !(0.0..=1.0).contains(&t) {
                return Err(MealError::InvalidInput(format!(
                    "confidence_threshold must be within [0, 1], got {}",
                    t
                )));
            }
        }
        Ok(())
    }

    /// Threshold a prediction's confidence must exceed to be used.
    pub fn confidence_threshold(&self) -> f64 {
        self.confidence_threshold
            .unwrap_or_else(|| self.classifier_mode.default_threshold())
    }
}
