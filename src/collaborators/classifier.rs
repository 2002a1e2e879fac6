use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{MealError, Result};

/// One ranked classifier answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub label: String,

    /// In [0, 1].
    pub confidence: f64,
}

impl Prediction {
    pub fn new(label: &str, confidence: f64) -> Self {
        Self {
            label: label.to_string(),
            confidence,
        }
    }
}

/// First prediction whose confidence is strictly above `threshold`.
pub fn pick_label(predictions: &[Prediction], threshold: f64) -> Option<&Prediction> {
    predictions.iter().find(|p| p.confidence > threshold)
}

/// Anything that can turn an image into ranked food labels.
pub trait FoodClassifier {
    fn name(&self) -> &str;

    fn classify(&self, image: &Path) -> Result<Vec<Prediction>>;
}

/// Always answers with the same predictions. Stands in for a vision backend
/// on devices that have none.
#[derive(Debug, Clone)]
pub struct FixedClassifier {
    predictions: Vec<Prediction>,
}

impl FixedClassifier {
    pub fn new(predictions: Vec<Prediction>) -> Self {
        Self { predictions }
    }
}

impl Default for FixedClassifier {
    fn default() -> Self {
        Self::new(vec![Prediction::new("apple", 0.95)])
    }
}

impl FoodClassifier for FixedClassifier {
    fn name(&self) -> &str {
        "fixed"
    }

    fn classify(&self, _image: &Path) -> Result<Vec<Prediction>> {
        Ok(self.predictions.clone())
    }
}

/// Reads predictions an external vision backend wrote next to the image,
/// as `<image>.predictions.json`.
#[derive(Debug, Clone, Default)]
pub struct PredictionFileClassifier;

impl PredictionFileClassifier {
    pub fn sidecar_path(image: &Path) -> PathBuf {
        let mut name = image.as_os_str().to_owned();
        name.push(".predictions.json");
        PathBuf::from(name)
    }
}

impl FoodClassifier for PredictionFileClassifier {
    fn name(&self) -> &str {
        "prediction-file"
    }

    fn classify(&self, image: &Path) -> Result<Vec<Prediction>> {
        let path = Self::sidecar_path(image);
        let content = fs::read_to_string(&path)?;
        let mut predictions: Vec<Prediction> = serde_json::from_str(&content)?;

        // Backends do not always rank their output.
        predictions.sort_by(|a, b| {
            b.confidence
                .partial_cmp(&a.confidence)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        Ok(predictions)
    }
}

/// Tries each backend in order. The first one that returns a non-empty
/// answer wins; failures and empty answers move on to the next backend.
pub struct FallbackClassifier {
    backends: Vec<Box<dyn FoodClassifier + Send + Sync>>,
}

impl FallbackClassifier {
    pub fn new(backends: Vec<Box<dyn FoodClassifier + Send + Sync>>) -> Self {
        Self { backends }
    }
}

impl FoodClassifier for FallbackClassifier {
    fn name(&self) -> &str {
        "fallback"
    }

    fn classify(&self, image: &Path) -> Result<Vec<Prediction>> {
        for backend in &self.backends {
            match backend.classify(image) {
                Ok(predictions) if !predictions.is_empty() => {
                    debug!(backend = backend.name(), count = predictions.len(), "image classified");
                    return Ok(predictions);
                }
                Ok(_) => debug!(backend = backend.name(), "backend returned no predictions"),
                Err(e) => warn!(backend = backend.name(), error = %e, "classifier backend failed"),
            }
        }
        Err(MealError::FoodNotRecognized {
            label: image.display().to_string(),
        })
    }
}
