use thiserror::Error;

#[derive(Debug, Error)]
pub enum MealError {
    #[error("Food not recognized: '{label}'")]
    FoodNotRecognized { label: String },

    #[error("Invalid weight in '{field}': {reason}")]
    InvalidWeight { field: String, reason: String },

    #[error("Food not in nutrition table: {0}")]
    UnknownFood(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Prompt error: {0}")]
    Prompt(#[from] dialoguer::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl MealError {
    pub fn invalid_weight(field: &str, reason: impl Into<String>) -> Self {
        MealError::InvalidWeight {
            field: field.to_string(),
            reason: reason.into(),
        }
    }

    /// True for errors the user can fix by re-entering input.
    pub fn is_user_correctable(&self) -> bool {
        matches!(
            self,
            MealError::FoodNotRecognized { .. }
                | MealError::InvalidWeight { .. }
                | MealError::InvalidInput(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, MealError>;
