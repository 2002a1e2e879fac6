pub mod calculator;
pub mod constants;
pub mod identity;
pub mod scoring;
pub mod weight;

pub use calculator::compute_nutrition;
pub use constants::*;
pub use identity::{normalize_label, resolve_food, suggest};
pub use scoring::health_score;
pub use weight::{parse_weight, resolve_weight, validate_weight, ResolvedWeight};
