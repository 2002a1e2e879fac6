use crate::fusion::constants::*;
use crate::models::AbsoluteNutrition;

/// Deduction for the calorie band. Bands are exclusive: only the highest applies.
fn calorie_penalty(calories: f64) -> u8 {
    if calories > CALORIES_HIGH {
        CALORIES_HIGH_PENALTY
    } else if calories > CALORIES_MODERATE {
        CALORIES_MODERATE_PENALTY
    } else {
        0
    }
}

/// Health score in [0, 100] for a portion.
///
/// Starts at 100 and only ever decreases:
/// - calories > 700: -25, else calories > 500: -10
/// - protein < 10: -15
/// - fat > 25: -10
pub fn health_score(nutrition: &AbsoluteNutrition) -> u8 {
    let mut deductions = calorie_penalty(nutrition.calories);

    if nutrition.protein < PROTEIN_MIN {
        deductions += PROTEIN_LOW_PENALTY;
    }

    if nutrition.fat > FAT_MAX {
        deductions += FAT_HIGH_PENALTY;
    }

    SCORE_MAX.saturating_sub(deductions)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn n(calories: f64, protein: f64, fat: f64) -> AbsoluteNutrition {
        AbsoluteNutrition::new(calories, protein, 0.0, fat)
    }

    #[test]
    fn test_perfect_score() {
        assert_eq!(health_score(&n(400.0, 20.0, 10.0)), 100);
    }

    #[test]
    fn test_moderate_calories_low_protein() {
        assert_eq!(health_score(&n(600.0, 5.0, 10.0)), 75);
    }

    #[test]
    fn test_high_calories_high_fat() {
        assert_eq!(health_score(&n(800.0, 20.0, 30.0)), 65);
    }

    #[test]
    fn test_calorie_bands_exclusive() {
        // 800 kcal is in both bands but only the high band counts.
        assert_eq!(health_score(&n(800.0, 20.0, 0.0)), 75);
        assert_eq!(health_score(&n(700.0, 20.0, 0.0)), 90);
        assert_eq!(health_score(&n(500.0, 20.0, 0.0)), 100);
    }

    #[test]
    fn test_boundaries_are_strict() {
        assert_eq!(health_score(&n(0.0, 10.0, 25.0)), 100);
        assert_eq!(health_score(&n(0.0, 9.99, 25.01)), 75);
    }

    #[test]
    fn test_all_deductions() {
        assert_eq!(health_score(&n(5000.0, 0.0, 500.0)), 50);
    }

    #[test]
    fn test_bounded_for_extremes() {
        let inputs = [
            n(0.0, 0.0, 0.0),
            n(f64::MAX, 0.0, f64::MAX),
            n(1e12, 1e12, 1e12),
            n(0.0, 1e12, 0.0),
        ];
        for input in inputs {
            let score = health_score(&input);
            assert!(score <= 100, "{:?} -> {}", input, score);
        }
    }
}
