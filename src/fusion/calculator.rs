use crate::error::{MealError, Result};
use crate::fusion::constants::DENSITY_BASIS_G;
use crate::fusion::weight::validate_weight;
use crate::journal::NutritionTable;
use crate::models::AbsoluteNutrition;

/// Scale the table entry for `food_id` to a portion of `weight_g` grams.
///
/// Each field is rounded to 2 decimals, once. A portion so large that a
/// field overflows is an invalid weight.
pub fn compute_nutrition(
    food_id: &str,
    weight_g: f64,
    table: &NutritionTable,
) -> Result<AbsoluteNutrition> {
    let density = table
        .get(food_id)
        .ok_or_else(|| MealError::UnknownFood(food_id.to_string()))?;
    let weight_g = validate_weight("weight_g", weight_g)?;

    let nutrition = AbsoluteNutrition::scaled(density, weight_g / DENSITY_BASIS_G);
    if !nutrition.is_finite() {
        return Err(MealError::invalid_weight("weight_g", "too large"));
    }
    Ok(nutrition)
}
