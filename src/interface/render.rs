use crate::models::{DailySummary, MealEntry, MealOutcome};

/// Display a freshly recorded meal.
pub fn display_meal(outcome: &MealOutcome) {
    let entry = &outcome.entry;
    let n = &entry.nutrition;

    println!();
    println!("=== {} ===", entry.food);
    println!("Weight:       {:.1} g ({})", entry.weight_g, entry.weight_source);
    println!("Calories:     {:.2} kcal", n.calories);
    println!("Protein:      {:.2} g", n.protein);
    println!("Carbs:        {:.2} g", n.carbs);
    println!("Fat:          {:.2} g", n.fat);
    println!("Health score: {}/100", entry.health_score);
    println!();
    println!("Daily total:  {:.2} kcal", outcome.daily_total);
    println!();
}

/// Name column width, in characters since `{:<width$}` pads by characters.
fn name_width(entries: &[MealEntry]) -> usize {
    entries
        .iter()
        .map(|e| e.food.chars().count())
        .max()
        .unwrap_or(10)
}

fn display_entry_table(entries: &[MealEntry]) {
    let max_name_len = name_width(entries);

    for entry in entries {
        println!(
            "{:>4}. {:<width$} - {:>6.1} g | {:>7.2} kcal | P {:>6.2} C {:>6.2} F {:>6.2} | score {:>3}  {}",
            entry.seq,
            entry.food,
            entry.weight_g,
            entry.nutrition.calories,
            entry.nutrition.protein,
            entry.nutrition.carbs,
            entry.nutrition.fat,
            entry.health_score,
            entry.recorded_at.format("%H:%M"),
            width = max_name_len
        );
    }
}

/// Display the daily summary.
pub fn display_summary(summary: &DailySummary) {
    println!();
    println!("=== Today ===");
    println!("Total calories: {:.2} kcal", summary.daily_total);
    match summary.last_sensor_weight {
        Some(w) => println!("Scale reading:  {:.1} g", w),
        None => println!("Scale reading:  (none)"),
    }
    println!();

    if summary.recent.is_empty() {
        println!("No meals recorded yet.");
    } else {
        println!("--- Recent meals ---");
        display_entry_table(&summary.recent);
    }
    println!();
}

/// Display the foods known to the nutrition table.
pub fn display_food_list(food_ids: &[String]) {
    if food_ids.is_empty() {
        println!("Nutrition table is empty.");
        return;
    }

    println!();
    println!("=== Foods ({} items) ===", food_ids.len());
    println!();
    for id in food_ids {
        println!("  {}", id);
    }
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AbsoluteNutrition, WeightSource};
    use chrono::Utc;

    fn entry(food: &str) -> MealEntry {
        MealEntry {
            seq: 1,
            food_id: food.to_lowercase(),
            food: food.to_string(),
            weight_g: 100.0,
            weight_source: WeightSource::Default,
            nutrition: AbsoluteNutrition::new(100.0, 1.0, 1.0, 1.0),
            health_score: 85,
            recorded_at: Utc::now(),
        }
    }

    #[test]
    fn test_name_width_counts_characters() {
        let entries = vec![entry("Crème Brûlée"), entry("Apple")];
        assert_eq!(name_width(&entries), 12);

        let padded = format!("{:<width$}|", entries[1].food, width = name_width(&entries));
        assert_eq!(padded.chars().count(), 13);
    }

    #[test]
    fn test_name_width_empty() {
        assert_eq!(name_width(&[]), 10);
    }
}
