use dialoguer::{Confirm, Input, Select};

use crate::error::Result;
use crate::fusion::{parse_weight, resolve_food, suggest};
use crate::journal::NutritionTable;

/// Suggestions offered when a label cannot be resolved.
const MAX_SUGGESTIONS: usize = 5;

/// Prompt for a food and resolve it against the table.
///
/// Returns `None` when the user enters nothing, meaning they are done.
pub fn prompt_food(table: &NutritionTable) -> Result<Option<String>> {
    loop {
        let input: String = Input::new()
            .with_prompt("What did you eat? (press Enter to finish)")
            .allow_empty(true)
            .interact_text()?;

        let input = input.trim();
        if input.is_empty() {
            return Ok(None);
        }

        if let Some(food_id) = resolve_food(input, table) {
            return Ok(Some(food_id));
        }

        let candidates = suggest(input, table, MAX_SUGGESTIONS);
        if candidates.is_empty() {
            println!("No matching food found for '{}'", input);
            continue;
        }

        if candidates.len() == 1 {
            let confirm = Confirm::new()
                .with_prompt(format!("Did you mean '{}'?", candidates[0]))
                .default(true)
                .interact()?;
            if confirm {
                return Ok(Some(candidates[0].clone()));
            }
            continue;
        }

        let mut options = candidates.clone();
        options.push("None of these".to_string());

        let selection = Select::new()
            .with_prompt("Which did you mean?")
            .items(&options)
            .default(0)
            .interact()?;

        if selection < candidates.len() {
            return Ok(Some(candidates[selection].clone()));
        }
    }
}

/// Prompt for a portion weight. Empty input means "use the scale or default".
pub fn prompt_weight(last_sensor_weight: Option<f64>) -> Result<Option<f64>> {
    let hint = match last_sensor_weight {
        Some(w) => format!("Portion weight in grams (Enter for scale reading {:.1} g)", w),
        None => "Portion weight in grams (Enter for default)".to_string(),
    };

    loop {
        let input: String = Input::new()
            .with_prompt(&hint)
            .allow_empty(true)
            .interact_text()?;

        if input.trim().is_empty() {
            return Ok(None);
        }

        match parse_weight("weight", &input) {
            Ok(grams) => return Ok(Some(grams)),
            Err(e) => println!("{}", e),
        }
    }
}

/// Prompt for yes/no confirmation.
pub fn prompt_yes_no(prompt: &str, default: bool) -> Result<bool> {
    Ok(Confirm::new()
        .with_prompt(prompt)
        .default(default)
        .interact()?)
}
