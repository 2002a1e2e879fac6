pub mod prompts;
pub mod render;

pub use prompts::{prompt_food, prompt_weight, prompt_yes_no};
pub use render::{display_food_list, display_meal, display_summary};
