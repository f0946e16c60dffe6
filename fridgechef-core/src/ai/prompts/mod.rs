//! AI prompt templates.

pub mod extract_ingredients;
pub mod suggest_dishes;
pub mod write_recipe;

pub use extract_ingredients::{render_extract_system_prompt, render_extract_user_prompt};
pub use suggest_dishes::render_suggest_system_prompt;
pub use write_recipe::render_recipe_system_prompt;
