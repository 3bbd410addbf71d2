pub mod health;
pub mod recipes;
pub mod search;
pub mod substitutions;

pub use health::{health_check, metrics_endpoint, readiness_check, root, simple_health_check};
pub use recipes::{get_recipe, list_categories, list_recipes, search_recipes};
pub use search::{chat, smart_search};
pub use substitutions::{browse_substitutions, bulk_substitutions, lookup_substitution};
