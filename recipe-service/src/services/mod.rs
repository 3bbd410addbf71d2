pub mod assistant;
pub mod catalog;
pub mod database;
pub mod metrics;
pub mod providers;
pub mod search;
pub mod substitutions;

pub use assistant::{ChefAssistant, ChatOutcome};
pub use catalog::RecipeCatalog;
pub use database::RecipeDb;
pub use metrics::{get_metrics, init_metrics};
pub use substitutions::SubstitutionTable;
