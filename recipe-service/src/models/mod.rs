pub mod column;
pub mod recipe;
pub mod substitution;

pub use column::ColumnValue;
pub use recipe::{CategoryCount, Instruction, Recipe, RecipeIngredient, RecipeSummary};
pub use substitution::{IngredientCategory, Substitution, SubstitutionMap};
