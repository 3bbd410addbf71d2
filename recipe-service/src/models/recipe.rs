//! Recipe model as read from the bundled SQLite database.

use super::ColumnValue;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Listing view of a recipe.
///
/// `id`, `total_time` and `servings` keep whatever SQLite type the row
/// stored, so `7` stays a number and `"45 minutes"` stays text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct RecipeSummary {
    pub id: ColumnValue,
    pub name: String,
    pub description: Option<String>,
    pub total_time: Option<ColumnValue>,
    pub servings: Option<ColumnValue>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeIngredient {
    pub name: String,
    pub amount: Option<ColumnValue>,
    pub unit: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Instruction {
    pub step_number: i64,
    pub instruction: String,
}

/// Full recipe with ingredients (by name), instructions (by step) and categories.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    #[serde(flatten)]
    pub summary: RecipeSummary,
    pub ingredients: Vec<RecipeIngredient>,
    pub instructions: Vec<Instruction>,
    pub categories: Vec<String>,
}

impl Recipe {
    pub fn new(summary: RecipeSummary) -> Self {
        Self {
            summary,
            ingredients: Vec::new(),
            instructions: Vec::new(),
            categories: Vec::new(),
        }
    }

    pub fn id(&self) -> &ColumnValue {
        &self.summary.id
    }

    pub fn name(&self) -> &str {
        &self.summary.name
    }

    /// Only recipes with both ingredients and instructions are listed or searched.
    pub fn is_complete(&self) -> bool {
        !self.ingredients.is_empty() && !self.instructions.is_empty()
    }

    /// Substring match on name, description or any ingredient name.
    ///
    /// `needle` must already be ASCII-lowercased. Case folding is ASCII-only,
    /// like SQLite's `LIKE`.
    pub fn matches(&self, needle: &str) -> bool {
        let contains = |haystack: &str| haystack.to_ascii_lowercase().contains(needle);

        contains(&self.summary.name)
            || self.summary.description.as_deref().is_some_and(contains)
            || self.ingredients.iter().any(|i| contains(&i.name))
    }
}

/// Number of complete recipes filed under a category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCount {
    pub name: String,
    pub count: usize,
}
