use crate::models::{Substitution, SubstitutionMap};
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SubstitutionRequest {
    #[validate(length(min = 1, max = 200, message = "Ingredient must be 1-200 characters"))]
    pub ingredient: String,
    #[serde(default)]
    #[validate(length(max = 500))]
    pub recipe_context: String,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum SubstitutionLookupResponse {
    Found {
        success: bool,
        ingredient: String,
        substitutions: Vec<Substitution>,
        ai_advice: String,
        recipe_context: String,
    },
    Missing {
        success: bool,
        message: String,
        ingredient: String,
        substitutions: Vec<Substitution>,
    },
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct BulkSubstitutionRequest {
    #[validate(length(min = 1, max = 50, message = "Provide 1-50 ingredients"))]
    pub ingredients: Vec<String>,
    #[serde(default)]
    #[validate(length(max = 500))]
    pub recipe_context: String,
}

#[derive(Debug, Serialize)]
pub struct BulkSubstitutionResponse {
    pub success: bool,
    pub requested_ingredients: Vec<String>,
    pub substitutions: SubstitutionMap,
    pub missing_ingredients: Vec<String>,
    pub ai_overview: String,
    pub recipe_context: String,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct BrowseParams {
    pub category: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct BrowseResponse {
    pub success: bool,
    pub total_ingredients: usize,
    /// Serialized in table order.
    pub substitutions: SubstitutionMap,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub message: String,
}
