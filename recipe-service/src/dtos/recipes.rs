use crate::models::{CategoryCount, Recipe, RecipeSummary};
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RecipeListParams {
    #[serde(default = "default_page")]
    #[validate(range(min = 1))]
    pub page: u32,
    #[serde(default = "default_limit")]
    #[validate(range(min = 1, max = 100))]
    pub limit: u32,
}

fn default_page() -> u32 {
    1
}

fn default_limit() -> u32 {
    20
}

#[derive(Debug, Serialize)]
pub struct RecipeListResponse {
    pub success: bool,
    pub data: Vec<RecipeSummary>,
    /// Complete recipes across all pages.
    pub total: usize,
    pub page: u32,
    pub limit: u32,
}

#[derive(Debug, Serialize)]
pub struct RecipeDetailResponse {
    pub success: bool,
    pub data: Recipe,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RecipeSearchParams {
    #[serde(default)]
    #[validate(length(min = 1, message = "Query cannot be empty"))]
    pub q: String,
}

#[derive(Debug, Serialize)]
pub struct RecipeSearchResponse {
    pub success: bool,
    pub data: Vec<RecipeSummary>,
    pub query: String,
    pub total: usize,
}

#[derive(Debug, Serialize)]
pub struct CategoryListResponse {
    pub success: bool,
    pub data: Vec<CategoryCount>,
}
