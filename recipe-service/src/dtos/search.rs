use crate::models::{RecipeSummary, SubstitutionMap};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Body of `/api/chat` and `/api/smart-search`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ChatRequest {
    #[validate(length(min = 1, max = 2000, message = "Message must be 1-2000 characters"))]
    pub message: String,
    /// Earlier conversation, passed through to the model.
    #[serde(default)]
    #[validate(length(max = 8000))]
    pub context: String,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub success: bool,
    pub response: String,
    pub suggestions: Vec<RecipeSummary>,
    pub fallback: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SmartSearchKind {
    SubstitutionResponse,
    RecipeSearch,
}

#[derive(Debug, Serialize)]
pub struct SmartSearchResponse {
    pub success: bool,
    pub chat_response: String,
    pub recipes: Vec<RecipeSummary>,
    pub search_terms: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub substitutions: Option<SubstitutionMap>,
    #[serde(rename = "type")]
    pub kind: SmartSearchKind,
    pub fallback: bool,
}
