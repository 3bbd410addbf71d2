pub mod recipes;
pub mod search;
pub mod substitutions;

pub use recipes::{
    CategoryListResponse, RecipeDetailResponse, RecipeListParams, RecipeListResponse,
    RecipeSearchParams, RecipeSearchResponse,
};
pub use search::{ChatRequest, ChatResponse, SmartSearchKind, SmartSearchResponse};
pub use substitutions::{
    BrowseParams, BrowseResponse, BulkSubstitutionRequest, BulkSubstitutionResponse,
    SubstitutionLookupResponse, SubstitutionRequest,
};

use service_core::error::AppError;
use validator::{ValidationError, ValidationErrors};

/// Reject strings that are empty after trimming, as a 422 on `field`.
pub fn require_not_blank(field: &'static str, value: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        let mut errors = ValidationErrors::new();
        let mut error = ValidationError::new("blank");
        error.message = Some(format!("{} cannot be blank", field).into());
        errors.add(field, error);
        return Err(AppError::ValidationError(errors));
    }
    Ok(())
}
