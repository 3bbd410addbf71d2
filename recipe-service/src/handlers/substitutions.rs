use crate::dtos::{
    require_not_blank, BrowseParams, BrowseResponse, BulkSubstitutionRequest,
    BulkSubstitutionResponse, SubstitutionLookupResponse, SubstitutionRequest,
};
use crate::startup::AppState;
use crate::utils::{ValidatedJson, ValidatedQuery};
use axum::{extract::State, response::IntoResponse, Json};
use service_core::error::AppError;

pub async fn lookup_substitution(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<SubstitutionRequest>,
) -> Result<impl IntoResponse, AppError> {
    require_not_blank("ingredient", &payload.ingredient)?;

    let ingredient = payload.ingredient.trim().to_string();
    let Some(subs) = state.substitutions.find(&ingredient) else {
        tracing::debug!(ingredient = %ingredient, "No substitutions found");
        return Ok(Json(SubstitutionLookupResponse::Missing {
            success: false,
            message: format!("No substitutions found for '{}'", ingredient),
            ingredient,
            substitutions: Vec::new(),
        }));
    };

    let recipe_context = payload.recipe_context.trim().to_string();
    let ai_advice = match &state.assistant {
        Some(assistant) if !recipe_context.is_empty() => {
            assistant
                .recipe_substitution_advice(&ingredient, subs, &recipe_context)
                .await
                .text
        }
        _ => String::new(),
    };

    Ok(Json(SubstitutionLookupResponse::Found {
        success: true,
        ingredient,
        substitutions: subs.to_vec(),
        ai_advice,
        recipe_context,
    }))
}

pub async fn bulk_substitutions(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<BulkSubstitutionRequest>,
) -> Result<impl IntoResponse, AppError> {
    require_not_blank("ingredients", &payload.ingredients.concat())?;

    let requested: Vec<String> = payload
        .ingredients
        .iter()
        .map(|i| i.trim().to_string())
        .filter(|i| !i.is_empty())
        .collect();

    let substitutions = state.substitutions.suggestions(&requested);
    let missing_ingredients: Vec<String> = requested
        .iter()
        .filter(|i| !substitutions.contains_key(*i))
        .cloned()
        .collect();

    let recipe_context = payload.recipe_context.trim().to_string();
    let ai_overview = match &state.assistant {
        Some(assistant) if !recipe_context.is_empty() && !substitutions.is_empty() => {
            assistant
                .bulk_overview(&requested, &substitutions, &recipe_context)
                .await
                .text
        }
        _ => String::new(),
    };

    tracing::debug!(
        requested = requested.len(),
        found = substitutions.len(),
        missing = missing_ingredients.len(),
        "Bulk substitution lookup"
    );

    Ok(Json(BulkSubstitutionResponse {
        success: true,
        requested_ingredients: requested,
        substitutions,
        missing_ingredients,
        ai_overview,
        recipe_context,
    }))
}

/// The whole table, or one ingredient category of it.
pub async fn browse_substitutions(
    State(state): State<AppState>,
    ValidatedQuery(params): ValidatedQuery<BrowseParams>,
) -> Result<impl IntoResponse, AppError> {
    let table = &state.substitutions;

    let category = params
        .category
        .as_deref()
        .map(|c| c.trim().to_lowercase())
        .filter(|c| !c.is_empty());

    let response = match category {
        Some(category) => {
            let substitutions = table.category_substitutions(&category).ok_or_else(|| {
                AppError::NotFound(anyhow::anyhow!("Unknown ingredient category: {}", category))
            })?;
            BrowseResponse {
                success: true,
                total_ingredients: substitutions.len(),
                substitutions,
                message: format!("Substitutions for {} ingredients", category),
                category: Some(category),
            }
        }
        None => BrowseResponse {
            success: true,
            total_ingredients: table.len(),
            substitutions: table.entries().clone(),
            category: None,
            message: "Browse all available ingredient substitutions".to_string(),
        },
    };

    Ok(Json(response))
}
