use crate::dtos::{
    require_not_blank, CategoryListResponse, RecipeDetailResponse, RecipeListParams,
    RecipeListResponse, RecipeSearchParams, RecipeSearchResponse,
};
use crate::startup::AppState;
use crate::utils::ValidatedQuery;
use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use service_core::error::AppError;

const SEARCH_LIMIT: usize = 50;

pub async fn list_recipes(
    State(state): State<AppState>,
    ValidatedQuery(params): ValidatedQuery<RecipeListParams>,
) -> Result<impl IntoResponse, AppError> {
    let catalog = state.catalog()?;

    let data = catalog.page(params.page, params.limit);
    tracing::debug!(
        page = params.page,
        limit = params.limit,
        returned = data.len(),
        "Listed recipes"
    );

    Ok(Json(RecipeListResponse {
        success: true,
        data,
        total: catalog.complete_count(),
        page: params.page,
        limit: params.limit,
    }))
}

pub async fn get_recipe(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let catalog = state.catalog()?;
    let recipe = catalog
        .get(&id)
        .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("Recipe not found: {}", id)))?;

    Ok(Json(RecipeDetailResponse {
        success: true,
        data: recipe.clone(),
    }))
}

pub async fn search_recipes(
    State(state): State<AppState>,
    ValidatedQuery(params): ValidatedQuery<RecipeSearchParams>,
) -> Result<impl IntoResponse, AppError> {
    require_not_blank("q", &params.q)?;
    let catalog = state.catalog()?;

    let query = params.q.trim().to_string();
    let data = catalog.search(&[query.as_str()], SEARCH_LIMIT);
    tracing::debug!(query = %query, results = data.len(), "Recipe search");

    Ok(Json(RecipeSearchResponse {
        success: true,
        total: data.len(),
        data,
        query,
    }))
}

pub async fn list_categories(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let catalog = state.catalog()?;
    Ok(Json(CategoryListResponse {
        success: true,
        data: catalog.categories(),
    }))
}
