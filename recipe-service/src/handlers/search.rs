use crate::dtos::{
    require_not_blank, ChatRequest, ChatResponse, SmartSearchKind, SmartSearchResponse,
};
use crate::models::SubstitutionMap;
use crate::services::search::{
    extract_search_terms, is_substitution_query, mentioned_ingredient, MAX_QUERY_TERMS,
    SMART_SEARCH_LIMIT,
};
use crate::startup::AppState;
use crate::utils::validate_json;
use axum::{extract::rejection::JsonRejection, extract::State, response::IntoResponse, Json};
use service_core::error::AppError;

/// Answers substitution questions from the table, everything else by
/// searching the catalog and letting the chef persona present the results.
///
/// AI configuration is checked before the body is looked at.
pub async fn smart_search(
    State(state): State<AppState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let assistant = state.assistant()?;
    let payload = validate_json(payload)?;
    require_not_blank("message", &payload.message)?;

    let message_lower = payload.message.to_lowercase();

    if is_substitution_query(&message_lower) {
        if let Some(ingredient) = mentioned_ingredient(&state.substitutions, &message_lower) {
            let subs = state.substitutions.find(ingredient).unwrap_or_default();
            tracing::info!(
                ingredient,
                options = subs.len(),
                "Smart search answered from substitution table"
            );

            let advice = assistant
                .substitution_advice(ingredient, subs, &payload.message)
                .await;

            let mut substitutions = SubstitutionMap::new();
            substitutions.insert(ingredient.to_string(), subs.to_vec());

            return Ok(Json(SmartSearchResponse {
                success: true,
                chat_response: advice.text,
                recipes: Vec::new(),
                search_terms: vec![ingredient.to_string()],
                substitutions: Some(substitutions),
                kind: SmartSearchKind::SubstitutionResponse,
                fallback: advice.fallback,
            }));
        }
    }

    let search_terms = extract_search_terms(&message_lower);
    let catalog = state.catalog.as_deref();

    let recipes = match catalog {
        Some(catalog) if !search_terms.is_empty() => {
            let query_terms = &search_terms[..search_terms.len().min(MAX_QUERY_TERMS)];
            catalog.search(query_terms, SMART_SEARCH_LIMIT)
        }
        Some(_) => Vec::new(),
        None => {
            tracing::warn!("Smart search without recipe database; skipping recipe lookup");
            Vec::new()
        }
    };

    let message = if recipes.is_empty() {
        payload.message.clone()
    } else {
        format!(
            "{}\n\nFound {} matching recipes. Please provide encouraging response and mention some of these options.",
            payload.message,
            recipes.len()
        )
    };

    tracing::info!(
        terms = ?search_terms,
        recipes = recipes.len(),
        "Smart search answered from recipe catalog"
    );

    let reply = assistant.chat(catalog, &message, &payload.context).await;

    Ok(Json(SmartSearchResponse {
        success: true,
        chat_response: reply.text,
        recipes,
        search_terms,
        substitutions: None,
        kind: SmartSearchKind::RecipeSearch,
        fallback: reply.fallback,
    }))
}

pub async fn chat(
    State(state): State<AppState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let assistant = state.assistant()?;
    let payload = validate_json(payload)?;
    require_not_blank("message", &payload.message)?;

    let reply = assistant
        .chat(state.catalog.as_deref(), &payload.message, &payload.context)
        .await;

    Ok(Json(ChatResponse {
        success: true,
        response: reply.text,
        suggestions: Vec::new(),
        fallback: reply.fallback,
    }))
}
