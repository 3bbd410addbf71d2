use crate::services::get_metrics;
use crate::startup::AppState;
use axum::{
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use serde_json::json;

const SERVICE_NAME: &str = "recipe-service";

const FEATURES: &[&str] = &[
    "92+ curated recipes",
    "AI-powered chat with substitutions",
    "Smart ingredient replacements",
    "Anti-SEO design philosophy",
];

/// API banner. Live dependency status is on `/health`.
pub async fn root(State(state): State<AppState>) -> impl IntoResponse {
    Json(json!({
        "message": "Welcome to Hungie API! 🍴",
        "version": env!("CARGO_PKG_VERSION"),
        "environment": state.config.environment.to_string(),
        "features": FEATURES,
    }))
}

/// Liveness check. Always 200, with dependency status in the body.
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let (database, recipe_count) = match &state.catalog {
        Some(catalog) => ("connected", catalog.complete_count()),
        None => ("missing", 0),
    };

    Json(json!({
        "status": "healthy",
        "service": SERVICE_NAME,
        "version": env!("CARGO_PKG_VERSION"),
        "environment": state.config.environment.to_string(),
        "ai_enabled": state.ai_enabled(),
        "database": database,
        "recipe_count": recipe_count,
    }))
}

pub async fn simple_health_check() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "message": "Hungie API is healthy!",
    }))
}

pub async fn readiness_check(State(state): State<AppState>) -> impl IntoResponse {
    match &state.catalog {
        Some(catalog) => (
            StatusCode::OK,
            Json(json!({
                "status": "ready",
                "recipe_count": catalog.complete_count(),
            })),
        ),
        None => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({
                "status": "not_ready",
                "reason": "recipe database not loaded",
            })),
        ),
    }
}

pub async fn metrics_endpoint() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        get_metrics(),
    )
}
