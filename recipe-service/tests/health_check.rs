//! End-to-end tests: the real application on a random port.
//!
//! Configuration comes from environment variables, so every test here is
//! serialized.

mod common;

use recipe_service::config::RecipeConfig;
use recipe_service::startup::Application;
use reqwest::Client;
use serial_test::serial;
use std::path::Path;
use std::time::Duration;
use tempfile::TempDir;

/// Spawn the application on a random port and return the port number.
async fn spawn_app(database_path: &Path) -> u16 {
    std::env::set_var("ENVIRONMENT", "test");
    std::env::set_var("APP__PORT", "0");
    std::env::set_var("DATABASE_URL", database_path);
    std::env::set_var("OPENAI_API_KEY", "");
    std::env::remove_var("SUBSTITUTIONS_PATH");

    let config = RecipeConfig::load().expect("Failed to load config");
    let app = Application::build(config)
        .await
        .expect("Failed to build application");

    let port = app.port();

    tokio::spawn(async move {
        let _ = app.run_until_stopped().await;
    });

    tokio::time::sleep(Duration::from_millis(100)).await;

    port
}

async fn get(port: u16, path: &str) -> reqwest::Response {
    Client::new()
        .get(format!("http://localhost:{}{}", port, path))
        .timeout(Duration::from_secs(5))
        .send()
        .await
        .expect("Failed to send request")
}

#[tokio::test]
#[serial]
async fn health_check_reports_loaded_catalog() {
    let dir = TempDir::new().unwrap();
    let database = common::seed_database(dir.path()).await;
    let port = spawn_app(&database).await;

    let response = get(port, "/health").await;
    assert!(response.status().is_success());
    assert_eq!(response.headers()["x-content-type-options"], "nosniff");
    assert!(response.headers().contains_key("x-request-id"));

    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["service"], "recipe-service");
    assert_eq!(body["environment"], "test");
    assert_eq!(body["database"], "connected");
    assert_eq!(body["recipe_count"], 4);
    assert_eq!(body["ai_enabled"], false);
}

#[tokio::test]
#[serial]
async fn health_check_stays_up_without_database() {
    let dir = TempDir::new().unwrap();
    let port = spawn_app(&dir.path().join("absent.db")).await;

    let response = get(port, "/health").await;
    assert_eq!(response.status().as_u16(), 200);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["database"], "missing");
    assert_eq!(body["recipe_count"], 0);

    let response = get(port, "/ready").await;
    assert_eq!(response.status().as_u16(), 503);

    let response = get(port, "/api/recipes").await;
    assert_eq!(response.status().as_u16(), 503);
}

#[tokio::test]
#[serial]
async fn simple_endpoints_respond() {
    let dir = TempDir::new().unwrap();
    let database = common::seed_database(dir.path()).await;
    let port = spawn_app(&database).await;

    let body: serde_json::Value = get(port, "/healthcheck").await.json().await.unwrap();
    assert_eq!(
        body,
        serde_json::json!({"status": "ok", "message": "Hungie API is healthy!"})
    );

    let body: serde_json::Value = get(port, "/").await.json().await.unwrap();
    assert_eq!(body["message"], "Welcome to Hungie API! 🍴");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
    assert_eq!(body["environment"], "test");
    assert_eq!(
        body["features"],
        serde_json::json!([
            "92+ curated recipes",
            "AI-powered chat with substitutions",
            "Smart ingredient replacements",
            "Anti-SEO design philosophy"
        ])
    );

    let response = get(port, "/ready").await;
    assert_eq!(response.status().as_u16(), 200);

    let response = get(port, "/metrics").await;
    assert_eq!(response.status().as_u16(), 200);
}

#[tokio::test]
#[serial]
async fn echoes_request_id() {
    let dir = TempDir::new().unwrap();
    let database = common::seed_database(dir.path()).await;
    let port = spawn_app(&database).await;

    let response = Client::new()
        .get(format!("http://localhost:{}/api/categories", port))
        .header("x-request-id", "test-request-42")
        .send()
        .await
        .unwrap();

    assert_eq!(response.headers()["x-request-id"], "test-request-42");
}
