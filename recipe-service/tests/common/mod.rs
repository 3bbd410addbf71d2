#![allow(dead_code)]

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use recipe_service::config::{
    CorsConfig, DatabaseConfig, Environment, OpenAiConfig, RecipeConfig, SubstitutionsConfig,
};
use recipe_service::services::providers::{ChatProvider, MockChatProvider};
use recipe_service::services::{ChefAssistant, SubstitutionTable};
use recipe_service::startup::{build_router, load_catalog, AppState};
use serde_json::Value;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;
use tower::ServiceExt;

const SCHEMA: &str = include_str!("../../schema/recipes.sql");

/// Five recipes. "Unfinished Soup" has no ingredients, so four are complete.
/// Values keep mixed storage classes: integer ids and servings, a total time
/// that is sometimes a number of minutes, real and text amounts.
const FIXTURES: &str = r#"
INSERT INTO recipes (id, name, description, total_time, servings) VALUES
    (1, 'Chicken Alfredo', 'Creamy pasta with chicken', '30 minutes', 4),
    (2, 'Beef Tacos', 'Quick weeknight tacos', 20, 4),
    (3, 'Garlic Bread', 'Crispy and buttery', '15 minutes', '6 slices'),
    (4, 'Unfinished Soup', 'Still being written', NULL, NULL),
    (5, 'Apple Pie', 'Classic lattice pie', '90 minutes', 8);

INSERT INTO ingredients (id, name) VALUES
    (1, 'heavy cream'),
    (2, 'chicken breast'),
    (3, 'fettuccine'),
    (4, 'ground beef'),
    (5, 'tortillas'),
    (6, 'bread'),
    (7, 'garlic'),
    (8, 'butter'),
    (9, 'apples'),
    (10, 'flour');

INSERT INTO recipe_ingredients (recipe_id, ingredient_id, amount, unit) VALUES
    (1, 1, 1.5, 'cup'),
    (1, 3, 12, 'oz'),
    (1, 2, 2, NULL),
    (2, 4, 1, 'lb'),
    (2, 5, 8, NULL),
    (3, 6, 1, 'loaf'),
    (3, 7, '3-4', 'cloves'),
    (3, 8, 4, 'tbsp'),
    (5, 9, 6, NULL),
    (5, 10, 2, 'cups');

INSERT INTO instructions (recipe_id, step_number, instruction) VALUES
    (1, 2, 'Toss the pasta in the sauce.'),
    (1, 1, 'Simmer the cream and season the chicken.'),
    (2, 1, 'Brown the beef and fill the tortillas.'),
    (3, 1, 'Spread garlic butter on the bread and bake.'),
    (4, 1, 'Boil water.'),
    (5, 1, 'Fill the crust and bake.');

INSERT INTO categories (id, name) VALUES
    (1, 'italian'),
    (2, 'dinner'),
    (3, 'mexican'),
    (4, 'side'),
    (5, 'dessert');

INSERT INTO recipe_categories (recipe_id, category_id) VALUES
    (1, 1),
    (1, 2),
    (2, 3),
    (2, 2),
    (3, 1),
    (3, 4),
    (4, 2),
    (5, 5);
"#;

/// Create a recipe database populated with the fixtures.
pub async fn seed_database(dir: &Path) -> PathBuf {
    let path = dir.join("hungie.db");
    let options = SqliteConnectOptions::new()
        .filename(&path)
        .create_if_missing(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await
        .expect("Failed to create test database");

    sqlx::raw_sql(SCHEMA)
        .execute(&pool)
        .await
        .expect("Failed to apply schema");
    sqlx::raw_sql(FIXTURES)
        .execute(&pool)
        .await
        .expect("Failed to insert fixtures");

    pool.close().await;
    path
}

pub fn test_config(database_path: &Path, environment: Environment) -> RecipeConfig {
    RecipeConfig {
        common: service_core::config::Config { port: 0 },
        environment,
        database: DatabaseConfig {
            path: database_path.to_path_buf(),
        },
        openai: OpenAiConfig {
            api_key: None,
            model: "gpt-3.5-turbo".to_string(),
            base_url: "http://127.0.0.1:9".to_string(),
            timeout_secs: 5,
        },
        substitutions: SubstitutionsConfig { path: None },
        cors: CorsConfig {
            allowed_origins: vec![
                "https://hungie.app".to_string(),
                "https://*.hungie.app".to_string(),
            ],
        },
    }
}

pub struct TestApp {
    pub router: Router,
    pub provider: Option<Arc<MockChatProvider>>,
    pub database_path: PathBuf,
    _dir: TempDir,
}

impl TestApp {
    /// Seeded database, AI disabled.
    pub async fn new() -> Self {
        Self::build(None, true, Environment::Test).await
    }

    /// Seeded database with the given mock behind the assistant.
    pub async fn with_ai(provider: MockChatProvider) -> Self {
        Self::build(Some(provider), true, Environment::Test).await
    }

    /// No database file at the configured path.
    pub async fn without_database(provider: Option<MockChatProvider>) -> Self {
        Self::build(provider, false, Environment::Test).await
    }

    pub async fn production() -> Self {
        Self::build(None, true, Environment::Production).await
    }

    async fn build(
        provider: Option<MockChatProvider>,
        seed: bool,
        environment: Environment,
    ) -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let database_path = if seed {
            seed_database(dir.path()).await
        } else {
            dir.path().join("missing.db")
        };

        let config = test_config(&database_path, environment);
        let catalog = load_catalog(&config)
            .await
            .expect("Failed to load catalog");

        let provider = provider.map(Arc::new);
        let assistant = provider.clone().map(|p| {
            let p: Arc<dyn ChatProvider> = p;
            ChefAssistant::new(p)
        });

        let state = AppState {
            config,
            catalog,
            substitutions: Arc::new(SubstitutionTable::embedded().expect("embedded table")),
            assistant,
        };

        Self {
            router: build_router(state),
            provider,
            database_path,
            _dir: dir,
        }
    }

    pub async fn request(&self, request: Request<Body>) -> axum::response::Response {
        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("Router failed")
    }

    pub async fn get_raw(&self, uri: &str) -> (StatusCode, String) {
        let response = self
            .request(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await;
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read body");
        (status, String::from_utf8(bytes.to_vec()).expect("UTF-8 body"))
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        let (status, body) = self.get_raw(uri).await;
        (status, parse(&body))
    }

    pub async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.post_raw(uri, &body.to_string()).await
    }

    /// POST a body verbatim with a JSON content type.
    pub async fn post_raw(&self, uri: &str, body: &str) -> (StatusCode, Value) {
        let response = self
            .request(
                Request::builder()
                    .method("POST")
                    .uri(uri)
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await;
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read body");
        (status, parse(&String::from_utf8_lossy(&bytes)))
    }

    pub fn provider(&self) -> &MockChatProvider {
        self.provider.as_deref().expect("test app has no mock provider")
    }
}

fn parse(body: &str) -> Value {
    serde_json::from_str(body).unwrap_or(Value::Null)
}
