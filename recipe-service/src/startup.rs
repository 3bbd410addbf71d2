//! Application startup and lifecycle management.

use crate::config::RecipeConfig;
use crate::cors::cors_layer;
use crate::handlers;
use crate::services::providers::{ChatProvider, OpenAiChatProvider, OpenAiProviderConfig};
use crate::services::{ChefAssistant, RecipeCatalog, RecipeDb, SubstitutionTable};
use axum::{
    middleware::from_fn,
    routing::{get, post},
    Router,
};
use service_core::error::AppError;
use service_core::middleware::{
    metrics_middleware, request_id_middleware, security_headers_middleware, REQUEST_ID_HEADER,
};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::trace::TraceLayer;

/// Shared application state. Everything in it is read-only after startup.
#[derive(Clone)]
pub struct AppState {
    pub config: RecipeConfig,
    /// `None` when the recipe database was missing at startup.
    pub catalog: Option<Arc<RecipeCatalog>>,
    pub substitutions: Arc<SubstitutionTable>,
    /// `None` when no AI credential is configured.
    pub assistant: Option<ChefAssistant>,
}

impl AppState {
    pub fn catalog(&self) -> Result<&RecipeCatalog, AppError> {
        self.catalog.as_deref().ok_or_else(|| {
            AppError::ServiceUnavailable(format!(
                "Recipe database is not available: {}",
                self.config.database.path.display()
            ))
        })
    }

    pub fn assistant(&self) -> Result<&ChefAssistant, AppError> {
        self.assistant.as_ref().ok_or_else(|| {
            AppError::ConfigError(anyhow::anyhow!(
                "OPENAI_API_KEY is not set; AI features are disabled"
            ))
        })
    }

    pub fn ai_enabled(&self) -> bool {
        self.assistant.is_some()
    }
}

/// Load the recipe catalog, tolerating only a missing database file.
pub async fn load_catalog(config: &RecipeConfig) -> Result<Option<Arc<RecipeCatalog>>, AppError> {
    let db = match RecipeDb::open(&config.database.path).await {
        Ok(db) => db,
        Err(AppError::ServiceUnavailable(msg)) => {
            tracing::warn!(
                path = %config.database.path.display(),
                "{}; recipe endpoints will return 503",
                msg
            );
            return Ok(None);
        }
        Err(e) => {
            tracing::error!("Failed to open recipe database: {}", e);
            return Err(e);
        }
    };

    if let Err(e) = db.health_check().await {
        db.close().await;
        return Err(e);
    }

    let catalog = db.load_catalog().await;
    db.close().await;

    let catalog = catalog.map_err(|e| {
        tracing::error!("Failed to load recipe catalog: {}", e);
        e
    })?;

    if catalog.complete_count() == 0 {
        tracing::warn!(
            path = %db.path().display(),
            "Recipe database has no complete recipes"
        );
    }

    Ok(Some(Arc::new(catalog)))
}

/// Build the AI assistant when a credential is configured.
pub fn build_assistant(config: &RecipeConfig) -> Result<Option<ChefAssistant>, AppError> {
    let Some(api_key) = config.openai.api_key.clone().filter(|_| config.ai_enabled()) else {
        tracing::warn!("OPENAI_API_KEY not set - AI features disabled");
        return Ok(None);
    };

    let provider = OpenAiChatProvider::new(OpenAiProviderConfig {
        api_key,
        model: config.openai.model.clone(),
        base_url: config.openai.base_url.clone(),
        timeout: Duration::from_secs(config.openai.timeout_secs),
    })
    .map_err(|e| AppError::ConfigError(anyhow::anyhow!(e)))?;

    tracing::info!(
        model = %config.openai.model,
        base_url = %config.openai.base_url,
        "Initialized OpenAI chat provider"
    );

    let provider: Arc<dyn ChatProvider> = Arc::new(provider);
    Ok(Some(ChefAssistant::new(provider)))
}

pub fn build_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config);

    Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health_check))
        .route("/healthcheck", get(handlers::simple_health_check))
        .route("/ready", get(handlers::readiness_check))
        .route("/metrics", get(handlers::metrics_endpoint))
        .route("/api/recipes", get(handlers::list_recipes))
        .route("/api/recipes/:id", get(handlers::get_recipe))
        .route("/api/search", get(handlers::search_recipes))
        .route("/api/categories", get(handlers::list_categories))
        .route("/api/chat", post(handlers::chat))
        .route("/api/smart-search", post(handlers::smart_search))
        .route("/api/substitutions", post(handlers::lookup_substitution))
        .route("/api/substitutions/bulk", post(handlers::bulk_substitutions))
        .route("/api/substitutions/browse", get(handlers::browse_substitutions))
        .with_state(state)
        .layer(from_fn(metrics_middleware))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
                let request_id = request
                    .headers()
                    .get(REQUEST_ID_HEADER)
                    .and_then(|value| value.to_str().ok())
                    .unwrap_or("-");

                tracing::info_span!(
                    "http_request",
                    request_id = %request_id,
                    method = %request.method(),
                    uri = %request.uri(),
                    version = ?request.version(),
                )
            }),
        )
        .layer(from_fn(request_id_middleware))
        .layer(from_fn(security_headers_middleware))
        .layer(cors)
}

/// Application container for managing server lifecycle.
pub struct Application {
    port: u16,
    listener: TcpListener,
    router: Router,
}

impl Application {
    /// Build the application with the given configuration.
    pub async fn build(config: RecipeConfig) -> Result<Self, AppError> {
        let catalog = load_catalog(&config).await?;

        let substitutions = SubstitutionTable::load(config.substitutions.path.as_deref())
            .map_err(|e| {
                tracing::error!("Failed to load substitution table: {}", e);
                e
            })?;
        tracing::info!(
            ingredients = substitutions.len(),
            "Substitution table loaded"
        );

        let assistant = build_assistant(&config)?;

        let state = AppState {
            config: config.clone(),
            catalog,
            substitutions: Arc::new(substitutions),
            assistant,
        };

        // Port 0 binds a random port for testing
        let addr = SocketAddr::from(([0, 0, 0, 0], config.common.port));
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind TCP listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!(
            port,
            environment = %config.environment,
            database = %config.database.path.display(),
            ai_enabled = state.ai_enabled(),
            "Recipe service listening"
        );

        Ok(Self {
            port,
            listener,
            router: build_router(state),
        })
    }

    /// Get the port the server is listening on.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Serve until SIGINT or SIGTERM.
    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        axum::serve(self.listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
