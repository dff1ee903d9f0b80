//! Recipe Explorer Backend
//!
//! REST API for recipe records stored as JSON documents in SQLite, with optional
//! AI-generated recipe suggestions and simplifications.

mod ai;
mod api;
mod config;
mod db;
mod errors;
mod models;
mod seed;

use std::sync::Arc;

use axum::{
    extract::State,
    http::HeaderValue,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use ai::TextGateway;
use config::{Config, CorsOrigins};
use db::{RecordStore, Repository};

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub repo: Arc<Repository>,
    pub gateway: Arc<TextGateway>,
    pub config: Arc<Config>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize logging
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Recipe Explorer Backend v{}", VERSION);
    tracing::info!("Database path: {:?}", config.db_path);
    tracing::info!("Bind address: {}", config.bind_addr);

    // Connect eagerly so misconfiguration shows up in the logs; requests retry lazily.
    let store = Arc::new(RecordStore::new(config.db_path.clone()));
    if let Err(e) = store.init().await {
        tracing::warn!("Document store unavailable at startup: {}", e);
    }
    let repo = Arc::new(Repository::new(store.clone()));

    if config.seed_sample_data {
        match repo.seed_if_empty(seed::sample_recipes()).await {
            Ok(inserted) => tracing::info!("Sample data: {} recipes inserted", inserted),
            Err(e) => tracing::warn!("Failed to seed sample data: {}", e),
        }
    }

    let gateway = Arc::new(TextGateway::from_config(&config));

    // Create application state
    let state = AppState {
        repo,
        gateway,
        config: Arc::new(config.clone()),
    };

    // Build router
    let app = create_router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("Server listening on {}", config.bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    store.shutdown().await;
    tracing::info!("Server stopped");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}

/// Create the application router with all routes.
pub fn create_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config.cors_origins);

    // API routes
    let api_routes = Router::new()
        // Recipes
        .route("/recipes", get(api::list_recipes).post(api::create_recipe))
        .route("/recipes/", get(api::list_recipes).post(api::create_recipe))
        .route("/recipes/count", get(api::count_recipes))
        .route("/recipes/search", post(api::search_recipes))
        .route(
            "/recipes/{id}",
            get(api::get_recipe)
                .put(api::update_recipe)
                .delete(api::delete_recipe),
        )
        // AI
        .route("/ai/suggest-recipe", post(api::suggest_recipe))
        .route("/ai/simplify-recipe", post(api::simplify_recipe))
        .route("/ai/health", get(api::ai_health))
        .route("/health", get(api_health_check));

    Router::new()
        .nest("/api", api_routes)
        .route("/", get(root))
        .route("/health", get(health_check))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn cors_layer(origins: &CorsOrigins) -> CorsLayer {
    let allow_origin = match origins {
        CorsOrigins::Any => AllowOrigin::from(Any),
        CorsOrigins::List(list) => AllowOrigin::list(
            list.iter()
                .filter_map(|origin| match HeaderValue::from_str(origin) {
                    Ok(value) => Some(value),
                    Err(_) => {
                        tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                        None
                    }
                }),
        ),
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods(Any)
        .allow_headers(Any)
}

/// Root endpoint.
async fn root() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "message": "Recipe Explorer API is running",
        "version": VERSION,
    }))
}

/// Health check endpoint without dependencies.
async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "Recipe Explorer API",
        "version": VERSION,
    }))
}

/// Health check including document store connectivity.
async fn api_health_check(State(state): State<AppState>) -> Json<Value> {
    let database = match state.repo.store().get_or_init().await {
        Ok(_) => "connected",
        Err(_) => "disconnected",
    };
    Json(json!({
        "status": "healthy",
        "message": "API is running",
        "version": VERSION,
        "database": database,
    }))
}
