//! Disaster Response Backend
//!
//! REST backend holding disaster reports in memory, with a status workflow,
//! per-report response log, filtering and CSV/PDF export.

mod api;
mod config;
mod errors;
mod export;
mod models;
mod store;

use std::sync::Arc;

use axum::{
    routing::{get, put},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use config::Config;
use store::ReportStore;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<ReportStore>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    // Initialize logging
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Disaster Response Backend");
    tracing::info!("Bind address: {}", config.bind_addr);

    let store = if config.seed_demo_data {
        ReportStore::seeded(config.workflow)
    } else {
        ReportStore::new(config.workflow, Vec::new(), Vec::new())
    };
    tracing::info!(
        "Report store ready with {} reports ({} workflow)",
        store.list_reports().await.len(),
        store.policy()
    );

    // Create application state
    let state = AppState {
        store: Arc::new(store),
    };

    // Build router
    let app = create_router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("Server listening on {}", config.bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the application router with all routes.
pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // API routes
    let api_routes = Router::new()
        // Reports
        .route("/reports", get(api::list_reports).post(api::create_report))
        .route("/reports/export/csv", get(api::export_csv))
        .route("/reports/export/pdf", get(api::export_pdf))
        .route("/reports/batch/status", put(api::batch_update_status))
        .route("/reports/{id}", get(api::get_report))
        .route("/reports/{id}/status", put(api::update_status))
        .route("/reports/{id}/history", get(api::get_status_history))
        // Responses
        .route(
            "/reports/{id}/responses",
            get(api::list_responses).post(api::add_response),
        )
        // Dashboard
        .route("/dashboard", get(api::get_dashboard))
        .route("/revision", get(api::get_revision))
        .route("/workflow", get(api::get_workflow))
        // Users
        .route("/users", get(api::list_users))
        .route("/users/{id}/view", get(api::get_session_view));

    // Health check
    let health_routes = Router::new().route("/health", get(health_check));

    Router::new()
        .nest("/api", api_routes)
        .merge(health_routes)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "OK"
}
