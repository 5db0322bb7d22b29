//! HTTP server implementation

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use tower_http::compression::CompressionLayer;
use tower_http::cors::Any;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::api::handlers::AppState;
use crate::api::routes;
use crate::config::AppConfig;
use crate::rag::KnowledgeRouter;
use crate::Result;

/// Per-request deadline at the HTTP boundary; the cascade itself enforces
/// no timeout of its own.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// Start the API server
pub async fn serve_api(
    config: &AppConfig,
    host: String,
    port: u16,
    enable_cors: bool,
) -> Result<()> {
    info!("Starting hybrag API server...");

    // Initialize services
    let router = Arc::new(KnowledgeRouter::from_config(config).await?);
    let state = AppState { router };

    // Build API routes
    let api_router = routes::api_routes(state);

    let mut app = Router::new().nest("/api", api_router);

    // Add middleware layers
    app = app
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::new(REQUEST_TIMEOUT));

    // Add CORS if enabled
    if enable_cors {
        info!("CORS enabled");
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
        app = app.layer(cors);
    }

    // Start server
    let addr = format!("{host}:{port}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!("API server listening on http://{}", addr);
    info!("Available endpoints:");
    info!("  GET  /api/health - Health check");
    info!("  POST /api/ask    - Answer a question");

    axum::serve(listener, app).await?;

    Ok(())
}
