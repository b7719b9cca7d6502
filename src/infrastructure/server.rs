// Server module - builds the application router and runs it

use axum::{
    Json, Router,
    http::HeaderValue,
    middleware,
    routing::get,
};
use sea_orm::DatabaseConnection;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;

use crate::api::{self, error::AppError};
use crate::api_docs::ApiDoc;
use crate::infrastructure::AppState;
use crate::infrastructure::config::Config;
use crate::views::{Outcome, render_views};

/// Build the full application router
pub fn build_router(state: AppState, config: &Config) -> Router {
    Router::new()
        .route("/", get(|| async { Outcome::redirect("/catalog") }))
        .nest("/catalog", api::catalog_router())
        .route("/api/health", get(api::health::health_check))
        .route("/api-docs/openapi.json", get(openapi_json))
        .fallback(not_found)
        .layer(middleware::from_fn_with_state(state.clone(), render_views))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&config.cors_allowed_origins))
        .with_state(state)
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

async fn not_found() -> AppError {
    AppError::NotFound("Not Found".to_string())
}

/// Any origin when none is configured, otherwise the configured list
fn cors_layer(origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    if origins.is_empty() {
        return layer.allow_origin(Any);
    }

    let mut allowed = Vec::with_capacity(origins.len());
    for origin in origins {
        match origin.parse::<HeaderValue>() {
            Ok(v) => allowed.push(v),
            Err(e) => tracing::error!("Failed to parse CORS origin '{}': {}", origin, e),
        }
    }
    layer.allow_origin(allowed)
}

/// Bind `host:port` from the configuration and serve until the process stops
pub async fn serve(db: DatabaseConnection, config: &Config) -> std::io::Result<()> {
    let app = build_router(AppState::new(db), config);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Local library listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await
}
