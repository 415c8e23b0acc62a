// Server module - Router assembly and the blocking serve loop used by main.rs

use axum::{http::HeaderValue, Router};
use sea_orm::DatabaseConnection;
use std::net::SocketAddr;
use tower::ServiceBuilder;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api;
use crate::api_docs::ApiDoc;
use crate::infrastructure::config::Config;
use crate::infrastructure::AppState;

/// Build the full application router: Swagger UI plus everything under `/api`
pub fn build_router(state: AppState, cors_allowed_origins: &[String]) -> Router {
    let api_router = api::api_router(state);

    Router::new()
        .merge(SwaggerUi::new("/api/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .nest("/api", api_router)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors_layer(cors_allowed_origins)),
        )
}

/// Any origin when none are configured, otherwise exactly the listed ones
fn cors_layer(origins: &[String]) -> CorsLayer {
    let allow_origin = if origins.is_empty() {
        AllowOrigin::from(Any)
    } else {
        let mut parsed = Vec::new();
        for origin in origins {
            match origin.parse::<HeaderValue>() {
                Ok(v) => parsed.push(v),
                Err(e) => tracing::error!("Failed to parse CORS origin '{}': {}", origin, e),
            }
        }
        AllowOrigin::list(parsed)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods(Any)
        .allow_headers(Any)
}

/// Serve until Ctrl-C
pub async fn serve(config: &Config, db: DatabaseConnection) -> std::io::Result<()> {
    let app = build_router(AppState::new(db), &config.cors_allowed_origins);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!("☕ Coffee app listening on {}", addr);
    tracing::info!("📚 Swagger UI available at http://{}/api/docs", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to install Ctrl-C handler: {}", e);
        return;
    }
    tracing::info!("Shutdown signal received, draining connections");
}
