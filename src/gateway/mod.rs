//! HTTP adapter: router assembly and the serve loop.

pub mod handlers;
pub mod openapi;
pub mod state;
pub mod types;

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, patch, post},
};
use tokio::net::TcpListener;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::config::GatewayConfig;

use openapi::ApiDoc;
use state::AppState;

/// Assemble the gateway router.
///
/// Shared with the tests so handler wiring and the serve loop stay in sync.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/v1/health", get(handlers::health_check))
        .route(
            "/api/v1/deposits",
            post(handlers::create_deposit).get(handlers::get_all_deposits),
        )
        .route(
            "/api/v1/deposits/{id}",
            get(handlers::get_deposit_by_id).delete(handlers::delete_deposit),
        )
        .route(
            "/api/v1/deposits/{id}/status",
            patch(handlers::update_deposit_status),
        )
        .route(
            "/api/v1/deposits/account/{account_number}",
            get(handlers::get_deposits_by_account),
        )
        .route(
            "/api/v1/deposits/account/{account_number}/count",
            get(handlers::count_account_deposits),
        )
        .route(
            "/api/v1/deposits/status/{status}",
            get(handlers::get_deposits_by_status),
        )
        .with_state(state)
        // Swagger UI is stateless; merged after with_state
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
}

/// Bind and serve until the process exits.
pub async fn serve(config: &GatewayConfig, state: Arc<AppState>) -> anyhow::Result<()> {
    let addr = format!("{}:{}", config.host, config.port);
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!("Gateway listening on {}", addr);

    axum::serve(listener, build_router(state)).await?;
    Ok(())
}
