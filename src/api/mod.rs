//! HTTP API layer
//!
//! Axum router, shared state, auth middleware, and handlers. Each request
//! is an independent unit of work; no mutable state is shared across
//! requests beyond the connection pool.

pub mod auth;
pub mod handlers;
pub mod openapi;
pub mod state;
pub mod types;

use std::sync::Arc;

use axum::{
    Router,
    middleware::from_fn_with_state,
    routing::{get, post},
};
use tokio::net::TcpListener;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use state::AppState;

/// Build the application router
pub fn build_router(state: Arc<AppState>) -> Router {
    let checkout_routes = Router::new()
        .route("/complete", post(handlers::complete_purchase))
        .route("/token", get(handlers::client_token));

    let enroll_routes = Router::new()
        .route("/watched", post(handlers::update_watch_status))
        .route("/resume/course/{course_id}", get(handlers::resume_course))
        .route("/status/c/{course_id}", get(handlers::enroll_status))
        .route("/progress/summary", get(handlers::progress_summary))
        .route("/mine", get(handlers::my_progress));

    Router::new()
        .route("/api/v1/health", get(handlers::health_check))
        .nest(
            "/api/v1/checkout",
            checkout_routes.layer(from_fn_with_state(state.clone(), auth::jwt_auth_middleware)),
        )
        .nest(
            "/api/v1/enroll",
            enroll_routes.layer(from_fn_with_state(state.clone(), auth::jwt_auth_middleware)),
        )
        .with_state(state)
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", openapi::ApiDoc::openapi()))
}

/// Bind and serve until shutdown
pub async fn serve(state: Arc<AppState>, host: &str, port: u16) -> anyhow::Result<()> {
    let app = build_router(state);

    let addr = format!("{}:{}", host, port);
    let listener = TcpListener::bind(&addr).await?;

    tracing::info!("Server listening on http://{}", addr);
    tracing::info!("API Docs: http://{}/docs", addr);

    axum::serve(listener, app).await?;
    Ok(())
}
