//! LearnHub server entry point
//!
//! Config -> logging -> PostgreSQL -> payment gateway -> HTTP server.

use std::sync::Arc;

use learnhub::api::{self, state::AppState};
use learnhub::checkout::{CheckoutService, PaymentGateway, RestGateway};
use learnhub::config::AppConfig;
use learnhub::db::Database;
use learnhub::enrollment::ProgressTracker;

fn get_env() -> String {
    let args: Vec<String> = std::env::args().collect();
    for i in 0..args.len() {
        if (args[i] == "--env" || args[i] == "-e") && i + 1 < args.len() {
            return args[i + 1].clone();
        }
    }
    "dev".to_string()
}

/// Get port override from command line (--port argument)
fn get_port_override() -> Option<u16> {
    let args: Vec<String> = std::env::args().collect();
    for i in 0..args.len() {
        if args[i] == "--port" && i + 1 < args.len() {
            return args[i + 1].parse().ok();
        }
    }
    None
}

fn build_gateway(config: &AppConfig) -> Arc<dyn PaymentGateway> {
    // [SECURITY] The mock gateway approves everything. Production builds
    // must be compiled with `--no-default-features`.
    #[cfg(feature = "mock-gateway")]
    {
        if config.payment.endpoint == "mock" {
            tracing::warn!("Using in-process MOCK payment gateway - dev/test only");
            return Arc::new(learnhub::checkout::MockGateway::approving("tx-mock"));
        }
    }
    Arc::new(RestGateway::new(config.payment.clone()))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let env = get_env();
    let config = AppConfig::load(&env);
    let _log_guard = learnhub::logging::init_logging(&config);

    tracing::info!("Starting LearnHub in {} mode", env);

    let db = Database::connect(&config.postgres_url).await?;
    db.health_check().await?;

    let gateway = build_gateway(&config);
    tracing::info!(gateway = gateway.name(), "Payment gateway configured");

    let checkout = CheckoutService::new(
        db.pool().clone(),
        gateway,
        config.payment.billing_descriptor.clone(),
    );
    let progress = ProgressTracker::new(db.pool().clone());

    let state = AppState::new(db.pool().clone(), checkout, progress, &config);

    let port = get_port_override().unwrap_or(config.server.port);
    api::serve(state, &config.server.host, port).await
}
