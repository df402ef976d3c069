use std::sync::Arc;

use sqlx::PgPool;

use crate::checkout::CheckoutService;
use crate::config::AppConfig;
use crate::enrollment::ProgressTracker;

/// Shared application state
pub struct AppState {
    pub pool: PgPool,
    pub checkout: CheckoutService,
    pub progress: ProgressTracker,
    pub jwt_secret: String,
}

impl AppState {
    pub fn new(
        pool: PgPool,
        checkout: CheckoutService,
        progress: ProgressTracker,
        config: &AppConfig,
    ) -> Arc<Self> {
        Arc::new(Self {
            pool,
            checkout,
            progress,
            jwt_secret: config.auth.jwt_secret.clone(),
        })
    }
}
