//! Checkout Service facade
//!
//! Entry point for the web layer: wraps the coordinator's result into the
//! response the storefront expects and exposes the client-token pass-through.

use std::sync::Arc;

use sqlx::PgPool;

use super::coordinator::SettlementCoordinator;
use super::error::CheckoutError;
use super::gateway::PaymentGateway;
use super::types::{SettlementReceipt, SettlementRequest};

pub struct CheckoutService {
    coordinator: SettlementCoordinator,
    gateway: Arc<dyn PaymentGateway>,
}

impl CheckoutService {
    pub fn new(
        pool: PgPool,
        gateway: Arc<dyn PaymentGateway>,
        billing_descriptor: String,
    ) -> Self {
        let coordinator =
            SettlementCoordinator::new(pool, gateway.clone(), billing_descriptor);
        Self {
            coordinator,
            gateway,
        }
    }

    /// Complete a purchase for the verified user
    pub async fn complete_purchase(
        &self,
        user_id: i64,
        req: SettlementRequest,
    ) -> Result<SettlementReceipt, CheckoutError> {
        self.coordinator.settle(user_id, req).await
    }

    /// Token for the gateway's browser drop-in
    pub async fn client_token(&self) -> Result<String, CheckoutError> {
        self.gateway.client_token().await
    }

    /// Operator/async replay path after a reconciliation-required outcome
    pub fn coordinator(&self) -> &SettlementCoordinator {
        &self.coordinator
    }
}
