//! Payment Gateway port
//!
//! The gateway authorizes and captures funds and hands back a transaction
//! id or a structured decline. Protocol details stay behind this trait;
//! the coordinator only sees [`GatewayOutcome`].

use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::error::CheckoutError;
use crate::config::PaymentConfig;

/// Result of one authorize-and-capture attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GatewayOutcome {
    /// Funds captured; `transaction_id` is the idempotency key
    Approved { transaction_id: String },
    /// Gateway rejected the charge; nothing was captured
    Declined {
        reason: String,
        error_codes: Vec<String>,
    },
    /// Network/timeout outcome. If a transaction id surfaced, the charge
    /// went through; without one the caller must retry with a fresh nonce.
    Ambiguous {
        transaction_id: Option<String>,
        detail: String,
    },
}

/// External payment processor seam.
///
/// Implementations must call the processor at most once per invocation;
/// retry policy belongs to the caller, never here.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    fn name(&self) -> &'static str;

    /// Authorize and capture in one step. Never invoked inside a database
    /// transaction scope.
    async fn authorize_and_capture(
        &self,
        amount: Decimal,
        nonce: &str,
        billing_descriptor: &str,
    ) -> GatewayOutcome;

    /// Short-lived token for the browser drop-in UI
    async fn client_token(&self) -> Result<String, CheckoutError>;
}

// ============================================================================
// REST adapter
// ============================================================================

#[derive(Debug, Serialize)]
struct ChargeRequest<'a> {
    merchant_id: &'a str,
    amount: String,
    payment_method_nonce: &'a str,
    billing_descriptor: &'a str,
    submit_for_settlement: bool,
}

#[derive(Debug, Deserialize)]
struct ChargeResponse {
    status: String,
    #[serde(default)]
    transaction_id: Option<String>,
    #[serde(default)]
    reason: Option<String>,
    #[serde(default)]
    error_codes: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    client_token: String,
}

/// HTTP adapter for a hosted payment gateway
pub struct RestGateway {
    client: reqwest::Client,
    config: PaymentConfig,
}

impl RestGateway {
    pub fn new(config: PaymentConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .expect("reqwest client construction cannot fail with static options");
        Self { client, config }
    }
}

#[async_trait]
impl PaymentGateway for RestGateway {
    fn name(&self) -> &'static str {
        "rest"
    }

    async fn authorize_and_capture(
        &self,
        amount: Decimal,
        nonce: &str,
        billing_descriptor: &str,
    ) -> GatewayOutcome {
        let url = format!("{}/v1/transactions", self.config.endpoint);
        let body = ChargeRequest {
            merchant_id: &self.config.merchant_id,
            amount: amount.to_string(),
            payment_method_nonce: nonce,
            billing_descriptor,
            submit_for_settlement: true,
        };

        let response = match self.client.post(&url).json(&body).send().await {
            Ok(r) => r,
            Err(e) => {
                // Timeout or connection failure: we cannot know whether the
                // charge landed, and we must not re-authorize blindly.
                warn!(error = %e, "Gateway call failed without a response");
                return GatewayOutcome::Ambiguous {
                    transaction_id: None,
                    detail: e.to_string(),
                };
            }
        };

        let parsed: ChargeResponse = match response.json().await {
            Ok(p) => p,
            Err(e) => {
                warn!(error = %e, "Gateway response unparseable");
                return GatewayOutcome::Ambiguous {
                    transaction_id: None,
                    detail: format!("unparseable gateway response: {}", e),
                };
            }
        };

        match (parsed.status.as_str(), parsed.transaction_id) {
            ("approved", Some(transaction_id)) => GatewayOutcome::Approved { transaction_id },
            ("declined", _) => GatewayOutcome::Declined {
                reason: parsed
                    .reason
                    .unwrap_or_else(|| "declined by processor".to_string()),
                error_codes: parsed.error_codes,
            },
            // Timed out on the processor side but a transaction reference
            // exists: the charge is real.
            (_, Some(transaction_id)) => GatewayOutcome::Ambiguous {
                transaction_id: Some(transaction_id),
                detail: format!("gateway status '{}'", parsed.status),
            },
            (_, None) => GatewayOutcome::Ambiguous {
                transaction_id: None,
                detail: format!("gateway status '{}' with no transaction id", parsed.status),
            },
        }
    }

    async fn client_token(&self) -> Result<String, CheckoutError> {
        let url = format!("{}/v1/client_token", self.config.endpoint);
        let response = self
            .client
            .post(&url)
            .json(&serde_json::json!({ "merchant_id": self.config.merchant_id }))
            .send()
            .await
            .map_err(|e| CheckoutError::GatewayUnavailable(e.to_string()))?;

        let parsed: TokenResponse = response
            .json()
            .await
            .map_err(|e| CheckoutError::GatewayUnavailable(e.to_string()))?;
        Ok(parsed.client_token)
    }
}

// ============================================================================
// Mock gateway
// ============================================================================

// [SECURITY] Only compiled with the 'mock-gateway' feature. Production
// builds MUST use `--no-default-features` to exclude this.
#[cfg(any(test, feature = "mock-gateway"))]
mod mock {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Scripted behavior for [`MockGateway`]
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum MockMode {
        Approve,
        Decline,
        /// Timeout, but the charge landed and a transaction id exists
        AmbiguousWithId,
        /// Timeout with no transaction reference at all
        AmbiguousNoId,
    }

    /// In-process gateway stub with a call counter, for dev and tests
    pub struct MockGateway {
        mode: MockMode,
        transaction_id: String,
        calls: AtomicUsize,
    }

    impl MockGateway {
        pub fn new(mode: MockMode, transaction_id: impl Into<String>) -> Self {
            Self {
                mode,
                transaction_id: transaction_id.into(),
                calls: AtomicUsize::new(0),
            }
        }

        pub fn approving(transaction_id: impl Into<String>) -> Self {
            Self::new(MockMode::Approve, transaction_id)
        }

        /// How many charges were attempted against this stub
        pub fn charge_attempts(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl PaymentGateway for MockGateway {
        fn name(&self) -> &'static str {
            "mock"
        }

        async fn authorize_and_capture(
            &self,
            _amount: Decimal,
            _nonce: &str,
            _billing_descriptor: &str,
        ) -> GatewayOutcome {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match self.mode {
                MockMode::Approve => GatewayOutcome::Approved {
                    transaction_id: self.transaction_id.clone(),
                },
                MockMode::Decline => GatewayOutcome::Declined {
                    reason: "insufficient funds".to_string(),
                    error_codes: vec!["2001".to_string()],
                },
                MockMode::AmbiguousWithId => GatewayOutcome::Ambiguous {
                    transaction_id: Some(self.transaction_id.clone()),
                    detail: "simulated timeout after capture".to_string(),
                },
                MockMode::AmbiguousNoId => GatewayOutcome::Ambiguous {
                    transaction_id: None,
                    detail: "simulated network failure".to_string(),
                },
            }
        }

        async fn client_token(&self) -> Result<String, CheckoutError> {
            Ok("mock-client-token".to_string())
        }
    }
}

#[cfg(any(test, feature = "mock-gateway"))]
pub use mock::{MockGateway, MockMode};

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[tokio::test]
    async fn test_mock_approve_counts_one_charge() {
        let gw = MockGateway::approving("tx-abc");
        let outcome = gw.authorize_and_capture(dec!(49.99), "nonce-1", "TEST").await;
        assert_eq!(
            outcome,
            GatewayOutcome::Approved {
                transaction_id: "tx-abc".to_string()
            }
        );
        assert_eq!(gw.charge_attempts(), 1);
    }

    #[tokio::test]
    async fn test_mock_decline_carries_reason_codes() {
        let gw = MockGateway::new(MockMode::Decline, "unused");
        match gw.authorize_and_capture(dec!(10.00), "n", "TEST").await {
            GatewayOutcome::Declined { reason, error_codes } => {
                assert_eq!(reason, "insufficient funds");
                assert_eq!(error_codes, vec!["2001".to_string()]);
            }
            other => panic!("expected decline, got {:?}", other),
        }
    }
}
