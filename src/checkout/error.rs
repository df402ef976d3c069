//! Checkout Error Types
//!
//! The taxonomy separates outcomes a caller must treat differently:
//! declined (no local rows), ambiguous (safe to retry with a fresh nonce),
//! and reconciliation-required (funds captured, local commit failed).

use thiserror::Error;

/// Errors from the settlement pipeline
#[derive(Error, Debug, Clone)]
pub enum CheckoutError {
    // === Validation Errors (fail fast, no side effects) ===
    #[error("Cart is empty")]
    EmptyCart,

    #[error("Total amount must be greater than zero")]
    InvalidAmount,

    #[error("Submitted total {submitted} does not match catalog total {expected}")]
    AmountMismatch { expected: String, submitted: String },

    // === Gateway Outcomes ===
    #[error("Payment declined: {reason}")]
    PaymentDeclined {
        reason: String,
        error_codes: Vec<String>,
    },

    #[error("Payment outcome unknown: {0}")]
    PaymentAmbiguous(String),

    // === Post-capture failure ===
    #[error("Payment {transaction_id} captured but enrollment not recorded: {detail}")]
    ReconciliationRequired {
        transaction_id: String,
        detail: String,
    },

    // === System Errors ===
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Payment gateway unavailable: {0}")]
    GatewayUnavailable(String),
}

impl CheckoutError {
    /// Get the error code for API responses
    pub fn code(&self) -> &'static str {
        match self {
            CheckoutError::EmptyCart => "EMPTY_CART",
            CheckoutError::InvalidAmount => "INVALID_AMOUNT",
            CheckoutError::AmountMismatch { .. } => "AMOUNT_MISMATCH",
            CheckoutError::PaymentDeclined { .. } => "PAYMENT_DECLINED",
            CheckoutError::PaymentAmbiguous(_) => "PAYMENT_AMBIGUOUS",
            CheckoutError::ReconciliationRequired { .. } => "RECONCILIATION_REQUIRED",
            CheckoutError::DatabaseError(_) => "DATABASE_ERROR",
            CheckoutError::GatewayUnavailable(_) => "GATEWAY_UNAVAILABLE",
        }
    }

    /// Get HTTP status code suggestion
    pub fn http_status(&self) -> u16 {
        match self {
            CheckoutError::EmptyCart
            | CheckoutError::InvalidAmount
            | CheckoutError::AmountMismatch { .. } => 400,
            CheckoutError::PaymentDeclined { .. } => 422,
            // Retryable: the caller should re-submit with a fresh nonce
            CheckoutError::PaymentAmbiguous(_) => 503,
            // Accepted: the purchase is captured and will complete async
            CheckoutError::ReconciliationRequired { .. } => 202,
            CheckoutError::DatabaseError(_) => 500,
            CheckoutError::GatewayUnavailable(_) => 503,
        }
    }

    /// What the buyer sees.
    ///
    /// ReconciliationRequired must not read as a failed charge - the charge
    /// succeeded and an async path finishes the enrollment.
    pub fn user_message(&self) -> String {
        match self {
            CheckoutError::ReconciliationRequired { .. } => {
                "We're completing your purchase. Your courses will appear shortly.".to_string()
            }
            other => other.to_string(),
        }
    }

    /// True when funds were captured despite the error
    pub fn funds_captured(&self) -> bool {
        matches!(self, CheckoutError::ReconciliationRequired { .. })
    }
}

impl From<sqlx::Error> for CheckoutError {
    fn from(e: sqlx::Error) -> Self {
        CheckoutError::DatabaseError(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(CheckoutError::EmptyCart.code(), "EMPTY_CART");
        assert_eq!(
            CheckoutError::PaymentDeclined {
                reason: "insufficient funds".into(),
                error_codes: vec!["2001".into()],
            }
            .code(),
            "PAYMENT_DECLINED"
        );
    }

    #[test]
    fn test_http_status() {
        assert_eq!(CheckoutError::EmptyCart.http_status(), 400);
        assert_eq!(
            CheckoutError::PaymentAmbiguous("timeout".into()).http_status(),
            503
        );
        assert_eq!(
            CheckoutError::ReconciliationRequired {
                transaction_id: "tx-abc".into(),
                detail: "commit failed".into(),
            }
            .http_status(),
            202
        );
    }

    #[test]
    fn test_reconciliation_user_message_hides_the_failure() {
        let err = CheckoutError::ReconciliationRequired {
            transaction_id: "tx-abc".into(),
            detail: "deadlock".into(),
        };
        assert!(err.funds_captured());
        assert!(!err.user_message().contains("failed"));
        assert!(!err.user_message().contains("tx-abc"));
    }
}
