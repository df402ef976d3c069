//! Settlement request/response types

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// What the web layer submits to complete a purchase
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct SettlementRequest {
    /// Course ids in the buyer's cart
    #[validate(length(min = 1, message = "cart cannot be empty"))]
    pub courses: Vec<i64>,
    /// Client-side total; verified server-side against catalog prices
    #[schema(value_type = String, example = "49.99")]
    pub total_amount: Decimal,
    #[validate(length(min = 1, max = 32))]
    pub payment_method: String,
    /// Single-use payment method nonce from the gateway's browser SDK
    #[validate(length(min = 1))]
    pub nonce: String,
}

/// Returned once settlement committed locally
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SettlementReceipt {
    pub transaction_id: String,
    pub message: String,
}
