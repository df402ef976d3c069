//! Checkout and purchase settlement
//!
//! A successful external payment must deterministically translate into
//! consistent local records: one Sale, one OrderItem per purchased course,
//! one Enrollment per (user, course), and a cleared cart - all rows visible
//! together or none.

pub mod coordinator;
pub mod db;
pub mod error;
pub mod gateway;
pub mod service;
pub mod types;

pub use coordinator::SettlementCoordinator;
pub use error::CheckoutError;
pub use gateway::{GatewayOutcome, PaymentGateway, RestGateway};
pub use service::CheckoutService;
pub use types::{SettlementReceipt, SettlementRequest};

#[cfg(feature = "mock-gateway")]
pub use gateway::{MockGateway, MockMode};
