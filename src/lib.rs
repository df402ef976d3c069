//! LearnHub - course-selling platform backend
//!
//! The core is the purchase-settlement pipeline and the lesson-progress
//! state machine; everything else is thin glue around them.
//!
//! # Modules
//!
//! - [`catalog`] - Read-only course/lesson metadata
//! - [`enrollment`] - Enrollments, watch marks, progress tracking
//! - [`checkout`] - Payment gateway seam and settlement coordination
//! - [`api`] - Axum HTTP surface
//! - [`config`] - Environment YAML configuration
//! - [`db`] - PostgreSQL pool management
//! - [`logging`] - tracing initialization

pub mod api;
pub mod catalog;
pub mod checkout;
pub mod config;
pub mod db;
pub mod enrollment;
pub mod logging;

// Convenient re-exports at crate root
pub use catalog::{Course, CourseCatalog, Lesson};
pub use checkout::{
    CheckoutError, CheckoutService, GatewayOutcome, PaymentGateway, SettlementCoordinator,
};
pub use db::Database;
pub use enrollment::{EnrollmentStore, ProgressError, ProgressTracker, ResumePoint};
