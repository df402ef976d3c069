//! Enrollment and lesson progress
//!
//! Enrollments are created exactly once per (user, course) at settlement
//! time. Watch marks are written only through [`ProgressTracker`]; no other
//! component mutates these tables.

pub mod error;
pub mod models;
pub mod progress;
pub mod store;
pub mod summary;

pub use error::ProgressError;
pub use models::{Enrollment, WatchMark};
pub use progress::{ProgressTracker, ResumePoint};
pub use store::EnrollmentStore;
