//! Course catalog (read-only)
//!
//! Immutable course and lesson metadata. This module never writes;
//! enrollment and settlement only read from it.

pub mod models;
pub mod repository;

pub use models::{Course, Lesson};
pub use repository::CourseCatalog;
