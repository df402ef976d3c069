//! Catalog data models

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

/// A sellable course
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Course {
    pub course_id: i64,
    pub title: String,
    pub price: Decimal,
    /// 1 = published, 0 = retired
    pub status: i16,
    pub created_at: DateTime<Utc>,
}

impl Course {
    pub fn is_published(&self) -> bool {
        self.status == 1
    }
}

/// A lesson within a course
///
/// Playback order is defined by `position` alone. Creation order and
/// lesson_id ordering are meaningless.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Lesson {
    pub lesson_id: Uuid,
    pub course_id: i64,
    pub title: String,
    pub position: i32,
}
