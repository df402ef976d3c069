//! Enrollment data models

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

/// Ownership record: one row per (user, course), never deleted by normal flow
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Enrollment {
    pub enrollment_id: i64,
    pub user_id: i64,
    pub course_id: i64,
    pub created_at: DateTime<Utc>,
}

/// Per-lesson watch state, one row per (enrollment, lesson).
///
/// Concurrent updates resolve last-timestamp-wins; this is progress data,
/// not financial data.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct WatchMark {
    pub enrollment_id: i64,
    pub lesson_id: Uuid,
    pub watched_seconds: i32,
    pub completed: bool,
    pub updated_at: DateTime<Utc>,
}

/// Per-course completion summary row for the student dashboard
#[derive(Debug, Clone, Serialize, ToSchema, sqlx::FromRow)]
pub struct CourseProgress {
    pub course_id: i64,
    pub title: String,
    pub total_lessons: i64,
    pub completed_lessons: i64,
}

impl CourseProgress {
    /// Completion percentage, 0.0 for a course with no lessons
    pub fn percent(&self) -> f64 {
        if self.total_lessons == 0 {
            0.0
        } else {
            (self.completed_lessons as f64 / self.total_lessons as f64) * 100.0
        }
    }
}
