//! Progress Tracker
//!
//! Computes the next unwatched lesson and records watch events. The ordered
//! walk is a pure function over (lesson sequence, watch marks) so arbitrary
//! watch-event ordering and course structure stay easy to reason about.

use std::collections::HashMap;

use sqlx::PgPool;
use tracing::{debug, info};
use uuid::Uuid;

use super::error::ProgressError;
use super::models::WatchMark;
use super::store::EnrollmentStore;
use super::summary;
use crate::catalog::{CourseCatalog, Lesson};

/// Where playback should resume for one (user, course) pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResumePoint {
    /// First lesson, by sequence order, with no complete watch mark
    Lesson(Uuid),
    /// Every lesson is complete; carries the last lesson's id
    Completed(Uuid),
    /// The course has no lessons at all
    NoLessons,
}

impl ResumePoint {
    pub fn lesson_id(&self) -> Option<Uuid> {
        match self {
            ResumePoint::Lesson(id) | ResumePoint::Completed(id) => Some(*id),
            ResumePoint::NoLessons => None,
        }
    }

    pub fn course_completed(&self) -> bool {
        matches!(self, ResumePoint::Completed(_))
    }
}

/// Walk the ordered sequence and return the first lesson with no mark or an
/// incomplete mark. Sequence order decides, never event recency.
pub fn next_unwatched(sequence: &[Lesson], marks: &HashMap<Uuid, WatchMark>) -> ResumePoint {
    for lesson in sequence {
        let complete = marks
            .get(&lesson.lesson_id)
            .map(|m| m.completed)
            .unwrap_or(false);
        if !complete {
            return ResumePoint::Lesson(lesson.lesson_id);
        }
    }
    match sequence.last() {
        Some(last) => ResumePoint::Completed(last.lesson_id),
        None => ResumePoint::NoLessons,
    }
}

/// Lesson-progress state machine over EnrollmentStore + the catalog
pub struct ProgressTracker {
    pool: PgPool,
}

impl ProgressTracker {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Where should this user resume the course?
    ///
    /// Fails with [`ProgressError::NotEnrolled`] if no enrollment exists.
    pub async fn resume_point(
        &self,
        user_id: i64,
        course_id: i64,
    ) -> Result<ResumePoint, ProgressError> {
        let enrollment =
            EnrollmentStore::get_by_user_and_course(&self.pool, user_id, course_id)
                .await?
                .ok_or(ProgressError::NotEnrolled)?;

        let sequence = CourseCatalog::get_lesson_sequence(&self.pool, course_id).await?;
        let marks = EnrollmentStore::watch_marks(&self.pool, enrollment.enrollment_id).await?;

        let resume = next_unwatched(&sequence, &marks);
        debug!(
            user_id = user_id,
            course_id = course_id,
            resume = ?resume,
            "Resolved resume point"
        );
        Ok(resume)
    }

    /// Record a watch event and return the next lesson to play.
    ///
    /// Fails with [`ProgressError::Forbidden`] when the user does not own the
    /// course and [`ProgressError::InvalidLesson`] when the lesson is not part
    /// of it. Replaying the same event is idempotent beyond the timestamp.
    pub async fn record_watch(
        &self,
        user_id: i64,
        course_id: i64,
        lesson_id: Uuid,
        watched_seconds: i32,
        completed: bool,
    ) -> Result<ResumePoint, ProgressError> {
        let enrollment =
            EnrollmentStore::get_by_user_and_course(&self.pool, user_id, course_id)
                .await?
                .ok_or(ProgressError::Forbidden)?;

        let sequence = CourseCatalog::get_lesson_sequence(&self.pool, course_id).await?;
        if !sequence.iter().any(|l| l.lesson_id == lesson_id) {
            return Err(ProgressError::InvalidLesson(lesson_id.to_string()));
        }

        EnrollmentStore::upsert_watch_mark(
            &self.pool,
            enrollment.enrollment_id,
            lesson_id,
            watched_seconds,
            completed,
        )
        .await?;

        // The summary view must never show stale completion state
        summary::invalidate_progress_summary(user_id).await;

        let marks = EnrollmentStore::watch_marks(&self.pool, enrollment.enrollment_id).await?;
        let next = next_unwatched(&sequence, &marks);

        info!(
            user_id = user_id,
            course_id = course_id,
            lesson_id = %lesson_id,
            completed = completed,
            next = ?next,
            "Watch event recorded"
        );
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn lesson(course_id: i64, position: i32) -> Lesson {
        Lesson {
            lesson_id: Uuid::new_v4(),
            course_id,
            title: format!("Lesson {}", position),
            position,
        }
    }

    fn mark(enrollment_id: i64, lesson_id: Uuid, completed: bool) -> WatchMark {
        WatchMark {
            enrollment_id,
            lesson_id,
            watched_seconds: 60,
            completed,
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_first_incomplete_by_sequence() {
        let lessons = vec![lesson(10, 1), lesson(10, 2), lesson(10, 3)];
        let mut marks = HashMap::new();
        marks.insert(
            lessons[0].lesson_id,
            mark(1, lessons[0].lesson_id, true),
        );

        // L1 complete -> resume at L2
        assert_eq!(
            next_unwatched(&lessons, &marks),
            ResumePoint::Lesson(lessons[1].lesson_id)
        );
    }

    #[test]
    fn test_all_complete_returns_last_lesson() {
        let lessons = vec![lesson(10, 1), lesson(10, 2), lesson(10, 3)];
        let marks: HashMap<Uuid, WatchMark> = lessons
            .iter()
            .map(|l| (l.lesson_id, mark(1, l.lesson_id, true)))
            .collect();

        assert_eq!(
            next_unwatched(&lessons, &marks),
            ResumePoint::Completed(lessons[2].lesson_id)
        );
        assert!(next_unwatched(&lessons, &marks).course_completed());
    }

    #[test]
    fn test_zero_lessons_is_a_sentinel_not_an_error() {
        let marks = HashMap::new();
        assert_eq!(next_unwatched(&[], &marks), ResumePoint::NoLessons);
        assert_eq!(next_unwatched(&[], &marks).lesson_id(), None);
    }

    #[test]
    fn test_out_of_order_watching_does_not_skip_ahead() {
        // Watching lesson 5 before lesson 1 still resumes at lesson 1
        let lessons: Vec<Lesson> = (1..=5).map(|p| lesson(10, p)).collect();
        let mut marks = HashMap::new();
        marks.insert(
            lessons[4].lesson_id,
            mark(1, lessons[4].lesson_id, true),
        );

        assert_eq!(
            next_unwatched(&lessons, &marks),
            ResumePoint::Lesson(lessons[0].lesson_id)
        );
    }

    #[test]
    fn test_incomplete_mark_counts_as_unwatched() {
        let lessons = vec![lesson(10, 1), lesson(10, 2)];
        let mut marks = HashMap::new();
        marks.insert(
            lessons[0].lesson_id,
            mark(1, lessons[0].lesson_id, false),
        );

        assert_eq!(
            next_unwatched(&lessons, &marks),
            ResumePoint::Lesson(lessons[0].lesson_id)
        );
    }
}
