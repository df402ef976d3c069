//! Progress Error Types

use thiserror::Error;

/// Errors from enrollment/progress operations
#[derive(Error, Debug, Clone)]
pub enum ProgressError {
    #[error("User is not enrolled in this course")]
    NotEnrolled,

    #[error("User does not own this enrollment")]
    Forbidden,

    #[error("Lesson {0} does not belong to the requested course")]
    InvalidLesson(String),

    #[error("Database error: {0}")]
    DatabaseError(String),
}

impl ProgressError {
    /// Get the error code for API responses
    pub fn code(&self) -> &'static str {
        match self {
            ProgressError::NotEnrolled => "NOT_ENROLLED",
            ProgressError::Forbidden => "FORBIDDEN",
            ProgressError::InvalidLesson(_) => "INVALID_LESSON",
            ProgressError::DatabaseError(_) => "DATABASE_ERROR",
        }
    }

    /// Get HTTP status code suggestion
    pub fn http_status(&self) -> u16 {
        match self {
            ProgressError::NotEnrolled => 403,
            ProgressError::Forbidden => 403,
            ProgressError::InvalidLesson(_) => 422,
            ProgressError::DatabaseError(_) => 500,
        }
    }
}

impl From<sqlx::Error> for ProgressError {
    fn from(e: sqlx::Error) -> Self {
        ProgressError::DatabaseError(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(ProgressError::NotEnrolled.code(), "NOT_ENROLLED");
        assert_eq!(
            ProgressError::InvalidLesson("x".into()).code(),
            "INVALID_LESSON"
        );
    }

    #[test]
    fn test_http_status() {
        assert_eq!(ProgressError::NotEnrolled.http_status(), 403);
        assert_eq!(ProgressError::Forbidden.http_status(), 403);
        assert_eq!(ProgressError::InvalidLesson("x".into()).http_status(), 422);
        assert_eq!(
            ProgressError::DatabaseError("down".into()).http_status(),
            500
        );
    }
}
