//! API response types and error codes
//!
//! - `ApiResponse<T>`: unified response wrapper
//! - `ApiError`: handler-level error with HTTP status + numeric code
//! - request/response DTOs

use axum::{Json, http::StatusCode, response::IntoResponse};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::checkout::CheckoutError;
use crate::enrollment::{ProgressError, ResumePoint};

// ============================================================================
// Unified API Response Format
// ============================================================================

/// Unified API response wrapper
///
/// - code: 0 = success, non-zero = error code
/// - msg: short message description
/// - data: actual data (success) or null (error)
#[derive(Debug, Serialize, ToSchema)]
pub struct ApiResponse<T> {
    /// Response code: 0 for success, non-zero for errors
    #[schema(example = 0)]
    pub code: i32,
    /// Response message
    #[schema(example = "ok")]
    pub msg: String,
    /// Response data (only present when code == 0)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    /// Create success response
    pub fn success(data: T) -> Self {
        Self {
            code: 0,
            msg: "ok".to_string(),
            data: Some(data),
        }
    }

    /// Create error response
    pub fn error(code: i32, msg: impl Into<String>) -> ApiResponse<()> {
        ApiResponse {
            code,
            msg: msg.into(),
            data: None,
        }
    }
}

/// Standard API error codes
pub mod error_codes {
    // Success
    pub const SUCCESS: i32 = 0;

    // Client errors (1xxx)
    pub const INVALID_PARAMETER: i32 = 1001;
    pub const EMPTY_CART: i32 = 1002;
    pub const AMOUNT_MISMATCH: i32 = 1003;

    // Auth errors (2xxx)
    pub const MISSING_AUTH: i32 = 2001;
    pub const AUTH_FAILED: i32 = 2002;
    pub const FORBIDDEN: i32 = 2003;
    pub const NOT_ENROLLED: i32 = 2004;

    // Payment errors (3xxx)
    pub const PAYMENT_DECLINED: i32 = 3001;
    pub const PAYMENT_AMBIGUOUS: i32 = 3002;
    pub const RECONCILIATION_PENDING: i32 = 3003;

    // Resource errors (4xxx)
    pub const INVALID_LESSON: i32 = 4001;

    // Server errors (5xxx)
    pub const INTERNAL_ERROR: i32 = 5000;
    pub const SERVICE_UNAVAILABLE: i32 = 5001;
}

// ============================================================================
// ApiError
// ============================================================================

/// Handler-level error carrying HTTP status, numeric code, and message
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub code: i32,
    pub msg: String,
}

impl ApiError {
    pub fn new(status: StatusCode, code: i32, msg: impl Into<String>) -> Self {
        Self {
            status,
            code,
            msg: msg.into(),
        }
    }

    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::new(
            StatusCode::BAD_REQUEST,
            error_codes::INVALID_PARAMETER,
            msg,
        )
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            error_codes::INTERNAL_ERROR,
            msg,
        )
    }

}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let body = Json(ApiResponse::<()>::error(self.code, self.msg));
        (self.status, body).into_response()
    }
}

pub type ApiResult<T> = Result<Json<ApiResponse<T>>, ApiError>;

/// Wrap data in a success envelope
pub fn ok<T>(data: T) -> ApiResult<T> {
    Ok(Json(ApiResponse::success(data)))
}

impl From<CheckoutError> for ApiError {
    fn from(e: CheckoutError) -> Self {
        let status =
            StatusCode::from_u16(e.http_status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let code = match &e {
            CheckoutError::EmptyCart => error_codes::EMPTY_CART,
            CheckoutError::InvalidAmount => error_codes::INVALID_PARAMETER,
            CheckoutError::AmountMismatch { .. } => error_codes::AMOUNT_MISMATCH,
            CheckoutError::PaymentDeclined { .. } => error_codes::PAYMENT_DECLINED,
            CheckoutError::PaymentAmbiguous(_) => error_codes::PAYMENT_AMBIGUOUS,
            CheckoutError::ReconciliationRequired { .. } => error_codes::RECONCILIATION_PENDING,
            CheckoutError::DatabaseError(_) => error_codes::INTERNAL_ERROR,
            CheckoutError::GatewayUnavailable(_) => error_codes::SERVICE_UNAVAILABLE,
        };
        ApiError::new(status, code, e.user_message())
    }
}

impl From<ProgressError> for ApiError {
    fn from(e: ProgressError) -> Self {
        let status =
            StatusCode::from_u16(e.http_status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let code = match &e {
            ProgressError::NotEnrolled => error_codes::NOT_ENROLLED,
            ProgressError::Forbidden => error_codes::FORBIDDEN,
            ProgressError::InvalidLesson(_) => error_codes::INVALID_LESSON,
            ProgressError::DatabaseError(_) => error_codes::INTERNAL_ERROR,
        };
        ApiError::new(status, code, e.to_string())
    }
}

// ============================================================================
// Request / Response DTOs
// ============================================================================

/// Watch event reported by the playback client
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct WatchStatusRequest {
    pub course_id: i64,
    pub lesson_id: Uuid,
    #[validate(range(min = 0))]
    pub watched_seconds: i32,
    pub completed: bool,
}

/// Next-lesson pointer after a watch event
#[derive(Debug, Serialize, ToSchema)]
pub struct NextLessonData {
    /// Null only for a course with no lessons
    pub next_lesson_id: Option<Uuid>,
    pub course_completed: bool,
}

/// Resume pointer for a course
#[derive(Debug, Serialize, ToSchema)]
pub struct ResumeData {
    /// Null only for a course with no lessons
    pub lesson_id: Option<Uuid>,
    pub course_completed: bool,
}

impl From<ResumePoint> for ResumeData {
    fn from(rp: ResumePoint) -> Self {
        Self {
            lesson_id: rp.lesson_id(),
            course_completed: rp.course_completed(),
        }
    }
}

impl From<ResumePoint> for NextLessonData {
    fn from(rp: ResumePoint) -> Self {
        Self {
            next_lesson_id: rp.lesson_id(),
            course_completed: rp.course_completed(),
        }
    }
}

/// Ownership probe result
#[derive(Debug, Serialize, ToSchema)]
pub struct OwnershipData {
    pub is_owned: bool,
}

/// Gateway browser-SDK token
#[derive(Debug, Serialize, ToSchema)]
pub struct ClientTokenData {
    pub client_token: String,
}

/// One dashboard progress row
#[derive(Debug, Serialize, ToSchema)]
pub struct ProgressRowData {
    pub course_id: i64,
    pub title: String,
    pub total_lessons: i64,
    pub completed_lessons: i64,
    pub percent: f64,
}

impl From<crate::enrollment::models::CourseProgress> for ProgressRowData {
    fn from(p: crate::enrollment::models::CourseProgress) -> Self {
        let percent = p.percent();
        Self {
            course_id: p.course_id,
            title: p.title,
            total_lessons: p.total_lessons,
            completed_lessons: p.completed_lessons,
            percent,
        }
    }
}

/// Health probe result
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthData {
    pub status: String,
    pub database: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_envelope_shape() {
        let resp = ApiResponse::success(OwnershipData { is_owned: true });
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["code"], 0);
        assert_eq!(json["msg"], "ok");
        assert_eq!(json["data"]["is_owned"], true);
    }

    #[test]
    fn test_error_envelope_omits_data() {
        let resp = ApiResponse::<()>::error(error_codes::PAYMENT_DECLINED, "declined");
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["code"], error_codes::PAYMENT_DECLINED);
        assert!(json.get("data").is_none());
    }

    #[test]
    fn test_reconciliation_maps_to_accepted() {
        let api: ApiError = CheckoutError::ReconciliationRequired {
            transaction_id: "tx-abc".into(),
            detail: "commit failed".into(),
        }
        .into();
        assert_eq!(api.status, StatusCode::ACCEPTED);
        assert_eq!(api.code, error_codes::RECONCILIATION_PENDING);
        // The buyer never sees the internal failure
        assert!(api.msg.contains("completing your purchase"));
    }

    #[test]
    fn test_no_lessons_sentinel_serializes_as_null() {
        let data: ResumeData = ResumePoint::NoLessons.into();
        let json = serde_json::to_value(&data).unwrap();
        assert!(json["lesson_id"].is_null());
        assert_eq!(json["course_completed"], false);
    }
}
