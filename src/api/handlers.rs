//! API handlers

use std::sync::Arc;

use axum::{
    Extension, Json,
    extract::{Path, Query, State},
};
use validator::Validate;

use super::auth::AuthenticatedUser;
use super::state::AppState;
use super::types::{
    ApiError, ApiResponse, ApiResult, ClientTokenData, HealthData, NextLessonData, OwnershipData,
    ProgressRowData, ResumeData, WatchStatusRequest, ok,
};
use crate::checkout::types::{SettlementReceipt, SettlementRequest};
use crate::enrollment::{EnrollmentStore, summary};

/// Rows per page for the full progress listing
const PROGRESS_PAGE_SIZE: i64 = 10;

/// Offset for a zero-based page index. The page comes from the query string,
/// so the math must survive any i64 without wrapping into a negative OFFSET.
fn progress_offset(page: i64) -> i64 {
    page.max(0).saturating_mul(PROGRESS_PAGE_SIZE)
}

/// Health check
///
/// GET /api/v1/health
#[utoipa::path(
    get,
    path = "/api/v1/health",
    responses(
        (status = 200, description = "Service healthy", content_type = "application/json")
    ),
    tag = "System"
)]
pub async fn health_check(State(state): State<Arc<AppState>>) -> ApiResult<HealthData> {
    let database = match sqlx::query("SELECT 1").execute(&state.pool).await {
        Ok(_) => "up",
        Err(_) => "down",
    };
    ok(HealthData {
        status: "ok".to_string(),
        database: database.to_string(),
    })
}

/// Complete a purchase
///
/// POST /api/v1/checkout/complete
#[utoipa::path(
    post,
    path = "/api/v1/checkout/complete",
    request_body = SettlementRequest,
    responses(
        (status = 200, description = "Settlement committed", content_type = "application/json"),
        (status = 202, description = "Payment captured, enrollment completing asynchronously"),
        (status = 400, description = "Validation failure, no side effects"),
        (status = 422, description = "Payment declined, no local rows written"),
        (status = 503, description = "Gateway outcome unknown, retry with a fresh nonce")
    ),
    security(("bearer_auth" = [])),
    tag = "Checkout"
)]
pub async fn complete_purchase(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(req): Json<SettlementRequest>,
) -> ApiResult<SettlementReceipt> {
    req.validate()
        .map_err(|e| ApiError::bad_request(e.to_string()))?;

    let receipt = state.checkout.complete_purchase(user.user_id, req).await?;
    ok(receipt)
}

/// Get a client token for the gateway's browser drop-in
///
/// GET /api/v1/checkout/token
#[utoipa::path(
    get,
    path = "/api/v1/checkout/token",
    responses(
        (status = 200, description = "Client token", body = ApiResponse<ClientTokenData>),
        (status = 503, description = "Gateway unavailable")
    ),
    security(("bearer_auth" = [])),
    tag = "Checkout"
)]
pub async fn client_token(
    State(state): State<Arc<AppState>>,
    Extension(_user): Extension<AuthenticatedUser>,
) -> ApiResult<ClientTokenData> {
    let client_token = state.checkout.client_token().await?;
    ok(ClientTokenData { client_token })
}

/// Record a watch event and get the next lesson
///
/// POST /api/v1/enroll/watched
#[utoipa::path(
    post,
    path = "/api/v1/enroll/watched",
    request_body = WatchStatusRequest,
    responses(
        (status = 200, description = "Watch mark recorded", body = ApiResponse<NextLessonData>),
        (status = 403, description = "User does not own the course"),
        (status = 422, description = "Lesson does not belong to the course")
    ),
    security(("bearer_auth" = [])),
    tag = "Enrollment"
)]
pub async fn update_watch_status(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(req): Json<WatchStatusRequest>,
) -> ApiResult<NextLessonData> {
    req.validate()
        .map_err(|e| ApiError::bad_request(e.to_string()))?;

    let next = state
        .progress
        .record_watch(
            user.user_id,
            req.course_id,
            req.lesson_id,
            req.watched_seconds,
            req.completed,
        )
        .await?;
    ok(next.into())
}

/// Where to resume a course
///
/// GET /api/v1/enroll/resume/course/{course_id}
#[utoipa::path(
    get,
    path = "/api/v1/enroll/resume/course/{course_id}",
    params(("course_id" = i64, Path, description = "Course ID")),
    responses(
        (status = 200, description = "Resume pointer", body = ApiResponse<ResumeData>),
        (status = 403, description = "User is not enrolled")
    ),
    security(("bearer_auth" = [])),
    tag = "Enrollment"
)]
pub async fn resume_course(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(course_id): Path<i64>,
) -> ApiResult<ResumeData> {
    let resume = state.progress.resume_point(user.user_id, course_id).await?;
    ok(resume.into())
}

/// Does the user own this course?
///
/// GET /api/v1/enroll/status/c/{course_id}
#[utoipa::path(
    get,
    path = "/api/v1/enroll/status/c/{course_id}",
    params(("course_id" = i64, Path, description = "Course ID")),
    responses(
        (status = 200, description = "Ownership flag", body = ApiResponse<OwnershipData>)
    ),
    security(("bearer_auth" = [])),
    tag = "Enrollment"
)]
pub async fn enroll_status(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(course_id): Path<i64>,
) -> ApiResult<OwnershipData> {
    let is_owned = EnrollmentStore::exists(&state.pool, user.user_id, course_id).await?;
    ok(OwnershipData { is_owned })
}

/// Compact dashboard summary (most recent courses, cached per user)
///
/// GET /api/v1/enroll/progress/summary
#[utoipa::path(
    get,
    path = "/api/v1/enroll/progress/summary",
    responses(
        (status = 200, description = "Recent course progress", body = ApiResponse<Vec<ProgressRowData>>)
    ),
    security(("bearer_auth" = [])),
    tag = "Enrollment"
)]
pub async fn progress_summary(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthenticatedUser>,
) -> ApiResult<Vec<ProgressRowData>> {
    let rows = summary::load_progress_summary_cached(Arc::new(state.pool.clone()), user.user_id)
        .await
        .map_err(ApiError::internal)?;
    ok(rows.into_iter().map(Into::into).collect())
}

/// Paginated progress across all enrollments
///
/// GET /api/v1/enroll/mine?page=0
#[utoipa::path(
    get,
    path = "/api/v1/enroll/mine",
    params(("page" = Option<i64>, Query, description = "Zero-based page index")),
    responses(
        (status = 200, description = "Progress page", body = ApiResponse<Vec<ProgressRowData>>)
    ),
    security(("bearer_auth" = [])),
    tag = "Enrollment"
)]
pub async fn my_progress(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthenticatedUser>,
    Query(params): Query<std::collections::HashMap<String, String>>,
) -> ApiResult<Vec<ProgressRowData>> {
    let page: i64 = params
        .get("page")
        .map(|s| s.parse())
        .transpose()
        .map_err(|_| ApiError::bad_request("Invalid page parameter"))?
        .unwrap_or(0);

    let rows = EnrollmentStore::progress_rows(
        &state.pool,
        user.user_id,
        PROGRESS_PAGE_SIZE,
        progress_offset(page),
    )
    .await?;
    ok(rows.into_iter().map(Into::into).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_offset_never_negative() {
        assert_eq!(progress_offset(0), 0);
        assert_eq!(progress_offset(3), 30);
        assert_eq!(progress_offset(-5), 0);
        // A hostile page index must clamp instead of wrapping
        assert_eq!(progress_offset(i64::MAX), i64::MAX);
        assert!(progress_offset(i64::MAX / 2) > 0);
    }
}
