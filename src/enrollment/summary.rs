//! TTL-based cache for the student progress summary
//!
//! Uses the `cached` crate for automatic TTL expiration, keyed by user id.
//! `record_watch` invalidates the entry synchronously so the dashboard never
//! shows stale completion state after a watch event.

use cached::proc_macro::cached;
use cached::Cached;
use sqlx::PgPool;
use std::sync::Arc;

use super::models::CourseProgress;
use super::store::EnrollmentStore;

/// TTL for the summary cache in seconds
pub const TTL_SECONDS: u64 = 30;

/// Rows shown on the compact dashboard summary
pub const SUMMARY_LIMIT: i64 = 3;

/// Load a user's most recent course progress rows with caching.
///
/// Results are cached for TTL_SECONDS per user; a watch event evicts the
/// entry immediately via [`invalidate_progress_summary`].
#[cached(
    time = 30,
    key = "i64",
    convert = r#"{ user_id }"#,
    result = true
)]
pub async fn load_progress_summary_cached(
    pool: Arc<PgPool>,
    user_id: i64,
) -> Result<Vec<CourseProgress>, String> {
    tracing::debug!(user_id = user_id, "[cache] Loading progress summary from database");
    EnrollmentStore::progress_rows(&pool, user_id, SUMMARY_LIMIT, 0)
        .await
        .map_err(|e| format!("Failed to load progress summary: {}", e))
}

/// Drop the cached summary for one user
pub async fn invalidate_progress_summary(user_id: i64) {
    LOAD_PROGRESS_SUMMARY_CACHED
        .lock()
        .await
        .cache_remove(&user_id);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ttl_constant() {
        assert_eq!(TTL_SECONDS, 30);
    }

    #[tokio::test]
    async fn test_invalidate_unknown_user_is_noop() {
        // Removing a key that was never cached must not panic
        invalidate_progress_summary(424242).await;
    }
}
