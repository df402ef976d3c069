//! Settlement Database Layer
//!
//! The atomic local commit: Sale + OrderItems + Enrollments + cart clear in
//! one transaction. The commit boundary is syntactically visible here -
//! every early return before `tx.commit()` rolls back via the transaction's
//! drop guard.

use sqlx::PgPool;
use tracing::info;

use crate::catalog::Course;

/// Row counts from one settlement commit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SettlementRows {
    pub sale_id: i64,
    pub order_items: u64,
    /// Enrollments actually created; courses the user already owned are
    /// skipped by the (user_id, course_id) conflict target
    pub enrollments_created: u64,
    pub cart_rows_cleared: u64,
}

pub struct SettlementDb;

impl SettlementDb {
    /// Commit one settlement atomically.
    ///
    /// Idempotent on `transaction_id`: replaying the same captured payment
    /// reuses the existing Sale and the conflict targets keep OrderItems and
    /// Enrollments single. Safe for the operator replay path after a
    /// reconciliation-required failure.
    pub async fn commit_settlement(
        pool: &PgPool,
        transaction_id: &str,
        user_id: i64,
        courses: &[Course],
        total_amount: rust_decimal::Decimal,
        payment_method: &str,
    ) -> Result<SettlementRows, sqlx::Error> {
        let mut tx = pool.begin().await?;

        // Sale first; ON CONFLICT makes settlement replays reuse the row
        let inserted: Option<i64> = sqlx::query_scalar(
            r#"INSERT INTO sales (transaction_id, user_id, total_amount, payment_method, created_at)
               VALUES ($1, $2, $3, $4, NOW())
               ON CONFLICT (transaction_id) DO NOTHING
               RETURNING sale_id"#,
        )
        .bind(transaction_id)
        .bind(user_id)
        .bind(total_amount)
        .bind(payment_method)
        .fetch_optional(&mut *tx)
        .await?;

        let sale_id = match inserted {
            Some(id) => id,
            None => {
                sqlx::query_scalar::<_, i64>(
                    "SELECT sale_id FROM sales WHERE transaction_id = $1",
                )
                .bind(transaction_id)
                .fetch_one(&mut *tx)
                .await?
            }
        };

        let mut order_items = 0u64;
        let mut enrollments_created = 0u64;

        for course in courses {
            let result = sqlx::query(
                r#"INSERT INTO order_items (sale_id, course_id, price_at_purchase)
                   VALUES ($1, $2, $3)
                   ON CONFLICT (sale_id, course_id) DO NOTHING"#,
            )
            .bind(sale_id)
            .bind(course.course_id)
            .bind(course.price)
            .execute(&mut *tx)
            .await?;
            order_items += result.rows_affected();

            // Already-enrolled courses are a no-op, not an error
            let result = sqlx::query(
                r#"INSERT INTO enrollments (user_id, course_id, created_at)
                   VALUES ($1, $2, NOW())
                   ON CONFLICT (user_id, course_id) DO NOTHING"#,
            )
            .bind(user_id)
            .bind(course.course_id)
            .execute(&mut *tx)
            .await?;
            enrollments_created += result.rows_affected();
        }

        // Clear only the purchased items; anything added mid-checkout stays
        let course_ids: Vec<i64> = courses.iter().map(|c| c.course_id).collect();
        let result = sqlx::query(
            "DELETE FROM cart_items WHERE user_id = $1 AND course_id = ANY($2)",
        )
        .bind(user_id)
        .bind(&course_ids)
        .execute(&mut *tx)
        .await?;
        let cart_rows_cleared = result.rows_affected();

        tx.commit().await?;

        info!(
            transaction_id = %transaction_id,
            user_id = user_id,
            sale_id = sale_id,
            order_items = order_items,
            enrollments_created = enrollments_created,
            "Settlement committed"
        );

        Ok(SettlementRows {
            sale_id,
            order_items,
            enrollments_created,
            cart_rows_cleared,
        })
    }
}
