//! Repository for the `class_swaps` log.

use attendance_core::attendance::SWAP_STATUS_APPROVED;
use attendance_core::types::DbId;
use sqlx::{PgConnection, PgPool};

use crate::models::class_swap::{ClassSwap, NewClassSwap};

const COLUMNS: &str = "id, source_timetable_id, requesting_faculty_id, target_faculty_id, \
                       requested_date, reason, status, created_at";

/// Provides inserts and reads for the swap log.
pub struct ClassSwapRepo;

impl ClassSwapRepo {
    /// Append an approved swap entry on the caller's connection.
    pub async fn insert(
        conn: &mut PgConnection,
        input: &NewClassSwap,
    ) -> Result<ClassSwap, sqlx::Error> {
        let query = format!(
            "INSERT INTO class_swaps
                (source_timetable_id, requesting_faculty_id, target_faculty_id,
                 requested_date, reason, status)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ClassSwap>(&query)
            .bind(input.source_timetable_id)
            .bind(input.requesting_faculty_id)
            .bind(input.target_faculty_id)
            .bind(input.requested_date)
            .bind(&input.reason)
            .bind(SWAP_STATUS_APPROVED)
            .fetch_one(conn)
            .await
    }

    /// Swap entries logged against a timetable slot, newest date first.
    pub async fn list_for_timetable(
        pool: &PgPool,
        timetable_id: DbId,
    ) -> Result<Vec<ClassSwap>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM class_swaps
             WHERE source_timetable_id = $1
             ORDER BY requested_date DESC, id DESC"
        );
        sqlx::query_as::<_, ClassSwap>(&query)
            .bind(timetable_id)
            .fetch_all(pool)
            .await
    }
}
