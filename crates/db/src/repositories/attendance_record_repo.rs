//! Repository for the `attendance_records` table.

use attendance_core::attendance::NormalizedRecord;
use attendance_core::types::DbId;
use sqlx::{PgConnection, PgPool};

use crate::models::attendance::{AttendanceRecord, RecordDetail};

const COLUMNS: &str = "id, session_id, student_id, status";

/// Provides inserts and reads for per-student attendance records.
///
/// Records are only ever written as part of recording their session.
pub struct AttendanceRecordRepo;

impl AttendanceRecordRepo {
    /// Insert one record on the caller's connection.
    pub async fn insert(
        conn: &mut PgConnection,
        session_id: DbId,
        record: &NormalizedRecord,
    ) -> Result<AttendanceRecord, sqlx::Error> {
        let query = format!(
            "INSERT INTO attendance_records (session_id, student_id, status)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, AttendanceRecord>(&query)
            .bind(session_id)
            .bind(record.student_id)
            .bind(record.status.as_str())
            .fetch_one(conn)
            .await
    }

    /// Raw records of a session, ordered by student id.
    pub async fn list_by_session(
        pool: &PgPool,
        session_id: DbId,
    ) -> Result<Vec<AttendanceRecord>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM attendance_records WHERE session_id = $1 ORDER BY student_id"
        );
        sqlx::query_as::<_, AttendanceRecord>(&query)
            .bind(session_id)
            .fetch_all(pool)
            .await
    }

    /// Records of a session with student identity, in roll-number order.
    pub async fn details_by_session(
        pool: &PgPool,
        session_id: DbId,
    ) -> Result<Vec<RecordDetail>, sqlx::Error> {
        sqlx::query_as::<_, RecordDetail>(
            "SELECT r.student_id, s.roll_number, s.full_name, r.status
             FROM attendance_records r
             JOIN students s ON s.id = r.student_id
             WHERE r.session_id = $1
             ORDER BY s.roll_number",
        )
        .bind(session_id)
        .fetch_all(pool)
        .await
    }
}
