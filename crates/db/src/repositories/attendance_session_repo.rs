//! Repository for the `attendance_sessions` table, including the
//! transactional unit of work that records a session.

use attendance_core::attendance::{resolve_swap_target, swap_reason, SessionCategory};
use attendance_core::types::{Date, DbId};
use sqlx::PgPool;

use crate::models::attendance::{AttendanceSession, NewSession, SessionAuditRow, SessionSummary};
use crate::models::class_swap::NewClassSwap;
use crate::repositories::{AttendanceRecordRepo, ClassSwapRepo, FacultyRepo, TimetableRepo};

const COLUMNS: &str = "id, timetable_id, session_date, marked_by_user_id, session_category, \
                       actual_course_code, is_verified_by_faculty, verified_at, created_at";

/// Provides recording, verification and read access for sessions.
pub struct AttendanceSessionRepo;

impl AttendanceSessionRepo {
    /// Write a session, its records and (for swap or free sessions) one swap
    /// log entry in a single transaction.
    ///
    /// Any failure, including a second session for the same slot and date
    /// (`uq_attendance_sessions_timetable_date`) or a record referencing an
    /// unknown student, rolls back every row written by this call.
    pub async fn record(pool: &PgPool, input: &NewSession) -> Result<AttendanceSession, sqlx::Error> {
        let category = input.classification.category;
        let actual_course_code = input.classification.actual_course_code.as_deref();

        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO attendance_sessions
                (timetable_id, session_date, marked_by_user_id, session_category, actual_course_code)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        let session = sqlx::query_as::<_, AttendanceSession>(&query)
            .bind(input.timetable_id)
            .bind(input.session_date)
            .bind(input.marked_by_user_id)
            .bind(category.as_str())
            .bind(actual_course_code)
            .fetch_one(&mut *tx)
            .await?;

        if category != SessionCategory::Free {
            for record in &input.records {
                AttendanceRecordRepo::insert(&mut *tx, session.id, record).await?;
            }
        }

        if let Some(reason) = swap_reason(category, &input.scheduled_course_code, actual_course_code) {
            let target_faculty_id = match (category, actual_course_code) {
                (SessionCategory::Swap, Some(code)) => {
                    let section_faculty =
                        TimetableRepo::find_section_faculty(&mut *tx, input.section_id, code).await?;
                    let recorder_profile = match input.recorder_faculty_user_id {
                        Some(user_id) if section_faculty.is_none() => {
                            FacultyRepo::find_id_by_user(&mut *tx, user_id).await?
                        }
                        _ => None,
                    };
                    resolve_swap_target(section_faculty, recorder_profile)
                }
                _ => None,
            };

            ClassSwapRepo::insert(
                &mut *tx,
                &NewClassSwap {
                    source_timetable_id: input.timetable_id,
                    requesting_faculty_id: input.scheduled_faculty_id,
                    target_faculty_id,
                    requested_date: input.session_date,
                    reason,
                },
            )
            .await?;
        }

        tx.commit().await?;
        tracing::debug!(
            session_id = session.id,
            timetable_id = input.timetable_id,
            category = category.as_str(),
            records = input.records.len(),
            "Attendance session recorded",
        );
        Ok(session)
    }

    /// Find a session by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<AttendanceSession>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM attendance_sessions WHERE id = $1");
        sqlx::query_as::<_, AttendanceSession>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Mark a session verified.
    ///
    /// The first verification time is kept on repeat calls and the flag never
    /// reverts. Returns `None` if no row with `id` exists.
    pub async fn mark_verified(pool: &PgPool, id: DbId) -> Result<Option<AttendanceSession>, sqlx::Error> {
        let query = format!(
            "UPDATE attendance_sessions SET
                is_verified_by_faculty = true,
                verified_at = COALESCE(verified_at, NOW())
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, AttendanceSession>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Sessions recorded against a slot, newest date first.
    pub async fn list_for_timetable(
        pool: &PgPool,
        timetable_id: DbId,
    ) -> Result<Vec<SessionAuditRow>, sqlx::Error> {
        sqlx::query_as::<_, SessionAuditRow>(
            "SELECT sess.id, sess.session_date, sess.session_category,
                    sess.is_verified_by_faculty, u.email AS marked_by
             FROM attendance_sessions sess
             LEFT JOIN users u ON u.id = sess.marked_by_user_id
             WHERE sess.timetable_id = $1
             ORDER BY sess.session_date DESC",
        )
        .bind(timetable_id)
        .fetch_all(pool)
        .await
    }

    /// Sessions of a section's slots in one semester dated within
    /// `[from, to]`, with actual course names and record counts.
    pub async fn summaries_for_section(
        pool: &PgPool,
        section_id: DbId,
        semester: i32,
        from: Date,
        to: Date,
    ) -> Result<Vec<SessionSummary>, sqlx::Error> {
        sqlx::query_as::<_, SessionSummary>(
            "SELECT sess.id, sess.timetable_id, sess.session_date, sess.session_category,
                    sess.is_verified_by_faculty, sess.verified_at,
                    sess.actual_course_code, ac.course_name AS actual_course_name,
                    COUNT(r.id) FILTER (WHERE r.status = 'present') AS present_count,
                    COUNT(r.id) FILTER (WHERE r.status = 'absent') AS absent_count,
                    COUNT(r.id) AS total_count
             FROM attendance_sessions sess
             JOIN timetable t ON t.id = sess.timetable_id
             LEFT JOIN courses ac ON ac.course_code = sess.actual_course_code
             LEFT JOIN attendance_records r ON r.session_id = sess.id
             WHERE t.section_id = $1
               AND t.semester = $2
               AND sess.session_date BETWEEN $3 AND $4
             GROUP BY sess.id, ac.course_name
             ORDER BY sess.session_date, sess.timetable_id",
        )
        .bind(section_id)
        .bind(semester)
        .bind(from)
        .bind(to)
        .fetch_all(pool)
        .await
    }
}
