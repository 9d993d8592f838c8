//! Aggregation queries behind attendance reports.

use attendance_core::attendance::{CATEGORY_FREE, STATUS_PRESENT};
use attendance_core::types::DbId;
use sqlx::PgPool;

use crate::models::report::AttendanceTallyRow;

/// Read-only attendance aggregation.
pub struct ReportRepo;

impl ReportRepo {
    /// Per-student, per-course tallies for a section.
    ///
    /// `total` counts the non-free sessions held for each course actually
    /// taught to the section; `attended` counts the student's present
    /// records among them. Every student of the section gets a row for every
    /// course held, so students never marked present still appear.
    pub async fn tallies(
        pool: &PgPool,
        section_id: DbId,
        course_code: Option<&str>,
    ) -> Result<Vec<AttendanceTallyRow>, sqlx::Error> {
        sqlx::query_as::<_, AttendanceTallyRow>(
            "WITH held AS (
                SELECT sess.id, sess.actual_course_code
                FROM attendance_sessions sess
                JOIN timetable t ON t.id = sess.timetable_id
                WHERE t.section_id = $1
                  AND sess.session_category <> $3
                  AND ($2::text IS NULL OR sess.actual_course_code = $2)
             ),
             totals AS (
                SELECT actual_course_code, COUNT(*) AS total
                FROM held
                GROUP BY actual_course_code
             )
             SELECT s.roll_number, s.full_name, tot.actual_course_code AS subject, tot.total,
                    COUNT(r.id) FILTER (WHERE r.status = $4) AS attended
             FROM students s
             CROSS JOIN totals tot
             LEFT JOIN held h ON h.actual_course_code = tot.actual_course_code
             LEFT JOIN attendance_records r ON r.session_id = h.id AND r.student_id = s.id
             WHERE s.section_id = $1
             GROUP BY s.roll_number, s.full_name, tot.actual_course_code, tot.total
             ORDER BY s.roll_number, tot.actual_course_code",
        )
        .bind(section_id)
        .bind(course_code)
        .bind(CATEGORY_FREE)
        .bind(STATUS_PRESENT)
        .fetch_all(pool)
        .await
    }
}
