//! Repository for the `timetable` table and the schedule views built on it.

use attendance_core::types::DbId;
use sqlx::{PgConnection, PgPool};

use crate::models::timetable::{
    CreateTimetableSlot, FacultyScheduleRow, TimetableSlot, TimetableSlotView,
    UpdateTimetableSlot,
};

const COLUMNS: &str = "id, section_id, semester, day, slot_number, course_code, \
                       faculty_profile_id, room_info, created_at";

/// Calendar ordering of the `day` column (`t` alias).
const DAY_ORDER: &str = "CASE t.day
        WHEN 'Mon' THEN 1 WHEN 'Tue' THEN 2 WHEN 'Wed' THEN 3
        WHEN 'Thu' THEN 4 WHEN 'Fri' THEN 5 WHEN 'Sat' THEN 6 ELSE 7
    END";

/// Provides CRUD operations and schedule queries for timetable slots.
pub struct TimetableRepo;

impl TimetableRepo {
    /// Insert a new slot, returning the created row.
    ///
    /// A second slot in the same (section, semester, day, slot) cell fails
    /// with a unique violation on `uq_timetable_cell`.
    pub async fn create(
        pool: &PgPool,
        input: &CreateTimetableSlot,
    ) -> Result<TimetableSlot, sqlx::Error> {
        let query = format!(
            "INSERT INTO timetable
                (section_id, semester, day, slot_number, course_code, faculty_profile_id, room_info)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, TimetableSlot>(&query)
            .bind(input.section_id)
            .bind(input.semester)
            .bind(&input.day)
            .bind(input.slot_number)
            .bind(&input.course_code)
            .bind(input.faculty_profile_id)
            .bind(&input.room_info)
            .fetch_one(pool)
            .await
    }

    /// Find a slot by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<TimetableSlot>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM timetable WHERE id = $1");
        sqlx::query_as::<_, TimetableSlot>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// A section's slots for one semester, with course and faculty names,
    /// ordered Monday first, then by slot number.
    pub async fn list_for_section(
        pool: &PgPool,
        section_id: DbId,
        semester: i32,
    ) -> Result<Vec<TimetableSlotView>, sqlx::Error> {
        let query = format!(
            "SELECT t.id, t.section_id, t.semester, t.day, t.slot_number,
                    t.course_code, c.course_name, t.faculty_profile_id, f.faculty_name, t.room_info
             FROM timetable t
             JOIN courses c ON c.course_code = t.course_code
             JOIN faculty_profiles f ON f.id = t.faculty_profile_id
             WHERE t.section_id = $1 AND t.semester = $2
             ORDER BY {DAY_ORDER}, t.slot_number"
        );
        sqlx::query_as::<_, TimetableSlotView>(&query)
            .bind(section_id)
            .bind(semester)
            .fetch_all(pool)
            .await
    }

    /// Faculty timetabled to teach `course_code` to a section, if any.
    ///
    /// Runs on the caller's connection so it sees the same transaction.
    pub async fn find_section_faculty(
        conn: &mut PgConnection,
        section_id: DbId,
        course_code: &str,
    ) -> Result<Option<DbId>, sqlx::Error> {
        sqlx::query_scalar::<_, DbId>(
            "SELECT faculty_profile_id FROM timetable
             WHERE section_id = $1 AND course_code = $2
             ORDER BY id
             LIMIT 1",
        )
        .bind(section_id)
        .bind(course_code)
        .fetch_optional(conn)
        .await
    }

    /// Every slot taught by one faculty profile, titled by class.
    pub async fn faculty_schedule(
        pool: &PgPool,
        faculty_profile_id: DbId,
    ) -> Result<Vec<FacultyScheduleRow>, sqlx::Error> {
        let query = format!(
            "SELECT CONCAT(d.dept_code, ' ', b.batch_name, ' (', s.section_name, ')') AS full_class_title,
                    t.id AS timetable_id, t.day, t.slot_number, t.room_info, t.semester,
                    c.course_name, c.course_code, NULL::text AS faculty_name
             FROM timetable t
             JOIN courses c ON c.course_code = t.course_code
             JOIN sections s ON s.id = t.section_id
             JOIN batches b ON b.id = s.batch_id
             JOIN departments d ON d.id = b.dept_id
             WHERE t.faculty_profile_id = $1
             ORDER BY t.semester, {DAY_ORDER}, t.slot_number"
        );
        sqlx::query_as::<_, FacultyScheduleRow>(&query)
            .bind(faculty_profile_id)
            .fetch_all(pool)
            .await
    }

    /// Full timetables of every (section, semester) the login's faculty
    /// profile teaches in, including colleagues' slots.
    pub async fn colleague_timetables(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<FacultyScheduleRow>, sqlx::Error> {
        let query = format!(
            "WITH taught AS (
                SELECT DISTINCT t.section_id, t.semester
                FROM timetable t
                JOIN faculty_profiles f ON f.id = t.faculty_profile_id
                WHERE f.user_id = $1
             )
             SELECT CONCAT(d.dept_code, ' Batch ', b.start_year, '-', b.end_year,
                           ' Section ', s.section_name, ' Sem ', t.semester) AS full_class_title,
                    t.id AS timetable_id, t.day, t.slot_number, t.room_info, t.semester,
                    c.course_name, c.course_code, f.faculty_name
             FROM timetable t
             JOIN taught ON taught.section_id = t.section_id AND taught.semester = t.semester
             JOIN courses c ON c.course_code = t.course_code
             JOIN faculty_profiles f ON f.id = t.faculty_profile_id
             JOIN sections s ON s.id = t.section_id
             JOIN batches b ON b.id = s.batch_id
             JOIN departments d ON d.id = b.dept_id
             ORDER BY full_class_title, {DAY_ORDER}, t.slot_number"
        );
        sqlx::query_as::<_, FacultyScheduleRow>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Update a slot. Returns `None` if no row with `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateTimetableSlot,
    ) -> Result<Option<TimetableSlot>, sqlx::Error> {
        let query = format!(
            "UPDATE timetable SET
                day = COALESCE($2, day),
                slot_number = COALESCE($3, slot_number),
                course_code = COALESCE($4, course_code),
                faculty_profile_id = COALESCE($5, faculty_profile_id),
                room_info = COALESCE($6, room_info)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, TimetableSlot>(&query)
            .bind(id)
            .bind(&input.day)
            .bind(input.slot_number)
            .bind(&input.course_code)
            .bind(input.faculty_profile_id)
            .bind(&input.room_info)
            .fetch_optional(pool)
            .await
    }

    /// Delete a slot. Returns `true` if a row was removed.
    ///
    /// Fails with a foreign-key violation once a session or swap references it.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM timetable WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
