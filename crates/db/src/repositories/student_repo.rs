//! Repository for the `students` table.

use attendance_core::types::DbId;
use sqlx::PgPool;

use crate::models::student::{
    CreateStudent, Student, StudentFilterRow, StudentListing, UpdateStudent,
};

const COLUMNS: &str = "id, roll_number, full_name, email, section_id, created_at";

/// Same columns qualified with the `s` alias, for joins.
const S_COLUMNS: &str = "s.id, s.roll_number, s.full_name, s.email, s.section_id, s.created_at";

/// Provides CRUD operations and roster queries for students.
pub struct StudentRepo;

impl StudentRepo {
    /// Insert a new student, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateStudent) -> Result<Student, sqlx::Error> {
        let query = format!(
            "INSERT INTO students (roll_number, full_name, email, section_id)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Student>(&query)
            .bind(&input.roll)
            .bind(&input.name)
            .bind(&input.email)
            .bind(input.section_id)
            .fetch_one(pool)
            .await
    }

    /// Find a student by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Student>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM students WHERE id = $1");
        sqlx::query_as::<_, Student>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all students with their section name, by roll number.
    pub async fn list(pool: &PgPool) -> Result<Vec<StudentListing>, sqlx::Error> {
        sqlx::query_as::<_, StudentListing>(
            "SELECT s.id, s.roll_number, s.full_name, s.email, s.section_id, sec.section_name
             FROM students s
             JOIN sections sec ON sec.id = s.section_id
             ORDER BY s.roll_number",
        )
        .fetch_all(pool)
        .await
    }

    /// Students of one section, optionally limited to sections timetabled
    /// in `semester`, with any CR login they hold.
    pub async fn filter(
        pool: &PgPool,
        section_id: DbId,
        semester: Option<i32>,
    ) -> Result<Vec<StudentFilterRow>, sqlx::Error> {
        sqlx::query_as::<_, StudentFilterRow>(
            "SELECT s.id, s.roll_number, s.full_name, s.email, sec.section_name, b.batch_name,
                    u.role, u.semester AS cr_semester
             FROM students s
             JOIN sections sec ON sec.id = s.section_id
             JOIN batches b ON b.id = sec.batch_id
             LEFT JOIN users u ON u.student_id = s.id
             WHERE s.section_id = $1
               AND ($2::int IS NULL OR EXISTS (
                    SELECT 1 FROM timetable t
                    WHERE t.section_id = s.section_id AND t.semester = $2))
             ORDER BY s.roll_number",
        )
        .bind(section_id)
        .bind(semester)
        .fetch_all(pool)
        .await
    }

    /// Every student in a section, by roll number.
    pub async fn list_by_section(
        pool: &PgPool,
        section_id: DbId,
    ) -> Result<Vec<Student>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM students WHERE section_id = $1 ORDER BY roll_number"
        );
        sqlx::query_as::<_, Student>(&query)
            .bind(section_id)
            .fetch_all(pool)
            .await
    }

    /// Every student in the section a timetable slot belongs to.
    pub async fn list_by_timetable(
        pool: &PgPool,
        timetable_id: DbId,
    ) -> Result<Vec<Student>, sqlx::Error> {
        let query = format!(
            "SELECT {S_COLUMNS}
             FROM students s
             JOIN timetable t ON t.section_id = s.section_id
             WHERE t.id = $1
             ORDER BY s.roll_number"
        );
        sqlx::query_as::<_, Student>(&query)
            .bind(timetable_id)
            .fetch_all(pool)
            .await
    }

    /// Of the given ids, those that are not students of `section_id`.
    pub async fn find_outside_section(
        pool: &PgPool,
        section_id: DbId,
        student_ids: &[DbId],
    ) -> Result<Vec<DbId>, sqlx::Error> {
        sqlx::query_scalar::<_, DbId>(
            "SELECT candidate
             FROM UNNEST($1::bigint[]) AS candidate
             WHERE NOT EXISTS (
                SELECT 1 FROM students s WHERE s.id = candidate AND s.section_id = $2)
             ORDER BY candidate",
        )
        .bind(student_ids)
        .bind(section_id)
        .fetch_all(pool)
        .await
    }

    /// Update a student. Returns `None` if no row with `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateStudent,
    ) -> Result<Option<Student>, sqlx::Error> {
        let query = format!(
            "UPDATE students SET
                roll_number = COALESCE($2, roll_number),
                full_name = COALESCE($3, full_name),
                email = COALESCE($4, email),
                section_id = COALESCE($5, section_id)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Student>(&query)
            .bind(id)
            .bind(&input.roll)
            .bind(&input.name)
            .bind(&input.email)
            .bind(input.section_id)
            .fetch_optional(pool)
            .await
    }

    /// Delete a student (and any CR login). Returns `true` if a row was removed.
    ///
    /// Fails with a foreign-key violation once the student has attendance records.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM students WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
