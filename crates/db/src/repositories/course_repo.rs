//! Repository for the `courses` table. Rows are keyed by course code.

use attendance_core::types::DbId;
use sqlx::PgPool;

use crate::models::course::{Course, CreateCourse, UpdateCourse};

const COLUMNS: &str = "course_code, course_name, credits, dept_id, created_at";

/// Provides CRUD operations for courses.
pub struct CourseRepo;

impl CourseRepo {
    /// Insert a new course, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateCourse) -> Result<Course, sqlx::Error> {
        let query = format!(
            "INSERT INTO courses (course_code, course_name, credits, dept_id)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Course>(&query)
            .bind(&input.code)
            .bind(&input.name)
            .bind(input.credits)
            .bind(input.dept_id)
            .fetch_one(pool)
            .await
    }

    /// List all courses ordered by code.
    pub async fn list(pool: &PgPool) -> Result<Vec<Course>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM courses ORDER BY course_code");
        sqlx::query_as::<_, Course>(&query).fetch_all(pool).await
    }

    /// Find a course by its code.
    pub async fn find_by_code(pool: &PgPool, code: &str) -> Result<Option<Course>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM courses WHERE course_code = $1");
        sqlx::query_as::<_, Course>(&query)
            .bind(code)
            .fetch_optional(pool)
            .await
    }

    /// Distinct courses timetabled for a section, ordered by name.
    pub async fn list_for_section(
        pool: &PgPool,
        section_id: DbId,
    ) -> Result<Vec<Course>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM courses
             WHERE course_code IN (SELECT course_code FROM timetable WHERE section_id = $1)
             ORDER BY course_name"
        );
        sqlx::query_as::<_, Course>(&query)
            .bind(section_id)
            .fetch_all(pool)
            .await
    }

    /// Update a course. Returns `None` if no course has `code`.
    pub async fn update(
        pool: &PgPool,
        code: &str,
        input: &UpdateCourse,
    ) -> Result<Option<Course>, sqlx::Error> {
        let query = format!(
            "UPDATE courses SET
                course_name = COALESCE($2, course_name),
                credits = COALESCE($3, credits)
             WHERE course_code = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Course>(&query)
            .bind(code)
            .bind(&input.name)
            .bind(input.credits)
            .fetch_optional(pool)
            .await
    }

    /// Delete a course. Returns `true` if a row was removed.
    ///
    /// Fails with a foreign-key violation while timetable slots or sessions
    /// still reference the course.
    pub async fn delete(pool: &PgPool, code: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM courses WHERE course_code = $1")
            .bind(code)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
