//! Repository for the `users` table.

use attendance_core::roles::ROLE_CR;
use attendance_core::types::DbId;
use sqlx::PgPool;

use crate::models::user::{CrContext, CreateUser, User};

/// Column list shared across queries to avoid repetition.
pub(crate) const COLUMNS: &str = "id, email, password_hash, role, student_id, semester, created_at";

/// Provides lookups and lifecycle operations for logins.
pub struct UserRepo;

impl UserRepo {
    /// Insert a new login, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateUser) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (email, password_hash, role, student_id, semester)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(&input.email)
            .bind(&input.password_hash)
            .bind(&input.role)
            .bind(input.student_id)
            .bind(input.semester)
            .fetch_one(pool)
            .await
    }

    /// Find a login by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a login by email (case-sensitive).
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE email = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    /// Resolve the section and semester a class representative belongs to.
    ///
    /// Returns `None` for logins not linked to a student.
    pub async fn cr_context(pool: &PgPool, user_id: DbId) -> Result<Option<CrContext>, sqlx::Error> {
        sqlx::query_as::<_, CrContext>(
            "SELECT s.section_id, u.semester
             FROM users u
             JOIN students s ON s.id = u.student_id
             WHERE u.id = $1",
        )
        .bind(user_id)
        .fetch_optional(pool)
        .await
    }

    /// Remove the CR login attached to a student. Returns `true` if one existed.
    pub async fn delete_cr_for_student(pool: &PgPool, student_id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM users WHERE student_id = $1 AND role = $2")
            .bind(student_id)
            .bind(ROLE_CR)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
