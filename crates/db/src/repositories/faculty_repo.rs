//! Repository for the `faculty_profiles` table and faculty logins.

use attendance_core::roles::ROLE_FACULTY;
use attendance_core::types::DbId;
use sqlx::{PgConnection, PgPool};

use crate::models::faculty::{
    CreateFacultyProfile, FacultyListing, FacultyProfile, UpdateFacultyProfile,
};
use crate::models::user::User;

const COLUMNS: &str = "id, faculty_name, email, dept_id, authorization_key, user_id, created_at";

/// Provides CRUD operations for faculty profiles.
pub struct FacultyRepo;

impl FacultyRepo {
    /// Insert a new profile with the given authorization key.
    pub async fn create(
        pool: &PgPool,
        input: &CreateFacultyProfile,
        authorization_key: &str,
    ) -> Result<FacultyProfile, sqlx::Error> {
        let query = format!(
            "INSERT INTO faculty_profiles (faculty_name, email, dept_id, authorization_key)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, FacultyProfile>(&query)
            .bind(&input.name)
            .bind(&input.email)
            .bind(input.dept_id)
            .bind(authorization_key)
            .fetch_one(pool)
            .await
    }

    /// List every profile, with or without a login, ordered by name.
    pub async fn list(pool: &PgPool) -> Result<Vec<FacultyListing>, sqlx::Error> {
        sqlx::query_as::<_, FacultyListing>(
            "SELECT f.id AS profile_id, f.faculty_name, f.email, f.dept_id, d.dept_code,
                    f.authorization_key, f.user_id
             FROM faculty_profiles f
             JOIN departments d ON d.id = f.dept_id
             ORDER BY f.faculty_name",
        )
        .fetch_all(pool)
        .await
    }

    /// Find a profile by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<FacultyProfile>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM faculty_profiles WHERE id = $1");
        sqlx::query_as::<_, FacultyProfile>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find the profile linked to a login.
    pub async fn find_by_user_id(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Option<FacultyProfile>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM faculty_profiles WHERE user_id = $1");
        sqlx::query_as::<_, FacultyProfile>(&query)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Profile id linked to a login, looked up on an open connection.
    pub async fn find_id_by_user(
        conn: &mut PgConnection,
        user_id: DbId,
    ) -> Result<Option<DbId>, sqlx::Error> {
        sqlx::query_scalar::<_, DbId>("SELECT id FROM faculty_profiles WHERE user_id = $1")
            .bind(user_id)
            .fetch_optional(conn)
            .await
    }

    /// Update a profile. Returns `None` if no row with `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateFacultyProfile,
    ) -> Result<Option<FacultyProfile>, sqlx::Error> {
        let query = format!(
            "UPDATE faculty_profiles SET
                faculty_name = COALESCE($2, faculty_name),
                authorization_key = COALESCE($3, authorization_key),
                dept_id = COALESCE($4, dept_id)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, FacultyProfile>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.auth_key)
            .bind(input.dept_id)
            .fetch_optional(pool)
            .await
    }

    /// Replace the authorization key on the profile linked to `user_id`.
    ///
    /// The old key stops matching immediately. Returns `None` when the login
    /// has no profile.
    pub async fn replace_key_for_user(
        pool: &PgPool,
        user_id: DbId,
        new_key: &str,
    ) -> Result<Option<FacultyProfile>, sqlx::Error> {
        let query = format!(
            "UPDATE faculty_profiles SET authorization_key = $2
             WHERE user_id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, FacultyProfile>(&query)
            .bind(user_id)
            .bind(new_key)
            .fetch_optional(pool)
            .await
    }

    /// Create a faculty login for an existing profile and link the two.
    ///
    /// The login takes the profile's email. Both writes commit together.
    /// Returns `None` if the profile does not exist.
    pub async fn create_login(
        pool: &PgPool,
        profile_id: DbId,
        password_hash: &str,
    ) -> Result<Option<User>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let email: Option<String> = sqlx::query_scalar(
            "SELECT email FROM faculty_profiles WHERE id = $1 FOR UPDATE",
        )
        .bind(profile_id)
        .fetch_optional(&mut *tx)
        .await?;
        let Some(email) = email else {
            return Ok(None);
        };

        let query = format!(
            "INSERT INTO users (email, password_hash, role)
             VALUES ($1, $2, $3)
             RETURNING {}",
            super::user_repo::COLUMNS
        );
        let user = sqlx::query_as::<_, User>(&query)
            .bind(&email)
            .bind(password_hash)
            .bind(ROLE_FACULTY)
            .fetch_one(&mut *tx)
            .await?;

        sqlx::query("UPDATE faculty_profiles SET user_id = $1 WHERE id = $2")
            .bind(user.id)
            .bind(profile_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(Some(user))
    }

    /// Delete a profile together with its linked login, if any.
    ///
    /// Returns `true` if the profile existed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let linked: Option<Option<DbId>> =
            sqlx::query_scalar("DELETE FROM faculty_profiles WHERE id = $1 RETURNING user_id")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?;
        let Some(user_id) = linked else {
            return Ok(false);
        };

        if let Some(user_id) = user_id {
            sqlx::query("DELETE FROM users WHERE id = $1 AND role = $2")
                .bind(user_id)
                .bind(ROLE_FACULTY)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        Ok(true)
    }
}
