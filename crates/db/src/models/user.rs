//! Login account model and DTOs.

use attendance_core::types::{DbId, Timestamp};
use serde::Deserialize;
use sqlx::FromRow;

/// Full row from the `users` table.
///
/// Contains the password hash, so it is deliberately not `Serialize`.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: DbId,
    pub email: String,
    pub password_hash: String,
    pub role: String,
    /// Set for class representatives.
    pub student_id: Option<DbId>,
    /// Semester a class representative currently represents.
    pub semester: Option<i32>,
    pub created_at: Timestamp,
}

/// DTO for creating a login.
#[derive(Debug, Clone)]
pub struct CreateUser {
    pub email: String,
    pub password_hash: String,
    pub role: String,
    pub student_id: Option<DbId>,
    pub semester: Option<i32>,
}

/// Login request body.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Where a class representative belongs: their student's section and the
/// semester recorded on their login.
#[derive(Debug, Clone, Copy, FromRow)]
pub struct CrContext {
    pub section_id: DbId,
    pub semester: Option<i32>,
}
