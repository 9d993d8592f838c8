//! Faculty profile model and DTOs.
//!
//! A profile is a directory entry; a login (a `users` row with role
//! `faculty`) may be attached to it later.

use attendance_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `faculty_profiles` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct FacultyProfile {
    pub id: DbId,
    pub faculty_name: String,
    pub email: String,
    pub dept_id: DbId,
    pub authorization_key: Option<String>,
    pub user_id: Option<DbId>,
    pub created_at: Timestamp,
}

/// Admin listing row: profile plus department code.
///
/// `user_id` is `None` for profiles without a login.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct FacultyListing {
    pub profile_id: DbId,
    pub faculty_name: String,
    pub email: String,
    pub dept_id: DbId,
    pub dept_code: String,
    pub authorization_key: Option<String>,
    pub user_id: Option<DbId>,
}

/// DTO for creating a faculty profile.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateFacultyProfile {
    pub name: String,
    pub email: String,
    pub dept_id: DbId,
    /// Initial authorization key; generated when omitted.
    pub auth_key: Option<String>,
}

/// DTO for attaching a login to an existing profile.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateFacultyLogin {
    pub faculty_profile_id: DbId,
    pub password: String,
}

/// DTO for updating a faculty profile. All fields are optional.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateFacultyProfile {
    pub name: Option<String>,
    pub auth_key: Option<String>,
    pub dept_id: Option<DbId>,
}
