//! Student entity model and DTOs.

use attendance_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `students` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Student {
    pub id: DbId,
    pub roll_number: String,
    pub full_name: String,
    pub email: String,
    pub section_id: DbId,
    pub created_at: Timestamp,
}

/// Student listing row, joined with the section name.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct StudentListing {
    pub id: DbId,
    pub roll_number: String,
    pub full_name: String,
    pub email: String,
    pub section_id: DbId,
    pub section_name: String,
}

/// Row of the admin student filter: includes any linked CR login.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct StudentFilterRow {
    pub id: DbId,
    pub roll_number: String,
    pub full_name: String,
    pub email: String,
    pub section_name: String,
    pub batch_name: String,
    /// `Some("cr")` when the student holds a CR login.
    pub role: Option<String>,
    pub cr_semester: Option<i32>,
}

/// DTO for creating a student.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateStudent {
    pub roll: String,
    pub name: String,
    pub email: String,
    pub section_id: DbId,
}

/// DTO for updating a student. All fields are optional.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateStudent {
    pub roll: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub section_id: Option<DbId>,
}

/// DTO for promoting a student to class representative.
#[derive(Debug, Clone, Deserialize)]
pub struct PromoteCr {
    pub student_id: DbId,
    pub password: String,
    pub semester: Option<i32>,
}
