//! Course entity model and DTOs. Courses are keyed by their code.

use attendance_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `courses` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Course {
    pub course_code: String,
    pub course_name: String,
    pub credits: i32,
    pub dept_id: DbId,
    pub created_at: Timestamp,
}

/// DTO for creating a course.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateCourse {
    pub code: String,
    pub name: String,
    #[serde(default)]
    pub credits: i32,
    pub dept_id: DbId,
}

/// DTO for updating a course. The code itself is immutable.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateCourse {
    pub name: Option<String>,
    pub credits: Option<i32>,
}
