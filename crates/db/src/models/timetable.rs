//! Timetable slot model, DTOs and read views.

use attendance_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `timetable` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TimetableSlot {
    pub id: DbId,
    pub section_id: DbId,
    pub semester: i32,
    pub day: String,
    pub slot_number: i32,
    pub course_code: String,
    pub faculty_profile_id: DbId,
    pub room_info: Option<String>,
    pub created_at: Timestamp,
}

/// A slot with its scheduled course and faculty names resolved.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TimetableSlotView {
    pub id: DbId,
    pub section_id: DbId,
    pub semester: i32,
    pub day: String,
    pub slot_number: i32,
    pub course_code: String,
    pub course_name: String,
    pub faculty_profile_id: DbId,
    pub faculty_name: String,
    pub room_info: Option<String>,
}

/// One slot of a faculty schedule, tagged with the class it belongs to.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct FacultyScheduleRow {
    /// Grouping key, e.g. `CSE 2022-26 (A)`. Not part of the slot payload.
    #[serde(skip)]
    pub full_class_title: String,
    pub timetable_id: DbId,
    pub day: String,
    pub slot_number: i32,
    pub room_info: Option<String>,
    pub semester: i32,
    pub course_name: String,
    pub course_code: String,
    /// Only populated for colleague timetables.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub faculty_name: Option<String>,
}

/// DTO for creating a timetable slot.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTimetableSlot {
    pub section_id: DbId,
    pub semester: i32,
    pub day: String,
    #[serde(rename = "slot")]
    pub slot_number: i32,
    pub course_code: String,
    #[serde(rename = "faculty_id")]
    pub faculty_profile_id: DbId,
    #[serde(rename = "room")]
    pub room_info: Option<String>,
}

/// DTO for updating a timetable slot. All fields are optional.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateTimetableSlot {
    pub day: Option<String>,
    #[serde(rename = "slot")]
    pub slot_number: Option<i32>,
    pub course_code: Option<String>,
    #[serde(rename = "faculty_id")]
    pub faculty_profile_id: Option<DbId>,
    #[serde(rename = "room")]
    pub room_info: Option<String>,
}
