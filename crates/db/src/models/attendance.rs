//! Attendance session and record models.

use attendance_core::attendance::{Classification, NormalizedRecord};
use attendance_core::types::{Date, DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `attendance_sessions` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AttendanceSession {
    pub id: DbId,
    pub timetable_id: DbId,
    pub session_date: Date,
    pub marked_by_user_id: Option<DbId>,
    pub session_category: String,
    /// `None` exactly when the session is free.
    pub actual_course_code: Option<String>,
    pub is_verified_by_faculty: bool,
    pub verified_at: Option<Timestamp>,
    pub created_at: Timestamp,
}

/// A row from the `attendance_records` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AttendanceRecord {
    pub id: DbId,
    pub session_id: DbId,
    pub student_id: DbId,
    pub status: String,
}

/// Everything needed to write a session, its records and any swap log entry
/// in one transaction.
#[derive(Debug, Clone)]
pub struct NewSession {
    pub timetable_id: DbId,
    pub session_date: Date,
    pub marked_by_user_id: DbId,
    pub classification: Classification,
    pub records: Vec<NormalizedRecord>,
    /// Section the slot belongs to; used to find a swap's substitute.
    pub section_id: DbId,
    pub scheduled_course_code: String,
    pub scheduled_faculty_id: DbId,
    /// Set when the recorder is a faculty member, so their own profile can
    /// stand in as the substitute.
    pub recorder_faculty_user_id: Option<DbId>,
}

/// Admin audit row for a slot's sessions.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SessionAuditRow {
    pub id: DbId,
    pub session_date: Date,
    pub session_category: String,
    pub is_verified_by_faculty: bool,
    /// Email of the recorder; `None` if that login was since removed.
    pub marked_by: Option<String>,
}

/// A record with the student's identity resolved.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct RecordDetail {
    pub student_id: DbId,
    pub roll_number: String,
    pub full_name: String,
    pub status: String,
}

/// A session with its record counts, for merging into grid views.
#[derive(Debug, Clone, FromRow)]
pub struct SessionSummary {
    pub id: DbId,
    pub timetable_id: DbId,
    pub session_date: Date,
    pub session_category: String,
    pub is_verified_by_faculty: bool,
    pub verified_at: Option<Timestamp>,
    pub actual_course_code: Option<String>,
    pub actual_course_name: Option<String>,
    pub present_count: i64,
    pub absent_count: i64,
    pub total_count: i64,
}
