//! Aggregated attendance tallies.

use attendance_core::report::AttendanceTally;
use sqlx::FromRow;

/// Per-student, per-course counts as returned by the report query.
#[derive(Debug, Clone, FromRow)]
pub struct AttendanceTallyRow {
    pub roll_number: String,
    pub full_name: String,
    pub subject: String,
    pub total: i64,
    pub attended: i64,
}

impl From<AttendanceTallyRow> for AttendanceTally {
    fn from(row: AttendanceTallyRow) -> Self {
        Self {
            roll_number: row.roll_number,
            full_name: row.full_name,
            subject: row.subject,
            total: row.total,
            attended: row.attended,
        }
    }
}
