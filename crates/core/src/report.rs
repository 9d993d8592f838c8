//! Attendance percentages and shortage lists.
//!
//! The `db` crate aggregates sessions and records into per-student,
//! per-course tallies; this module turns them into report rows.

use serde::Serialize;

use crate::error::CoreError;

/// Default shortage threshold, in percent.
pub const DEFAULT_SHORTAGE_THRESHOLD: f64 = 75.0;

/// Course filter value meaning "every course".
pub const ALL_COURSES: &str = "ALL";

/// Aggregated counts for one student in one course.
#[derive(Debug, Clone, PartialEq)]
pub struct AttendanceTally {
    pub roll_number: String,
    pub full_name: String,
    /// Course code actually taught.
    pub subject: String,
    /// Non-free sessions held for the course in the student's section.
    pub total: i64,
    /// Sessions in which the student was marked present.
    pub attended: i64,
}

/// One line of an attendance report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportRow {
    pub roll_number: String,
    pub full_name: String,
    pub subject: String,
    pub total: i64,
    pub attended: i64,
    /// Rounded to one decimal place.
    pub percentage: f64,
}

/// Interpret the `course_code` query value: absent or `ALL` means no filter.
pub fn course_filter(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim)
        .filter(|code| !code.is_empty() && *code != ALL_COURSES)
}

/// Reject thresholds outside `[0, 100]`.
pub fn validate_threshold(threshold: f64) -> Result<(), CoreError> {
    if !(0.0..=100.0).contains(&threshold) {
        return Err(CoreError::Validation(format!(
            "threshold must be between 0 and 100, got {threshold}"
        )));
    }
    Ok(())
}

/// Unrounded attendance percentage; `None` when no sessions were held.
pub fn attendance_percentage(attended: i64, total: i64) -> Option<f64> {
    if total <= 0 {
        return None;
    }
    Some(attended as f64 / total as f64 * 100.0)
}

/// Round to one decimal place.
pub fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Build report rows from tallies.
///
/// Rows with no sessions held are dropped. When `threshold` is given only
/// rows strictly below it are kept (compared before rounding). Output is
/// ordered by roll number, then course code.
pub fn build_report(tallies: Vec<AttendanceTally>, threshold: Option<f64>) -> Vec<ReportRow> {
    let mut rows: Vec<ReportRow> = tallies
        .into_iter()
        .filter_map(|t| {
            let pct = attendance_percentage(t.attended, t.total)?;
            if threshold.is_some_and(|limit| pct >= limit) {
                return None;
            }
            Some(ReportRow {
                roll_number: t.roll_number,
                full_name: t.full_name,
                subject: t.subject,
                total: t.total,
                attended: t.attended,
                percentage: round_one_decimal(pct),
            })
        })
        .collect();

    rows.sort_by(|a, b| {
        a.roll_number
            .cmp(&b.roll_number)
            .then_with(|| a.subject.cmp(&b.subject))
    });
    rows
}
