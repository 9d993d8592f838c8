//! Attendance session classification and swap inference.
//!
//! A session records what actually happened in a timetable slot on a given
//! date. When that deviates from the schedule (a different course was taught,
//! or no class was held) a swap log entry is synthesised. This module holds
//! the pure rules; the `db` crate performs the writes in one transaction.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::roles::Role;
use crate::types::{Date, DbId};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Session category values (stored in `attendance_sessions.session_category`).
pub const CATEGORY_NORMAL: &str = "normal";
pub const CATEGORY_SWAP: &str = "swap";
pub const CATEGORY_FREE: &str = "free";

/// All valid category strings.
pub const VALID_CATEGORIES: &[&str] = &[CATEGORY_NORMAL, CATEGORY_SWAP, CATEGORY_FREE];

/// Canonical record status values (stored in `attendance_records.status`).
pub const STATUS_PRESENT: &str = "present";
pub const STATUS_ABSENT: &str = "absent";

/// Swap log entries are inferred after the fact, so they are born approved.
pub const SWAP_STATUS_APPROVED: &str = "approved";

/// Reason recorded on the swap log when a class is declared free.
pub const FREE_REASON: &str = "Class declared Free during attendance marking";

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// What actually happened in a scheduled slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionCategory {
    /// The scheduled course was taught.
    Normal,
    /// A different course was taught in the slot.
    Swap,
    /// No class was held.
    Free,
}

impl SessionCategory {
    /// Convert from a database string value.
    pub fn from_str_value(s: &str) -> Result<Self, String> {
        match s {
            CATEGORY_NORMAL => Ok(Self::Normal),
            CATEGORY_SWAP => Ok(Self::Swap),
            CATEGORY_FREE => Ok(Self::Free),
            _ => Err(format!(
                "Invalid session category '{s}'. Must be one of: {}",
                VALID_CATEGORIES.join(", ")
            )),
        }
    }

    /// Convert to the database string value.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Normal => CATEGORY_NORMAL,
            Self::Swap => CATEGORY_SWAP,
            Self::Free => CATEGORY_FREE,
        }
    }

    /// Whether this category produces a swap log entry.
    pub fn deviates_from_schedule(&self) -> bool {
        matches!(self, Self::Swap | Self::Free)
    }
}

/// A student's presence in a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttendanceStatus {
    Present,
    Absent,
}

impl AttendanceStatus {
    /// Parse user input, ignoring case and surrounding whitespace.
    pub fn parse(input: &str) -> Result<Self, CoreError> {
        let trimmed = input.trim();
        if trimmed.eq_ignore_ascii_case(STATUS_PRESENT) {
            Ok(Self::Present)
        } else if trimmed.eq_ignore_ascii_case(STATUS_ABSENT) {
            Ok(Self::Absent)
        } else {
            Err(CoreError::Validation(format!(
                "Invalid attendance status '{input}'. Must be one of: {STATUS_PRESENT}, {STATUS_ABSENT}"
            )))
        }
    }

    /// Canonical database value.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Present => STATUS_PRESENT,
            Self::Absent => STATUS_ABSENT,
        }
    }
}

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// One student's entry in an attendance submission.
#[derive(Debug, Clone, Deserialize)]
pub struct AttendanceEntry {
    /// Student id.
    pub id: DbId,
    pub status: Option<String>,
}

/// Body of `POST /cr/attendance`.
#[derive(Debug, Clone, Deserialize)]
pub struct RecordAttendanceRequest {
    pub timetable_id: DbId,
    pub date: Date,
    #[serde(default)]
    pub records: Vec<AttendanceEntry>,
    pub selected_course_code: Option<String>,
    #[serde(default)]
    pub is_free: bool,
}

/// A validated, normalised record ready to insert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NormalizedRecord {
    pub student_id: DbId,
    pub status: AttendanceStatus,
}

/// Outcome of comparing a submission against the scheduled slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub category: SessionCategory,
    /// `None` exactly when the category is [`SessionCategory::Free`].
    pub actual_course_code: Option<String>,
}

// ---------------------------------------------------------------------------
// Rules
// ---------------------------------------------------------------------------

/// Classify a submission against the slot's scheduled course.
///
/// A free declaration wins over any selected course. Otherwise a selected
/// course is required, and it decides between normal and swap.
pub fn classify(
    scheduled_course_code: &str,
    selected_course_code: Option<&str>,
    is_free: bool,
) -> Result<Classification, CoreError> {
    if is_free {
        return Ok(Classification {
            category: SessionCategory::Free,
            actual_course_code: None,
        });
    }

    let selected = selected_course_code
        .map(str::trim)
        .filter(|code| !code.is_empty())
        .ok_or_else(|| {
            CoreError::Validation(
                "selected_course_code is required unless the class is declared free".into(),
            )
        })?;

    let category = if selected == scheduled_course_code {
        SessionCategory::Normal
    } else {
        SessionCategory::Swap
    };

    Ok(Classification {
        category,
        actual_course_code: Some(selected.to_string()),
    })
}

/// Validate and normalise the submitted records for a session.
///
/// Free sessions never carry records, so any submitted entries are dropped.
/// For other categories every entry must have a recognised status and each
/// student may appear at most once.
pub fn normalize_records(
    category: SessionCategory,
    entries: &[AttendanceEntry],
) -> Result<Vec<NormalizedRecord>, CoreError> {
    if category == SessionCategory::Free {
        return Ok(Vec::new());
    }

    let mut seen = HashSet::with_capacity(entries.len());
    entries
        .iter()
        .map(|entry| {
            if !seen.insert(entry.id) {
                return Err(CoreError::Validation(format!(
                    "Student {} appears more than once in the submission",
                    entry.id
                )));
            }
            let raw = entry.status.as_deref().ok_or_else(|| {
                CoreError::Validation(format!("Missing status for student {}", entry.id))
            })?;
            Ok(NormalizedRecord {
                student_id: entry.id,
                status: AttendanceStatus::parse(raw)?,
            })
        })
        .collect()
}

/// Human-readable reason stored on the swap log, or `None` for a normal session.
pub fn swap_reason(
    category: SessionCategory,
    scheduled_course_code: &str,
    actual_course_code: Option<&str>,
) -> Option<String> {
    match category {
        SessionCategory::Normal => None,
        SessionCategory::Free => Some(FREE_REASON.to_string()),
        SessionCategory::Swap => Some(format!(
            "Course changed from {scheduled_course_code} to {}",
            actual_course_code.unwrap_or_default()
        )),
    }
}

/// Decide which faculty actually taught a swapped session.
///
/// The faculty timetabled to teach the substituted course to the same
/// section wins. Failing that, a recording faculty member is assumed to be
/// the substitute. Otherwise the target stays unknown.
pub fn resolve_swap_target(
    section_faculty: Option<DbId>,
    recorder_profile: Option<DbId>,
) -> Option<DbId> {
    section_faculty.or(recorder_profile)
}

/// Check that the recorder may record for a slot in `slot_section_id`.
///
/// Class representatives are confined to their own section; faculty and
/// admins may record for any slot.
pub fn check_recording_scope(
    role: Role,
    recorder_section_id: Option<DbId>,
    slot_section_id: DbId,
) -> Result<(), CoreError> {
    match role {
        Role::Admin | Role::Faculty => Ok(()),
        Role::Cr if recorder_section_id == Some(slot_section_id) => Ok(()),
        Role::Cr => Err(CoreError::Forbidden(
            "Class representatives may only record attendance for their own section".into(),
        )),
    }
}
