//! Class swap log model.
//!
//! Swap rows are written only as a side effect of recording a session that
//! deviates from the schedule; there is no create DTO exposed to handlers.

use attendance_core::types::{Date, DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `class_swaps` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ClassSwap {
    pub id: DbId,
    pub source_timetable_id: DbId,
    /// Faculty originally scheduled for the slot.
    pub requesting_faculty_id: Option<DbId>,
    /// Faculty inferred to have taught instead, if known.
    pub target_faculty_id: Option<DbId>,
    pub requested_date: Date,
    pub reason: String,
    pub status: String,
    pub created_at: Timestamp,
}

/// Values for a new swap log row.
#[derive(Debug, Clone)]
pub struct NewClassSwap {
    pub source_timetable_id: DbId,
    pub requesting_faculty_id: DbId,
    pub target_faculty_id: Option<DbId>,
    pub requested_date: Date,
    pub reason: String,
}
