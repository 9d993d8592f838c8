//! Schedule-merged-with-session views: the daily overview and the week grid.
//!
//! Both load the section's slots for a semester and the sessions recorded
//! in a date window, then pair each slot with the session (if any) held on
//! the slot's concrete date.

use std::collections::HashMap;

use attendance_core::calendar::{day_abbrev, day_order, slot_date, week_end};
use attendance_core::types::{Date, DbId, Timestamp};
use attendance_db::models::attendance::SessionSummary;
use attendance_db::models::timetable::TimetableSlotView;
use attendance_db::repositories::{AttendanceSessionRepo, TimetableRepo};
use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::error::AppResult;
use crate::middleware::rbac::{can, Require};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Query parameters for `GET /admin/daily-attendance-overview`.
#[derive(Debug, Deserialize)]
pub struct DailyOverviewParams {
    pub section_id: DbId,
    pub date: Date,
    pub semester: i32,
}

/// Query parameters for `GET /common/week-grid`.
#[derive(Debug, Deserialize)]
pub struct WeekGridParams {
    pub section_id: DbId,
    /// Date of the Monday the grid starts on.
    pub start_date: Date,
    pub semester: i32,
}

/// One scheduled slot on a concrete date.
#[derive(Debug, Clone, Serialize)]
pub struct GridRow {
    pub timetable_id: DbId,
    pub day: String,
    pub slot_number: i32,
    pub date: Date,
    /// Scheduled course.
    pub course_code: String,
    pub course_name: String,
    /// Scheduled faculty.
    pub faculty_profile_id: DbId,
    pub faculty_name: String,
    pub room_info: Option<String>,
    /// `None` when nothing was recorded for the slot on `date`.
    pub session: Option<GridSession>,
}

/// What was recorded for a grid slot.
#[derive(Debug, Clone, Serialize)]
pub struct GridSession {
    pub session_id: DbId,
    pub category: String,
    pub is_verified_by_faculty: bool,
    pub verified_at: Option<Timestamp>,
    pub actual_course_code: Option<String>,
    pub actual_course_name: Option<String>,
    pub present_count: i64,
    pub absent_count: i64,
    pub total_count: i64,
}

impl From<SessionSummary> for GridSession {
    fn from(s: SessionSummary) -> Self {
        Self {
            session_id: s.id,
            category: s.session_category,
            is_verified_by_faculty: s.is_verified_by_faculty,
            verified_at: s.verified_at,
            actual_course_code: s.actual_course_code,
            actual_course_name: s.actual_course_name,
            present_count: s.present_count,
            absent_count: s.absent_count,
            total_count: s.total_count,
        }
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/admin/daily-attendance-overview?section_id&date&semester
///
/// Slots held on the weekday of `date`, each with that day's session.
pub async fn daily_overview(
    _auth: Require<can::ViewReports>,
    State(state): State<AppState>,
    Query(params): Query<DailyOverviewParams>,
) -> AppResult<Json<Vec<GridRow>>> {
    let slots =
        TimetableRepo::list_for_section(&state.pool, params.section_id, params.semester).await?;
    let summaries = AttendanceSessionRepo::summaries_for_section(
        &state.pool,
        params.section_id,
        params.semester,
        params.date,
        params.date,
    )
    .await?;

    Ok(Json(daily_rows(slots, summaries, params.date)))
}

/// GET /api/common/week-grid?section_id&start_date&semester
///
/// Every slot of the week; Mon..Fri map to `start_date + 0..4`.
pub async fn week_grid(
    _auth: Require<can::ViewReports>,
    State(state): State<AppState>,
    Query(params): Query<WeekGridParams>,
) -> AppResult<Json<Vec<GridRow>>> {
    let slots =
        TimetableRepo::list_for_section(&state.pool, params.section_id, params.semester).await?;
    let summaries = AttendanceSessionRepo::summaries_for_section(
        &state.pool,
        params.section_id,
        params.semester,
        params.start_date,
        week_end(params.start_date),
    )
    .await?;

    Ok(Json(week_rows(slots, summaries, params.start_date)))
}

// ---------------------------------------------------------------------------
// Merging
// ---------------------------------------------------------------------------

/// Rows for the slots falling on `date`'s weekday.
pub fn daily_rows(
    slots: Vec<TimetableSlotView>,
    summaries: Vec<SessionSummary>,
    date: Date,
) -> Vec<GridRow> {
    let weekday = day_abbrev(date);
    let slots = slots.into_iter().filter(|s| s.day == weekday).collect();
    merge(slots, summaries, |_| date)
}

/// Rows for every slot, dated relative to `start_date`.
pub fn week_rows(
    slots: Vec<TimetableSlotView>,
    summaries: Vec<SessionSummary>,
    start_date: Date,
) -> Vec<GridRow> {
    merge(slots, summaries, |day| slot_date(start_date, day))
}

/// Pair each slot with the session recorded on its date, ordered Monday
/// first, then by slot number.
fn merge(
    mut slots: Vec<TimetableSlotView>,
    summaries: Vec<SessionSummary>,
    date_of: impl Fn(&str) -> Date,
) -> Vec<GridRow> {
    let mut sessions: HashMap<(DbId, Date), SessionSummary> = summaries
        .into_iter()
        .map(|s| ((s.timetable_id, s.session_date), s))
        .collect();

    slots.sort_by(|a, b| {
        day_order(&a.day)
            .cmp(&day_order(&b.day))
            .then(a.slot_number.cmp(&b.slot_number))
    });

    slots
        .into_iter()
        .map(|slot| {
            let date = date_of(&slot.day);
            let session = sessions.remove(&(slot.id, date)).map(GridSession::from);
            GridRow {
                timetable_id: slot.id,
                day: slot.day,
                slot_number: slot.slot_number,
                date,
                course_code: slot.course_code,
                course_name: slot.course_name,
                faculty_profile_id: slot.faculty_profile_id,
                faculty_name: slot.faculty_name,
                room_info: slot.room_info,
                session,
            }
        })
        .collect()
}
