//! Faculty teaching schedules, grouped by class.

use attendance_core::capabilities::{authorize, Operation};
use attendance_core::types::DbId;
use attendance_db::models::timetable::FacultyScheduleRow;
use attendance_db::repositories::{FacultyRepo, TimetableRepo};
use axum::extract::{Query, State};
use axum::Json;
use indexmap::IndexMap;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::{can, Require};
use crate::state::AppState;

/// Class title -> that class's slots, in query order.
pub type GroupedSchedule = IndexMap<String, Vec<FacultyScheduleRow>>;

/// Query parameters for `GET /faculty/my-schedule`.
#[derive(Debug, Deserialize)]
pub struct MyScheduleParams {
    /// Another faculty profile to look at; admin only.
    pub faculty_id: Option<DbId>,
}

/// GET /api/faculty/my-schedule[?faculty_id]
///
/// Without `faculty_id` the caller's own profile is used.
pub async fn my_schedule(
    Require(user, _): Require<can::ViewFacultySchedule>,
    State(state): State<AppState>,
    Query(params): Query<MyScheduleParams>,
) -> AppResult<Json<GroupedSchedule>> {
    let profile_id = match params.faculty_id {
        Some(id) => {
            authorize(Operation::ViewAnyFacultySchedule, user.role)?;
            id
        }
        None => {
            FacultyRepo::find_by_user_id(&state.pool, user.user_id)
                .await?
                .ok_or_else(|| AppError::not_found("Faculty profile for user", user.user_id))?
                .id
        }
    };

    let rows = TimetableRepo::faculty_schedule(&state.pool, profile_id).await?;
    Ok(Json(group_by_title(rows)))
}

/// GET /api/faculty/my-classes-full-timetables
///
/// Complete timetables of every class the caller teaches, including slots
/// taught by colleagues.
pub async fn colleague_timetables(
    Require(user, _): Require<can::ViewColleagueTimetables>,
    State(state): State<AppState>,
) -> AppResult<Json<GroupedSchedule>> {
    let rows = TimetableRepo::colleague_timetables(&state.pool, user.user_id).await?;
    Ok(Json(group_by_title(rows)))
}

/// Group rows by class title, keeping first-seen order of titles and the
/// row order within each group.
pub fn group_by_title(rows: Vec<FacultyScheduleRow>) -> GroupedSchedule {
    let mut grouped = GroupedSchedule::new();
    for row in rows {
        grouped
            .entry(row.full_class_title.clone())
            .or_default()
            .push(row);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(title: &str, timetable_id: DbId, day: &str) -> FacultyScheduleRow {
        FacultyScheduleRow {
            full_class_title: title.to_string(),
            timetable_id,
            day: day.to_string(),
            slot_number: 1,
            room_info: None,
            semester: 3,
            course_name: "Algorithms".to_string(),
            course_code: "CS301".to_string(),
            faculty_name: None,
        }
    }

    #[test]
    fn groups_keep_first_seen_order() {
        let grouped = group_by_title(vec![
            row("CSE 2023-27 (B)", 1, "Mon"),
            row("CSE 2022-26 (A)", 2, "Mon"),
            row("CSE 2023-27 (B)", 3, "Tue"),
        ]);

        let titles: Vec<&str> = grouped.keys().map(String::as_str).collect();
        assert_eq!(titles, vec!["CSE 2023-27 (B)", "CSE 2022-26 (A)"]);

        let ids: Vec<DbId> = grouped["CSE 2023-27 (B)"]
            .iter()
            .map(|r| r.timetable_id)
            .collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn title_is_the_key_not_a_field() {
        let grouped = group_by_title(vec![row("CSE 2022-26 (A)", 7, "Fri")]);
        let json = serde_json::to_value(&grouped).unwrap();

        let slot = &json["CSE 2022-26 (A)"][0];
        assert_eq!(slot["timetable_id"], 7);
        assert!(slot.get("full_class_title").is_none());
        assert!(slot.get("faculty_name").is_none());
    }

    #[test]
    fn empty_schedule_is_an_empty_map() {
        assert!(group_by_title(Vec::new()).is_empty());
    }
}
