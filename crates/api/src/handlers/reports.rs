//! Attendance percentage reports.

use attendance_core::report::{build_report, course_filter, validate_threshold, ReportRow};
use attendance_core::types::DbId;
use attendance_db::repositories::ReportRepo;
use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;

use crate::error::AppResult;
use crate::middleware::rbac::{can, Require};
use crate::state::AppState;

/// Query parameters shared by both report endpoints.
#[derive(Debug, Deserialize)]
pub struct ReportParams {
    pub section_id: DbId,
    /// A course code, or `ALL` / absent for every course.
    pub course_code: Option<String>,
    /// Keep only rows strictly below this percentage.
    pub threshold: Option<f64>,
}

/// GET /api/admin/attendance-report?section_id&course_code&threshold
///
/// Without a threshold every student with at least one session is listed.
pub async fn attendance_report(
    _auth: Require<can::ViewReports>,
    State(state): State<AppState>,
    Query(params): Query<ReportParams>,
) -> AppResult<Json<Vec<ReportRow>>> {
    let rows = run_report(&state, &params, params.threshold).await?;
    Ok(Json(rows))
}

/// GET /api/admin/attendance-report/shortages?section_id&course_code&threshold
///
/// Same as [`attendance_report`], defaulting the threshold to the configured
/// shortage limit.
pub async fn shortages(
    _auth: Require<can::ViewReports>,
    State(state): State<AppState>,
    Query(params): Query<ReportParams>,
) -> AppResult<Json<Vec<ReportRow>>> {
    let threshold = params.threshold.unwrap_or(state.config.shortage_threshold);
    let rows = run_report(&state, &params, Some(threshold)).await?;
    Ok(Json(rows))
}

async fn run_report(
    state: &AppState,
    params: &ReportParams,
    threshold: Option<f64>,
) -> AppResult<Vec<ReportRow>> {
    if let Some(limit) = threshold {
        validate_threshold(limit)?;
    }

    let course = course_filter(params.course_code.as_deref());
    let tallies = ReportRepo::tallies(&state.pool, params.section_id, course).await?;

    let rows = build_report(tallies.into_iter().map(Into::into).collect(), threshold);
    tracing::debug!(
        section_id = params.section_id,
        course = course.unwrap_or("ALL"),
        rows = rows.len(),
        "Attendance report built",
    );
    Ok(rows)
}
