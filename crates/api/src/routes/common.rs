use axum::routing::get;
use axum::Router;

use crate::handlers::{grid, timetable};
use crate::state::AppState;

/// Read-only views shared by every role, mounted at `/common`.
///
/// ```text
/// GET    /timetable             -> timetable::for_section
/// GET    /timetable-by-class    -> timetable::by_class
/// GET    /week-grid             -> grid::week_grid
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/timetable", get(timetable::for_section))
        .route("/timetable-by-class", get(timetable::by_class))
        .route("/week-grid", get(grid::week_grid))
}
