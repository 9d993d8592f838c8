use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{attendance, rosters};
use crate::state::AppState;

/// Class representative routes, mounted at `/cr`.
///
/// ```text
/// POST   /attendance                      -> attendance::record
/// GET    /students-by-timetable/{id}      -> rosters::students_by_timetable
/// GET    /students-by-studentid           -> rosters::students_by_student
/// GET    /my-courses                      -> rosters::my_courses
/// ```
///
/// Faculty and admins may record attendance here as well.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/attendance", post(attendance::record))
        .route(
            "/students-by-timetable/{id}",
            get(rosters::students_by_timetable),
        )
        .route("/students-by-studentid", get(rosters::students_by_student))
        .route("/my-courses", get(rosters::my_courses))
}
