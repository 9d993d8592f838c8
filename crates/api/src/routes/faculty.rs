use axum::routing::{get, put};
use axum::Router;

use crate::handlers::{schedule, verification};
use crate::state::AppState;

/// Faculty routes, mounted at `/faculty`.
///
/// ```text
/// PUT    /verify/{session_id}             -> verification::verify_session
/// PUT    /regen-token                     -> verification::regenerate_token
/// GET    /my-schedule                     -> schedule::my_schedule
/// GET    /my-classes-full-timetables      -> schedule::colleague_timetables
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/verify/{session_id}",
            put(verification::verify_session),
        )
        .route("/regen-token", put(verification::regenerate_token))
        .route("/my-schedule", get(schedule::my_schedule))
        .route(
            "/my-classes-full-timetables",
            get(schedule::colleague_timetables),
        )
}
