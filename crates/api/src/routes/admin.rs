//! Admin routes: directory CRUD, CR promotion, audits, and reports.
//!
//! Role checks happen per handler through `Require<can::..>`; a few read
//! endpoints here are open to faculty and CRs too.

use axum::routing::{delete, get, post, put};
use axum::Router;

use crate::handlers::{
    audit, batches, courses, departments, faculty, grid, reports, sections, students, timetable,
};
use crate::state::AppState;

/// Routes mounted at `/admin`.
///
/// ```text
/// GET, POST       /depts                               -> departments
/// PUT, DELETE     /depts/{id}
/// GET, POST       /batches                             -> batches
/// PUT, DELETE     /batches/{id}
/// GET, POST       /sections                            -> sections
/// PUT, DELETE     /sections/{id}
/// GET, POST       /courses                             -> courses
/// PUT, DELETE     /courses/{code}
/// GET             /faculty                             -> faculty::list
/// POST            /faculty-profile                     -> faculty::create_profile
/// POST            /faculty-login                       -> faculty::create_login
/// PUT, DELETE     /faculty/{id}
/// GET, POST       /students                            -> students
/// PUT, DELETE     /students/{id}
/// GET             /students-by-filter                  -> students::filter
/// POST            /promote-cr                          -> students::promote_cr
/// DELETE          /demote-cr/{student_id}              -> students::demote_cr
/// POST            /timetable                           -> timetable::create
/// PUT, DELETE     /timetable/{id}
/// GET             /sessions-by-timetable/{id}          -> audit
/// GET             /records-by-session/{id}             -> audit
/// GET             /swaps-by-timetable/{id}             -> audit
/// GET             /attendance-report                   -> reports::attendance_report
/// GET             /attendance-report/shortages         -> reports::shortages
/// GET             /daily-attendance-overview           -> grid::daily_overview
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        // Directory.
        .route("/depts", get(departments::list).post(departments::create))
        .route(
            "/depts/{id}",
            put(departments::update).delete(departments::delete),
        )
        .route("/batches", get(batches::list).post(batches::create))
        .route("/batches/{id}", put(batches::update).delete(batches::delete))
        .route("/sections", get(sections::list).post(sections::create))
        .route(
            "/sections/{id}",
            put(sections::update).delete(sections::delete),
        )
        .route("/courses", get(courses::list).post(courses::create))
        .route(
            "/courses/{code}",
            put(courses::update).delete(courses::delete),
        )
        // Faculty profiles and logins.
        .route("/faculty", get(faculty::list))
        .route("/faculty-profile", post(faculty::create_profile))
        .route("/faculty-login", post(faculty::create_login))
        .route("/faculty/{id}", put(faculty::update).delete(faculty::delete))
        // Students and CR logins.
        .route("/students", get(students::list).post(students::create))
        .route(
            "/students/{id}",
            put(students::update).delete(students::delete),
        )
        .route("/students-by-filter", get(students::filter))
        .route("/promote-cr", post(students::promote_cr))
        .route("/demote-cr/{student_id}", delete(students::demote_cr))
        // Timetable.
        .route("/timetable", post(timetable::create))
        .route(
            "/timetable/{id}",
            put(timetable::update).delete(timetable::delete),
        )
        // Audit.
        .route(
            "/sessions-by-timetable/{id}",
            get(audit::sessions_by_timetable),
        )
        .route("/records-by-session/{id}", get(audit::records_by_session))
        .route("/swaps-by-timetable/{id}", get(audit::swaps_by_timetable))
        // Reports.
        .route("/attendance-report", get(reports::attendance_report))
        .route("/attendance-report/shortages", get(reports::shortages))
        .route("/daily-attendance-overview", get(grid::daily_overview))
}
