pub mod admin;
pub mod auth;
pub mod common;
pub mod cr;
pub mod faculty;
pub mod health;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /login                                           login (public)
///
/// /admin/depts, /admin/batches, /admin/sections    directory CRUD (admin)
/// /admin/courses, /admin/students, /admin/faculty  directory CRUD (admin)
/// /admin/faculty-profile, /admin/faculty-login     faculty profiles and logins
/// /admin/promote-cr, /admin/demote-cr/{id}         CR logins
/// /admin/timetable                                 slot CRUD
/// /admin/students-by-filter                        section roster with CR flags
/// /admin/sessions-by-timetable/{id}                session audit
/// /admin/records-by-session/{id}                   record audit
/// /admin/swaps-by-timetable/{id}                   swap log audit
/// /admin/attendance-report[/shortages]             percentage reports
/// /admin/daily-attendance-overview                 one day, merged with sessions
///
/// /common/timetable                                section timetable
/// /common/timetable-by-class                       timetable for the caller's class
/// /common/week-grid                                one week, merged with sessions
///
/// /cr/attendance                                   record a session
/// /cr/students-by-timetable/{id}                   roster for a slot
/// /cr/students-by-studentid                        roster for the caller's section
/// /cr/my-courses                                   courses of the caller's section
///
/// /faculty/verify/{session_id}                     lock a session with a key
/// /faculty/regen-token                             rotate the caller's key
/// /faculty/my-schedule                             grouped teaching schedule
/// /faculty/my-classes-full-timetables              grouped class timetables
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(auth::router())
        .nest("/admin", admin::router())
        .nest("/common", common::router())
        .nest("/cr", cr::router())
        .nest("/faculty", faculty::router())
}
