//! HTTP-level tests for recording, verifying, and reporting attendance.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, delete_auth, get_auth, post_json_auth, put_auth, put_json_auth, seed_campus,
    Campus,
};
use serde_json::{json, Value};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Record a session and return the response JSON, asserting 201.
async fn record(pool: &PgPool, token: &str, body: Value) -> Value {
    let app = common::build_test_app(pool.clone());
    let response = post_json_auth(app, "/api/cr/attendance", body, token).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await
}

fn marks(c: &Campus, statuses: &[&str]) -> Value {
    Value::Array(
        c.student_ids
            .iter()
            .zip(statuses)
            .map(|(id, status)| json!({ "id": id, "status": status }))
            .collect(),
    )
}

async fn admin_get(pool: &PgPool, c: &Campus, uri: &str) -> Value {
    let app = common::build_test_app(pool.clone());
    let response = get_auth(app, uri, &c.admin).await;
    assert_eq!(response.status(), StatusCode::OK, "GET {uri}");
    body_json(response).await
}

// ---------------------------------------------------------------------------
// Recording
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_swap_submission_records_session_and_swap_log(pool: PgPool) {
    let c = seed_campus(&pool).await;

    let json = record(
        &pool,
        &c.cr,
        json!({
            "timetable_id": c.mon_slot,
            "date": "2026-03-02",
            "selected_course_code": "CS201",
            "is_free": false,
            "records": [
                { "id": c.student_ids[0], "status": "Present" },
                { "id": c.student_ids[1], "status": "absent" },
            ],
        }),
    )
    .await;

    assert_eq!(json["category"], "swap");
    let session_id = json["sessionId"].as_i64().unwrap();

    let records = admin_get(
        &pool,
        &c,
        &format!("/api/admin/records-by-session/{session_id}"),
    )
    .await;
    let statuses: Vec<&str> = records
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["status"].as_str().unwrap())
        .collect();
    assert_eq!(statuses, vec!["present", "absent"]);

    let swaps = admin_get(
        &pool,
        &c,
        &format!("/api/admin/swaps-by-timetable/{}", c.mon_slot),
    )
    .await;
    let swaps = swaps.as_array().unwrap();
    assert_eq!(swaps.len(), 1);
    assert_eq!(swaps[0]["requesting_faculty_id"], c.f1_profile);
    // F2 teaches CS201 to the same section.
    assert_eq!(swaps[0]["target_faculty_id"], c.f2_profile);
    assert_eq!(swaps[0]["reason"], "Course changed from CS101 to CS201");
    assert_eq!(swaps[0]["status"], "approved");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_normal_submission_has_no_swap(pool: PgPool) {
    let c = seed_campus(&pool).await;

    let json = record(
        &pool,
        &c.f1,
        json!({
            "timetable_id": c.mon_slot,
            "date": "2026-03-02",
            "selected_course_code": "CS101",
            "records": marks(&c, &["present", "present", "absent"]),
        }),
    )
    .await;
    assert_eq!(json["category"], "normal");

    let swaps = admin_get(
        &pool,
        &c,
        &format!("/api/admin/swaps-by-timetable/{}", c.mon_slot),
    )
    .await;
    assert!(swaps.as_array().unwrap().is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_free_submission_stores_no_records(pool: PgPool) {
    let c = seed_campus(&pool).await;

    let json = record(
        &pool,
        &c.cr,
        json!({
            "timetable_id": c.mon_slot,
            "date": "2026-03-02",
            "selected_course_code": "CS201",
            "is_free": true,
            "records": marks(&c, &["present", "present", "present"]),
        }),
    )
    .await;
    assert_eq!(json["category"], "free");
    let session_id = json["sessionId"].as_i64().unwrap();

    let records = admin_get(
        &pool,
        &c,
        &format!("/api/admin/records-by-session/{session_id}"),
    )
    .await;
    assert!(records.as_array().unwrap().is_empty());

    let swaps = admin_get(
        &pool,
        &c,
        &format!("/api/admin/swaps-by-timetable/{}", c.mon_slot),
    )
    .await;
    assert_eq!(
        swaps[0]["reason"],
        "Class declared Free during attendance marking"
    );
    assert!(swaps[0]["target_faculty_id"].is_null());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_second_session_for_same_date_is_conflict(pool: PgPool) {
    let c = seed_campus(&pool).await;
    let body = json!({
        "timetable_id": c.mon_slot,
        "date": "2026-03-02",
        "selected_course_code": "CS101",
        "records": marks(&c, &["present", "present", "present"]),
    });
    record(&pool, &c.cr, body.clone()).await;

    let app = common::build_test_app(pool.clone());
    let response = post_json_auth(app, "/api/cr/attendance", body, &c.cr).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(
        body_json(response).await["error"],
        "Attendance has already been recorded for this slot and date"
    );

    let sessions = admin_get(
        &pool,
        &c,
        &format!("/api/admin/sessions-by-timetable/{}", c.mon_slot),
    )
    .await;
    assert_eq!(sessions.as_array().unwrap().len(), 1);
    assert_eq!(sessions[0]["marked_by"], "r001@college.edu");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_invalid_status_writes_nothing(pool: PgPool) {
    let c = seed_campus(&pool).await;

    let app = common::build_test_app(pool.clone());
    let response = post_json_auth(
        app,
        "/api/cr/attendance",
        json!({
            "timetable_id": c.mon_slot,
            "date": "2026-03-02",
            "selected_course_code": "CS201",
            "records": marks(&c, &["present", "late", "absent"]),
        }),
        &c.cr,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let sessions = admin_get(
        &pool,
        &c,
        &format!("/api/admin/sessions-by-timetable/{}", c.mon_slot),
    )
    .await;
    assert!(sessions.as_array().unwrap().is_empty());
    let swaps = admin_get(
        &pool,
        &c,
        &format!("/api/admin/swaps-by-timetable/{}", c.mon_slot),
    )
    .await;
    assert!(swaps.as_array().unwrap().is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_student_from_another_section_is_not_found(pool: PgPool) {
    let c = seed_campus(&pool).await;

    let app = common::build_test_app(pool.clone());
    let response = post_json_auth(
        app,
        "/api/cr/attendance",
        json!({
            "timetable_id": c.mon_slot,
            "date": "2026-03-02",
            "selected_course_code": "CS101",
            "records": [
                { "id": c.student_ids[0], "status": "present" },
                { "id": c.outsider_id, "status": "present" },
            ],
        }),
        &c.cr,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let sessions = admin_get(
        &pool,
        &c,
        &format!("/api/admin/sessions-by-timetable/{}", c.mon_slot),
    )
    .await;
    assert!(sessions.as_array().unwrap().is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_missing_course_without_free_is_rejected(pool: PgPool) {
    let c = seed_campus(&pool).await;

    let app = common::build_test_app(pool);
    let response = post_json_auth(
        app,
        "/api/cr/attendance",
        json!({
            "timetable_id": c.mon_slot,
            "date": "2026-03-02",
            "records": [],
        }),
        &c.cr,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_unknown_slot_is_not_found(pool: PgPool) {
    let c = seed_campus(&pool).await;

    let app = common::build_test_app(pool);
    let response = post_json_auth(
        app,
        "/api/cr/attendance",
        json!({
            "timetable_id": 999_999,
            "date": "2026-03-02",
            "is_free": true,
        }),
        &c.cr,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_cr_cannot_record_for_another_section(pool: PgPool) {
    let c = seed_campus(&pool).await;

    // A slot in section B.
    let app = common::build_test_app(pool.clone());
    let response = post_json_auth(
        app,
        "/api/admin/timetable",
        json!({
            "section_id": c.other_section_id,
            "semester": 1,
            "day": "Mon",
            "slot": 1,
            "course_code": "CS101",
            "faculty_id": c.f1_profile,
        }),
        &c.admin,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let other_slot = body_json(response).await["id"].as_i64().unwrap();

    let body = json!({
        "timetable_id": other_slot,
        "date": "2026-03-02",
        "is_free": true,
    });

    let app = common::build_test_app(pool.clone());
    let response = post_json_auth(app, "/api/cr/attendance", body.clone(), &c.cr).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    // Faculty may record for any section.
    record(&pool, &c.f2, body).await;
}

// ---------------------------------------------------------------------------
// Verification
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_verification_requires_scheduled_faculty_key(pool: PgPool) {
    let c = seed_campus(&pool).await;
    let json = record(
        &pool,
        &c.cr,
        json!({
            "timetable_id": c.mon_slot,
            "date": "2026-03-02",
            "selected_course_code": "CS201",
            "records": marks(&c, &["present", "absent", "present"]),
        }),
    )
    .await;
    let session_id = json["sessionId"].as_i64().unwrap();
    let uri = format!("/api/faculty/verify/{session_id}");

    // F2 taught the swapped class, but the slot belongs to F1.
    let app = common::build_test_app(pool.clone());
    let response = put_json_auth(
        app,
        &uri,
        json!({ "token": "222222", "timetable_id": c.mon_slot }),
        &c.cr,
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let sessions = admin_get(
        &pool,
        &c,
        &format!("/api/admin/sessions-by-timetable/{}", c.mon_slot),
    )
    .await;
    assert_eq!(sessions[0]["is_verified_by_faculty"], false);

    let app = common::build_test_app(pool.clone());
    let response = put_json_auth(
        app,
        &uri,
        json!({ "token": "111111", "timetable_id": c.mon_slot }),
        &c.cr,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await["message"],
        "Attendance verified and locked"
    );

    let grid = first_week_grid_session(&pool, &c).await;
    assert_eq!(grid["is_verified_by_faculty"], true);
    let first_stamp = grid["verified_at"].clone();
    assert!(first_stamp.is_string());

    // Verifying again still succeeds and keeps the first timestamp.
    let app = common::build_test_app(pool.clone());
    let response = put_json_auth(
        app,
        &uri,
        json!({ "token": "111111", "timetable_id": c.mon_slot }),
        &c.f1,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let grid = first_week_grid_session(&pool, &c).await;
    assert_eq!(grid["verified_at"], first_stamp);
}

async fn first_week_grid_session(pool: &PgPool, c: &Campus) -> Value {
    let uri = format!(
        "/api/common/week-grid?section_id={}&start_date=2026-03-02&semester=1",
        c.section_id
    );
    let grid = admin_get(pool, c, &uri).await;
    grid[0]["session"].clone()
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_verification_checks_session_and_slot(pool: PgPool) {
    let c = seed_campus(&pool).await;
    let json = record(
        &pool,
        &c.cr,
        json!({ "timetable_id": c.mon_slot, "date": "2026-03-02", "is_free": true }),
    )
    .await;
    let session_id = json["sessionId"].as_i64().unwrap();

    let app = common::build_test_app(pool.clone());
    let response = put_json_auth(
        app,
        "/api/faculty/verify/999999",
        json!({ "token": "111111", "timetable_id": c.mon_slot }),
        &c.f1,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let app = common::build_test_app(pool.clone());
    let response = put_json_auth(
        app,
        &format!("/api/faculty/verify/{session_id}"),
        json!({ "token": "111111", "timetable_id": c.tue_slot }),
        &c.f1,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Admins cannot verify.
    let app = common::build_test_app(pool);
    let response = put_json_auth(
        app,
        &format!("/api/faculty/verify/{session_id}"),
        json!({ "token": "111111", "timetable_id": c.mon_slot }),
        &c.admin,
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_regenerated_key_replaces_old_one(pool: PgPool) {
    let c = seed_campus(&pool).await;
    let json = record(
        &pool,
        &c.cr,
        json!({ "timetable_id": c.mon_slot, "date": "2026-03-02", "is_free": true }),
    )
    .await;
    let uri = format!("/api/faculty/verify/{}", json["sessionId"]);

    let app = common::build_test_app(pool.clone());
    let response = put_auth(app, "/api/faculty/regen-token", &c.f1).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["message"], "New Token Generated");
    let new_key = json["token"].as_str().unwrap().to_string();
    assert_eq!(new_key.len(), 6);
    assert!(new_key.chars().all(|ch| ch.is_ascii_digit()));

    if new_key != "111111" {
        let app = common::build_test_app(pool.clone());
        let response = put_json_auth(
            app,
            &uri,
            json!({ "token": "111111", "timetable_id": c.mon_slot }),
            &c.cr,
        )
        .await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    let app = common::build_test_app(pool.clone());
    let response = put_json_auth(
        app,
        &uri,
        json!({ "token": new_key, "timetable_id": c.mon_slot }),
        &c.cr,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    // Only faculty hold keys.
    let app = common::build_test_app(pool);
    let response = put_auth(app, "/api/faculty/regen-token", &c.cr).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_recorded_attendance_blocks_directory_deletes(pool: PgPool) {
    let c = seed_campus(&pool).await;
    let json = record(
        &pool,
        &c.cr,
        json!({
            "timetable_id": c.mon_slot,
            "date": "2026-03-02",
            "selected_course_code": "CS201",
            "records": marks(&c, &["present", "absent", "present"]),
        }),
    )
    .await;
    let session_id = json["sessionId"].as_i64().unwrap();

    let app = common::build_test_app(pool.clone());
    let response = put_json_auth(
        app,
        &format!("/api/faculty/verify/{session_id}"),
        json!({ "token": "111111", "timetable_id": c.mon_slot }),
        &c.f1,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let app = common::build_test_app(pool.clone());
    let response = delete_auth(
        app,
        &format!("/api/admin/students/{}", c.student_ids[1]),
        &c.admin,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(
        body_json(response).await["error"],
        "Attendance has been recorded for this student"
    );

    let app = common::build_test_app(pool.clone());
    let response = delete_auth(
        app,
        &format!("/api/admin/timetable/{}", c.mon_slot),
        &c.admin,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(
        body_json(response).await["error"],
        "Attendance has been recorded for this timetable slot"
    );

    let app = common::build_test_app(pool.clone());
    let response = delete_auth(
        app,
        &format!("/api/admin/sections/{}", c.section_id),
        &c.admin,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let records = admin_get(
        &pool,
        &c,
        &format!("/api/admin/records-by-session/{session_id}"),
    )
    .await;
    assert_eq!(records.as_array().unwrap().len(), 3);
    let swaps = admin_get(
        &pool,
        &c,
        &format!("/api/admin/swaps-by-timetable/{}", c.mon_slot),
    )
    .await;
    assert_eq!(swaps.as_array().unwrap().len(), 1);
    let sessions = admin_get(
        &pool,
        &c,
        &format!("/api/admin/sessions-by-timetable/{}", c.mon_slot),
    )
    .await;
    assert_eq!(sessions[0]["is_verified_by_faculty"], true);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_unused_slot_and_student_can_be_deleted(pool: PgPool) {
    let c = seed_campus(&pool).await;

    let app = common::build_test_app(pool.clone());
    let response = delete_auth(
        app,
        &format!("/api/admin/timetable/{}", c.tue_slot),
        &c.admin,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let app = common::build_test_app(pool);
    let response = delete_auth(
        app,
        &format!("/api/admin/students/{}", c.outsider_id),
        &c.admin,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

// ---------------------------------------------------------------------------
// Reports and grids
// ---------------------------------------------------------------------------

/// Four CS101 sessions: R001 attends 3, R002 all 4, R003 none. A free
/// session on a fifth Monday is not counted.
async fn seed_four_sessions(pool: &PgPool, c: &Campus) {
    let days = ["2026-03-02", "2026-03-09", "2026-03-16", "2026-03-23"];
    for (i, date) in days.iter().enumerate() {
        let first = if i == 3 { "absent" } else { "present" };
        record(
            pool,
            &c.cr,
            json!({
                "timetable_id": c.mon_slot,
                "date": date,
                "selected_course_code": "CS101",
                "records": marks(c, &[first, "present", "absent"]),
            }),
        )
        .await;
    }
    record(
        pool,
        &c.cr,
        json!({ "timetable_id": c.mon_slot, "date": "2026-03-30", "is_free": true }),
    )
    .await;
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_report_percentages_and_threshold(pool: PgPool) {
    let c = seed_campus(&pool).await;
    seed_four_sessions(&pool, &c).await;
    let base = format!(
        "/api/admin/attendance-report?section_id={}&course_code=CS101",
        c.section_id
    );

    let all = admin_get(&pool, &c, &base).await;
    let all = all.as_array().unwrap();
    assert_eq!(all.len(), 3);
    assert_eq!(all[0]["roll_number"], "R001");
    assert_eq!(all[0]["total"], 4);
    assert_eq!(all[0]["attended"], 3);
    assert_eq!(all[0]["percentage"], 75.0);
    assert_eq!(all[1]["percentage"], 100.0);
    assert_eq!(all[2]["percentage"], 0.0);

    let at_75 = admin_get(&pool, &c, &format!("{base}&threshold=75")).await;
    let rolls: Vec<&str> = at_75
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["roll_number"].as_str().unwrap())
        .collect();
    assert_eq!(rolls, vec!["R003"]);

    let at_76 = admin_get(&pool, &c, &format!("{base}&threshold=76")).await;
    let rolls: Vec<&str> = at_76
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["roll_number"].as_str().unwrap())
        .collect();
    assert_eq!(rolls, vec!["R001", "R003"]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_shortages_use_configured_threshold(pool: PgPool) {
    let c = seed_campus(&pool).await;
    seed_four_sessions(&pool, &c).await;

    let shortages = admin_get(
        &pool,
        &c,
        &format!(
            "/api/admin/attendance-report/shortages?section_id={}&course_code=ALL",
            c.section_id
        ),
    )
    .await;
    let shortages = shortages.as_array().unwrap();
    assert_eq!(shortages.len(), 1);
    assert_eq!(shortages[0]["roll_number"], "R003");

    let app = common::build_test_app(pool);
    let response = get_auth(
        app,
        &format!(
            "/api/admin/attendance-report?section_id={}&threshold=120",
            c.section_id
        ),
        &c.cr,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_week_grid_and_daily_overview(pool: PgPool) {
    let c = seed_campus(&pool).await;
    record(
        &pool,
        &c.cr,
        json!({
            "timetable_id": c.tue_slot,
            "date": "2026-03-03",
            "selected_course_code": "CS201",
            "records": marks(&c, &["present", "absent", "present"]),
        }),
    )
    .await;

    let grid = admin_get(
        &pool,
        &c,
        &format!(
            "/api/common/week-grid?section_id={}&start_date=2026-03-02&semester=1",
            c.section_id
        ),
    )
    .await;
    let grid = grid.as_array().unwrap();
    assert_eq!(grid.len(), 2);
    assert_eq!(grid[0]["day"], "Mon");
    assert_eq!(grid[0]["date"], "2026-03-02");
    assert!(grid[0]["session"].is_null());
    assert_eq!(grid[1]["date"], "2026-03-03");
    assert_eq!(grid[1]["faculty_name"], "F Two");
    assert_eq!(grid[1]["session"]["category"], "normal");
    assert_eq!(grid[1]["session"]["actual_course_name"], "Data Structures");
    assert_eq!(grid[1]["session"]["present_count"], 2);
    assert_eq!(grid[1]["session"]["absent_count"], 1);
    assert_eq!(grid[1]["session"]["total_count"], 3);

    let daily = admin_get(
        &pool,
        &c,
        &format!(
            "/api/admin/daily-attendance-overview?section_id={}&date=2026-03-03&semester=1",
            c.section_id
        ),
    )
    .await;
    let daily = daily.as_array().unwrap();
    assert_eq!(daily.len(), 1);
    assert_eq!(daily[0]["timetable_id"], c.tue_slot);
    assert_eq!(daily[0]["session"]["present_count"], 2);

    // The following Tuesday has no session.
    let next = admin_get(
        &pool,
        &c,
        &format!(
            "/api/admin/daily-attendance-overview?section_id={}&date=2026-03-10&semester=1",
            c.section_id
        ),
    )
    .await;
    assert!(next[0]["session"].is_null());
}
