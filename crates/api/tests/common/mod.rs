#![allow(dead_code)]

use std::sync::Arc;

use attendance_api::auth::jwt::{generate_token, JwtConfig};
use attendance_api::auth::password::hash_password;
use attendance_api::config::ServerConfig;
use attendance_api::router::build_app_router;
use attendance_api::state::AppState;
use attendance_core::roles::{ROLE_ADMIN, ROLE_CR};
use attendance_core::types::DbId;
use attendance_db::models::batch::CreateBatch;
use attendance_db::models::course::CreateCourse;
use attendance_db::models::department::CreateDepartment;
use attendance_db::models::faculty::CreateFacultyProfile;
use attendance_db::models::section::CreateSection;
use attendance_db::models::student::CreateStudent;
use attendance_db::models::timetable::CreateTimetableSlot;
use attendance_db::models::user::CreateUser;
use attendance_db::repositories::{
    BatchRepo, CourseRepo, DepartmentRepo, FacultyRepo, SectionRepo, StudentRepo, TimetableRepo,
    UserRepo,
};
use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

/// Password given to every login the fixtures create.
pub const TEST_PASSWORD: &str = "correct-horse-battery";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        shortage_threshold: 75.0,
        jwt: JwtConfig {
            secret: "integration-test-secret-long-enough".to_string(),
            token_expiry_days: 2,
        },
        bootstrap_admin: None,
    }
}

/// Build the application router exactly as `main.rs` does, on `pool`.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

/// Bearer token for a login, signed with the test secret.
pub fn token_for(user_id: DbId, role: &str, student_id: Option<DbId>) -> String {
    generate_token(user_id, role, student_id, &test_config().jwt).expect("token generation")
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

async fn send(
    app: Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None, None).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::GET, uri, Some(token), None).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, Method::POST, uri, None, Some(body)).await
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    send(app, Method::POST, uri, Some(token), Some(body)).await
}

pub async fn put_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    send(app, Method::PUT, uri, Some(token), Some(body)).await
}

pub async fn put_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::PUT, uri, Some(token), None).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, Some(token), None).await
}

/// Collect a response body as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// An admin login; returns its bearer token.
pub async fn admin_token(pool: &PgPool) -> String {
    let user = UserRepo::create(
        pool,
        &CreateUser {
            email: "admin@college.edu".into(),
            password_hash: hash_password(TEST_PASSWORD).unwrap(),
            role: ROLE_ADMIN.into(),
            student_id: None,
            semester: None,
        },
    )
    .await
    .unwrap();
    token_for(user.id, ROLE_ADMIN, None)
}

/// A seeded section, ready for attendance.
///
/// Section `CSE 2024-28 A`, semester 1, students R001..R003. `f1` (key
/// `111111`) teaches CS101 on Monday slot 1; `f2` (key `222222`) teaches
/// CS201 on Tuesday slot 1. Both faculty and the CR (student R001) have
/// logins. A second section `B` holds student R100.
pub struct Campus {
    pub dept_id: DbId,
    pub section_id: DbId,
    pub other_section_id: DbId,
    pub student_ids: Vec<DbId>,
    pub outsider_id: DbId,
    pub f1_profile: DbId,
    pub f2_profile: DbId,
    pub mon_slot: DbId,
    pub tue_slot: DbId,
    pub admin: String,
    pub cr: String,
    pub f1: String,
    pub f2: String,
}

pub async fn seed_campus(pool: &PgPool) -> Campus {
    let dept = DepartmentRepo::create(
        pool,
        &CreateDepartment {
            name: "Computer Science".into(),
            code: "CSE".into(),
        },
    )
    .await
    .unwrap();
    let batch = BatchRepo::create(
        pool,
        &CreateBatch {
            dept_id: dept.id,
            start_year: 2024,
            end_year: 2028,
            batch_name: "2024-28".into(),
        },
    )
    .await
    .unwrap();

    let mut sections = Vec::new();
    for name in ["A", "B"] {
        let section = SectionRepo::create(
            pool,
            &CreateSection {
                batch_id: batch.id,
                section_name: name.into(),
            },
        )
        .await
        .unwrap();
        sections.push(section.id);
    }

    let mut student_ids = Vec::new();
    for (roll, name) in [("R001", "Asha"), ("R002", "Bilal"), ("R003", "Chen")] {
        let student = StudentRepo::create(
            pool,
            &CreateStudent {
                roll: roll.into(),
                name: name.into(),
                email: format!("{}@college.edu", roll.to_lowercase()),
                section_id: sections[0],
            },
        )
        .await
        .unwrap();
        student_ids.push(student.id);
    }
    let outsider = StudentRepo::create(
        pool,
        &CreateStudent {
            roll: "R100".into(),
            name: "Dana".into(),
            email: "r100@college.edu".into(),
            section_id: sections[1],
        },
    )
    .await
    .unwrap();

    for (code, name) in [("CS101", "Programming"), ("CS201", "Data Structures")] {
        CourseRepo::create(
            pool,
            &CreateCourse {
                code: code.into(),
                name: name.into(),
                credits: 4,
                dept_id: dept.id,
            },
        )
        .await
        .unwrap();
    }

    let password_hash = hash_password(TEST_PASSWORD).unwrap();
    let mut profiles = Vec::new();
    let mut faculty_tokens = Vec::new();
    for (name, email, key) in [
        ("F One", "f1@college.edu", "111111"),
        ("F Two", "f2@college.edu", "222222"),
    ] {
        let profile = FacultyRepo::create(
            pool,
            &CreateFacultyProfile {
                name: name.into(),
                email: email.into(),
                dept_id: dept.id,
                auth_key: None,
            },
            key,
        )
        .await
        .unwrap();
        let user = FacultyRepo::create_login(pool, profile.id, &password_hash)
            .await
            .unwrap()
            .unwrap();
        profiles.push(profile.id);
        faculty_tokens.push(token_for(user.id, "faculty", None));
    }

    let mut slots = Vec::new();
    for (day, course, faculty) in [("Mon", "CS101", profiles[0]), ("Tue", "CS201", profiles[1])] {
        let slot = TimetableRepo::create(
            pool,
            &CreateTimetableSlot {
                section_id: sections[0],
                semester: 1,
                day: day.into(),
                slot_number: 1,
                course_code: course.into(),
                faculty_profile_id: faculty,
                room_info: Some("LH-1".into()),
            },
        )
        .await
        .unwrap();
        slots.push(slot.id);
    }

    let cr_user = UserRepo::create(
        pool,
        &CreateUser {
            email: "r001@college.edu".into(),
            password_hash,
            role: ROLE_CR.into(),
            student_id: Some(student_ids[0]),
            semester: Some(1),
        },
    )
    .await
    .unwrap();

    Campus {
        dept_id: dept.id,
        section_id: sections[0],
        other_section_id: sections[1],
        student_ids: student_ids.clone(),
        outsider_id: outsider.id,
        f1_profile: profiles[0],
        f2_profile: profiles[1],
        mon_slot: slots[0],
        tue_slot: slots[1],
        admin: admin_token(pool).await,
        cr: token_for(cr_user.id, ROLE_CR, Some(student_ids[0])),
        f1: faculty_tokens[0].clone(),
        f2: faculty_tokens[1].clone(),
    }
}
