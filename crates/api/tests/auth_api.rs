//! Login, bearer-token handling, and role checks.

mod common;

use attendance_api::config::BootstrapAdmin;
use attendance_api::handlers::auth::ensure_bootstrap_admin;
use axum::http::StatusCode;
use common::{body_json, get, get_auth, post_json, seed_campus, TEST_PASSWORD};
use serde_json::json;
use sqlx::PgPool;

#[sqlx::test(migrations = "../../db/migrations")]
async fn login_returns_token_and_role(pool: PgPool) {
    seed_campus(&pool).await;

    let app = common::build_test_app(pool.clone());
    let response = post_json(
        app,
        "/api/login",
        json!({ "email": "r001@college.edu", "password": TEST_PASSWORD }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["role"], "cr");
    assert_eq!(json["expires_in"], 2 * 24 * 60 * 60);
    let token = json["token"].as_str().unwrap().to_string();

    // The issued token opens CR routes.
    let app = common::build_test_app(pool);
    let response = get_auth(app, "/api/cr/my-courses", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn wrong_password_and_unknown_email_look_the_same(pool: PgPool) {
    seed_campus(&pool).await;

    let app = common::build_test_app(pool.clone());
    let wrong = post_json(
        app,
        "/api/login",
        json!({ "email": "f1@college.edu", "password": "not-the-password" }),
    )
    .await;
    assert_eq!(wrong.status(), StatusCode::UNAUTHORIZED);
    let wrong = body_json(wrong).await;

    let app = common::build_test_app(pool);
    let unknown = post_json(
        app,
        "/api/login",
        json!({ "email": "nobody@college.edu", "password": TEST_PASSWORD }),
    )
    .await;
    assert_eq!(unknown.status(), StatusCode::UNAUTHORIZED);
    let unknown = body_json(unknown).await;

    assert_eq!(wrong["error"], "Invalid email or password");
    assert_eq!(wrong, unknown);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn protected_route_requires_token(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/api/admin/depts").await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(response).await["code"], "UNAUTHORIZED");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn garbage_token_is_rejected(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get_auth(app, "/api/admin/depts", "not.a.jwt").await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn roles_are_checked_per_operation(pool: PgPool) {
    let c = seed_campus(&pool).await;

    // CR on an admin-only audit.
    let app = common::build_test_app(pool.clone());
    let response = get_auth(
        app,
        &format!("/api/admin/sessions-by-timetable/{}", c.mon_slot),
        &c.cr,
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(body_json(response).await["code"], "FORBIDDEN");

    // Faculty cannot list a section roster.
    let app = common::build_test_app(pool.clone());
    let response = get_auth(
        app,
        &format!("/api/cr/students-by-timetable/{}", c.mon_slot),
        &c.f1,
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    // Directory listings are open to every role.
    let app = common::build_test_app(pool);
    let response = get_auth(app, "/api/admin/depts", &c.f1).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn bootstrap_admin_is_created_once(pool: PgPool) {
    let admin = BootstrapAdmin {
        email: "root@college.edu".into(),
        password: TEST_PASSWORD.into(),
    };

    assert!(ensure_bootstrap_admin(&pool, &admin).await.unwrap());
    assert!(!ensure_bootstrap_admin(&pool, &admin).await.unwrap());

    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/login",
        json!({ "email": "root@college.edu", "password": TEST_PASSWORD }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["role"], "admin");
}
