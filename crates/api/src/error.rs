//! HTTP error type and its JSON rendering.
//!
//! Every failure leaves the service as `{"error": <message>, "code": <CODE>}`.
//! Store constraint violations are translated into the domain outcome they
//! stand for, so a duplicate attendance session reads as a conflict on that
//! slot and date rather than as a raw SQLSTATE.

use attendance_core::error::CoreError;
use attendance_core::types::DbId;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

/// Error returned by every handler and extractor.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Domain failure raised by `attendance_core` rules.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Failure reported by the store.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Malformed request parameters.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// No route matches the request path.
    #[error("Route not found: {0}")]
    UnknownRoute(String),

    /// Failure in the service itself; the detail is logged, never returned.
    #[error("Internal error: {0}")]
    InternalError(String),
}

pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// A missing row addressed by numeric id.
    pub fn not_found(entity: &'static str, id: DbId) -> Self {
        AppError::Core(CoreError::NotFound { entity, id })
    }
}

/// Wire shape of an error response.
#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
    code: &'static str,
}

/// Status, machine code and client-facing message for one failure.
struct Rendered {
    status: StatusCode,
    code: &'static str,
    message: String,
}

impl Rendered {
    fn new(status: StatusCode, code: &'static str, message: impl Into<String>) -> Self {
        Self {
            status,
            code,
            message: message.into(),
        }
    }

    fn internal() -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            "INTERNAL_ERROR",
            "An internal error occurred",
        )
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let rendered = match &self {
            AppError::Core(core) => render_core(core),
            AppError::Database(err) => render_sqlx(err),
            AppError::BadRequest(msg) => {
                Rendered::new(StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone())
            }
            AppError::UnknownRoute(path) => Rendered::new(
                StatusCode::NOT_FOUND,
                "NOT_FOUND",
                format!("No route for {path}"),
            ),
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                Rendered::internal()
            }
        };

        let body = ErrorBody {
            error: rendered.message,
            code: rendered.code,
        };
        (rendered.status, Json(body)).into_response()
    }
}

fn render_core(err: &CoreError) -> Rendered {
    match err {
        CoreError::NotFound { entity, id } => Rendered::new(
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            format!("{entity} with id {id} not found"),
        ),
        CoreError::NotFoundByCode { entity, code } => Rendered::new(
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            format!("{entity} with code {code} not found"),
        ),
        CoreError::Validation(msg) => {
            Rendered::new(StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
        }
        CoreError::Conflict(msg) => Rendered::new(StatusCode::CONFLICT, "CONFLICT", msg.clone()),
        CoreError::Unauthorized(msg) => {
            Rendered::new(StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone())
        }
        CoreError::Forbidden(msg) => Rendered::new(StatusCode::FORBIDDEN, "FORBIDDEN", msg.clone()),
        CoreError::Internal(msg) => {
            tracing::error!(error = %msg, "Internal core error");
            Rendered::internal()
        }
    }
}

// ---------------------------------------------------------------------------
// Store errors
// ---------------------------------------------------------------------------

const PG_UNIQUE_VIOLATION: &str = "23505";
const PG_FOREIGN_KEY_VIOLATION: &str = "23503";
const PG_CHECK_VIOLATION: &str = "23514";

/// Client-facing wording for the unique constraints in the schema.
const UNIQUE_MESSAGES: &[(&str, &str)] = &[
    (
        "uq_attendance_sessions_timetable_date",
        "Attendance has already been recorded for this slot and date",
    ),
    (
        "uq_attendance_records_session_student",
        "A student appears more than once in this session",
    ),
    (
        "uq_timetable_cell",
        "This section already has a class in that day and slot for the semester",
    ),
    ("uq_departments_dept_code", "Department code is already in use"),
    ("uq_students_roll_number", "Roll number is already in use"),
    ("uq_users_email", "A login already exists for this email"),
    ("uq_users_student_id", "This student already has a login"),
    ("uq_faculty_profiles_email", "Faculty email is already in use"),
    ("uq_faculty_profiles_user_id", "This login is already linked to a faculty profile"),
];

/// Client-facing wording for foreign keys that guard recorded attendance.
const IN_USE_MESSAGES: &[(&str, &str)] = &[
    (
        "fk_attendance_sessions_timetable",
        "Attendance has been recorded for this timetable slot",
    ),
    (
        "fk_class_swaps_timetable",
        "Attendance has been recorded for this timetable slot",
    ),
    (
        "fk_attendance_records_student",
        "Attendance has been recorded for this student",
    ),
    (
        "fk_attendance_sessions_course",
        "Attendance has been recorded for this course",
    ),
    (
        "fk_class_swaps_requesting",
        "This faculty member appears in the class swap log",
    ),
    (
        "fk_class_swaps_target",
        "This faculty member appears in the class swap log",
    ),
];

fn foreign_key_message(constraint: &str) -> String {
    IN_USE_MESSAGES
        .iter()
        .find(|(name, _)| *name == constraint)
        .map(|(_, msg)| (*msg).to_string())
        .unwrap_or_else(|| format!("Referenced row is missing or still in use: {constraint}"))
}

fn unique_message(constraint: &str) -> String {
    UNIQUE_MESSAGES
        .iter()
        .find(|(name, _)| *name == constraint)
        .map(|(_, msg)| (*msg).to_string())
        .unwrap_or_else(|| format!("Duplicate value violates unique constraint: {constraint}"))
}

/// Map a store error onto the HTTP taxonomy.
///
/// Unique violations on `uq_*` constraints and all foreign-key violations
/// are 409; check violations are 400; anything else is a sanitized 500.
fn render_sqlx(err: &sqlx::Error) -> Rendered {
    let db_err = match err {
        sqlx::Error::RowNotFound => {
            return Rendered::new(StatusCode::NOT_FOUND, "NOT_FOUND", "Resource not found")
        }
        sqlx::Error::Database(db_err) => db_err,
        other => {
            tracing::error!(error = %other, "Database error");
            return Rendered::internal();
        }
    };

    let constraint = db_err.constraint().unwrap_or("unknown");
    match db_err.code().as_deref() {
        Some(PG_UNIQUE_VIOLATION) if constraint.starts_with("uq_") => {
            Rendered::new(StatusCode::CONFLICT, "CONFLICT", unique_message(constraint))
        }
        Some(PG_FOREIGN_KEY_VIOLATION) => Rendered::new(
            StatusCode::CONFLICT,
            "CONFLICT",
            foreign_key_message(constraint),
        ),
        Some(PG_CHECK_VIOLATION) => Rendered::new(
            StatusCode::BAD_REQUEST,
            "VALIDATION_ERROR",
            format!("Value violates check constraint: {constraint}"),
        ),
        _ => {
            tracing::error!(error = %db_err, "Database error");
            Rendered::internal()
        }
    }
}
