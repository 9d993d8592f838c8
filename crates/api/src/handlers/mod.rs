//! Request handlers.
//!
//! Each submodule groups the async handler functions for one area of the
//! service. Handlers authorize through the [`Require`](crate::middleware::rbac::Require)
//! extractor, delegate persistence to the `attendance_db` repositories, and
//! map errors via [`AppError`](crate::error::AppError).

pub mod attendance;
pub mod audit;
pub mod auth;
pub mod batches;
pub mod courses;
pub mod departments;
pub mod faculty;
pub mod grid;
pub mod reports;
pub mod rosters;
pub mod schedule;
pub mod sections;
pub mod students;
pub mod timetable;
pub mod verification;

use attendance_core::directory::NewLogin;
use attendance_core::types::DbId;
use serde::Serialize;

use crate::auth::password::hash_password;
use crate::error::{AppError, AppResult};

/// Validate a new login's credentials and hash its password.
pub(crate) fn hash_new_login(email: &str, password: &str) -> AppResult<String> {
    NewLogin {
        email: email.to_string(),
        password: password.to_string(),
    }
    .check()?;

    hash_password(password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))
}

/// Response for endpoints that attach a login to a directory entry.
#[derive(Debug, Serialize)]
pub struct LoginCreated {
    pub message: &'static str,
    pub user_id: DbId,
}
