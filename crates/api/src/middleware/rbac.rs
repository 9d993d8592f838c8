//! Role-based access control (RBAC) extractors.
//!
//! [`Require<G>`] wraps [`AuthUser`] and rejects requests whose role is not in
//! the allow-list of `G::OPERATION`. Guard types live in [`can`], so handler
//! signatures read as `Require<can::RecordAttendance>`.

use std::marker::PhantomData;

use attendance_core::capabilities::{authorize, Operation};
use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// Associates a marker type with the operation it guards.
pub trait Guard {
    const OPERATION: Operation;
}

/// Requires a role permitted for `G::OPERATION`.
///
/// Missing or invalid tokens are rejected with 401 before the role check;
/// disallowed roles with 403.
///
/// ```ignore
/// async fn record(Require(user, _): Require<can::RecordAttendance>) -> AppResult<Json<()>> {
///     Ok(Json(()))
/// }
/// ```
pub struct Require<G: Guard>(pub AuthUser, pub PhantomData<G>);

impl<G> FromRequestParts<AppState> for Require<G>
where
    G: Guard + Send,
{
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        authorize(G::OPERATION, user.role)?;
        Ok(Require(user, PhantomData))
    }
}

/// Guard marker types, one per [`Operation`].
pub mod can {
    use super::{Guard, Operation};

    macro_rules! guards {
        ($($name:ident),* $(,)?) => {
            $(
                #[doc = concat!("Guard for [`Operation::", stringify!($name), "`].")]
                pub struct $name;

                impl Guard for $name {
                    const OPERATION: Operation = Operation::$name;
                }
            )*
        };
    }

    guards!(
        ManageDirectory,
        ViewDirectory,
        RecordAttendance,
        VerifySession,
        RegenerateToken,
        ViewReports,
        AuditSessions,
        ViewSectionRoster,
        ViewOwnCourses,
        ViewFacultySchedule,
        ViewAnyFacultySchedule,
        ViewColleagueTimetables,
    );
}
