//! Operation-level access control.
//!
//! Every protected operation is listed once in [`PERMISSIONS`] together with
//! the roles allowed to perform it. The API layer enforces the table through
//! a single generic extractor instead of per-handler role comparisons.

use crate::error::CoreError;
use crate::roles::Role;
use crate::roles::Role::{Admin, Cr, Faculty};

/// A protected operation exposed by the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// Create, update, or delete directory entities and logins.
    ManageDirectory,
    /// Read directory listings and timetables.
    ViewDirectory,
    /// Record an attendance session for a timetable slot.
    RecordAttendance,
    /// Lock a session with the scheduled faculty's authorization key.
    VerifySession,
    /// Rotate the caller's own authorization key.
    RegenerateToken,
    /// Attendance reports, daily overview, and week grid.
    ViewReports,
    /// Inspect recorded sessions and their records per slot.
    AuditSessions,
    /// List the students of a section for marking.
    ViewSectionRoster,
    /// List the courses timetabled for the caller's own section.
    ViewOwnCourses,
    /// View the caller's own teaching schedule.
    ViewFacultySchedule,
    /// View the teaching schedule of an arbitrary faculty member.
    ViewAnyFacultySchedule,
    /// View the full timetables of every class the caller teaches.
    ViewColleagueTimetables,
}

/// The allow-list for every operation.
pub const PERMISSIONS: &[(Operation, &[Role])] = &[
    (Operation::ManageDirectory, &[Admin]),
    (Operation::ViewDirectory, &[Admin, Faculty, Cr]),
    (Operation::RecordAttendance, &[Cr, Faculty, Admin]),
    (Operation::VerifySession, &[Cr, Faculty]),
    (Operation::RegenerateToken, &[Faculty]),
    (Operation::ViewReports, &[Admin, Faculty, Cr]),
    (Operation::AuditSessions, &[Admin]),
    (Operation::ViewSectionRoster, &[Cr, Admin]),
    (Operation::ViewOwnCourses, &[Cr]),
    (Operation::ViewFacultySchedule, &[Faculty, Admin]),
    (Operation::ViewAnyFacultySchedule, &[Admin]),
    (Operation::ViewColleagueTimetables, &[Faculty]),
];

impl Operation {
    /// Roles allowed to perform this operation.
    pub fn allowed_roles(self) -> &'static [Role] {
        PERMISSIONS
            .iter()
            .find(|(op, _)| *op == self)
            .map(|(_, roles)| *roles)
            .unwrap_or(&[])
    }

    /// Whether `role` may perform this operation.
    pub fn permits(self, role: Role) -> bool {
        self.allowed_roles().contains(&role)
    }
}

/// Check `role` against the allow-list for `op`.
pub fn authorize(op: Operation, role: Role) -> Result<(), CoreError> {
    if op.permits(role) {
        return Ok(());
    }
    let allowed: Vec<&str> = op.allowed_roles().iter().map(Role::as_str).collect();
    Err(CoreError::Forbidden(format!(
        "Access denied: requires one of [{}]",
        allowed.join(", ")
    )))
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    const ALL_OPERATIONS: &[Operation] = &[
        Operation::ManageDirectory,
        Operation::ViewDirectory,
        Operation::RecordAttendance,
        Operation::VerifySession,
        Operation::RegenerateToken,
        Operation::ViewReports,
        Operation::AuditSessions,
        Operation::ViewSectionRoster,
        Operation::ViewOwnCourses,
        Operation::ViewFacultySchedule,
        Operation::ViewAnyFacultySchedule,
        Operation::ViewColleagueTimetables,
    ];

    #[test]
    fn every_operation_has_an_entry() {
        for op in ALL_OPERATIONS {
            assert!(
                !op.allowed_roles().is_empty(),
                "{op:?} has no allowed roles"
            );
        }
        assert_eq!(PERMISSIONS.len(), ALL_OPERATIONS.len());
    }

    #[test]
    fn recording_is_open_to_all_three_roles() {
        assert!(Operation::RecordAttendance.permits(Role::Cr));
        assert!(Operation::RecordAttendance.permits(Role::Faculty));
        assert!(Operation::RecordAttendance.permits(Role::Admin));
    }

    #[test]
    fn verification_excludes_admin() {
        assert!(Operation::VerifySession.permits(Role::Cr));
        assert!(Operation::VerifySession.permits(Role::Faculty));
        assert!(!Operation::VerifySession.permits(Role::Admin));
    }

    #[test]
    fn only_faculty_regenerates_tokens() {
        assert!(Operation::RegenerateToken.permits(Role::Faculty));
        assert!(!Operation::RegenerateToken.permits(Role::Admin));
        assert!(!Operation::RegenerateToken.permits(Role::Cr));
    }

    #[test]
    fn directory_writes_are_admin_only() {
        assert!(authorize(Operation::ManageDirectory, Role::Admin).is_ok());
        assert_matches!(
            authorize(Operation::ManageDirectory, Role::Faculty),
            Err(CoreError::Forbidden(msg)) if msg.contains("admin")
        );
    }
}
