//! Input validation for directory entities (departments, batches, sections,
//! faculty, students, courses, timetable slots) and the logins attached to
//! them.

use validator::Validate;

use crate::calendar;
use crate::error::CoreError;

/// Minimum accepted password length for new logins.
pub const MIN_PASSWORD_LENGTH: u64 = 8;

/// Semester assigned to a promoted CR when none is given.
pub const DEFAULT_CR_SEMESTER: i32 = 1;

/// Highest semester number accepted on timetable slots and CR logins.
pub const MAX_SEMESTER: i32 = 12;

/// Highest slot number accepted on timetable slots.
pub const MAX_SLOT_NUMBER: i32 = 16;

/// Email + password pair for a new login.
#[derive(Debug, Validate)]
pub struct NewLogin {
    #[validate(email(message = "must be a valid email address"))]
    pub email: String,
    /// At least [`MIN_PASSWORD_LENGTH`] characters.
    #[validate(length(min = 8, message = "is too short"))]
    pub password: String,
}

impl NewLogin {
    /// Validate, converting field errors into a single [`CoreError::Validation`].
    pub fn check(&self) -> Result<(), CoreError> {
        self.validate()
            .map_err(|errors| CoreError::Validation(errors.to_string()))
    }
}

/// A contact email on a faculty profile or student.
#[derive(Debug, Validate)]
struct ContactEmail {
    #[validate(email)]
    email: String,
}

/// Reject malformed email addresses.
pub fn validate_email(email: &str) -> Result<(), CoreError> {
    ContactEmail {
        email: email.to_string(),
    }
    .validate()
    .map_err(|_| CoreError::Validation(format!("Invalid email address '{email}'")))
}

/// Reject empty or whitespace-only required text fields.
pub fn validate_required(field: &str, value: &str) -> Result<(), CoreError> {
    if value.trim().is_empty() {
        return Err(CoreError::Validation(format!("{field} must not be empty")));
    }
    Ok(())
}

/// Semesters are numbered from 1.
pub fn validate_semester(semester: i32) -> Result<(), CoreError> {
    if !(1..=MAX_SEMESTER).contains(&semester) {
        return Err(CoreError::Validation(format!(
            "semester must be between 1 and {MAX_SEMESTER}, got {semester}"
        )));
    }
    Ok(())
}

/// Batches cannot end before they start.
pub fn validate_batch_years(start_year: i32, end_year: i32) -> Result<(), CoreError> {
    if end_year < start_year {
        return Err(CoreError::Validation(format!(
            "end_year ({end_year}) must not precede start_year ({start_year})"
        )));
    }
    Ok(())
}

/// Slots are numbered from 1 within a day.
pub fn validate_slot_number(slot_number: i32) -> Result<(), CoreError> {
    if !(1..=MAX_SLOT_NUMBER).contains(&slot_number) {
        return Err(CoreError::Validation(format!(
            "slot must be between 1 and {MAX_SLOT_NUMBER}, got {slot_number}"
        )));
    }
    Ok(())
}

/// Validate the cell coordinates of a timetable slot.
pub fn validate_slot(semester: i32, day: &str, slot_number: i32) -> Result<(), CoreError> {
    validate_semester(semester)?;
    calendar::validate_day(day)?;
    validate_slot_number(slot_number)
}
