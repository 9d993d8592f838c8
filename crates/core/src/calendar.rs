//! Weekday names and the day-to-date arithmetic used by grid views.
//!
//! Timetable slots store their weekday as a three-letter abbreviation
//! (`Mon` .. `Sun`). The week grid maps each slot to a concrete date by
//! offsetting from the supplied week start; only Monday to Friday have
//! offsets, every other day maps to the start date itself.

use chrono::{Datelike, Duration, Weekday};

use crate::error::CoreError;
use crate::types::Date;

/// Valid weekday abbreviations, in calendar order.
pub const DAY_NAMES: &[&str] = &["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

/// Highest offset a grid slot can have (Friday).
pub const MAX_WEEK_OFFSET: i64 = 4;

/// Reject anything that is not one of [`DAY_NAMES`].
pub fn validate_day(day: &str) -> Result<(), CoreError> {
    if DAY_NAMES.contains(&day) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid day '{day}'. Must be one of: {}",
            DAY_NAMES.join(", ")
        )))
    }
}

/// Offset in days from the week start for a slot on `day`.
///
/// Saturday, Sunday, and unrecognised values are not mapped and yield 0.
pub fn week_offset(day: &str) -> i64 {
    match day {
        "Mon" => 0,
        "Tue" => 1,
        "Wed" => 2,
        "Thu" => 3,
        "Fri" => 4,
        _ => 0,
    }
}

/// Concrete date of a slot on `day` in the week starting at `week_start`.
pub fn slot_date(week_start: Date, day: &str) -> Date {
    week_start + Duration::days(week_offset(day))
}

/// Last date a week-grid session can fall on.
pub fn week_end(week_start: Date) -> Date {
    week_start + Duration::days(MAX_WEEK_OFFSET)
}

/// Three-letter weekday abbreviation for a date.
pub fn day_abbrev(date: Date) -> &'static str {
    match date.weekday() {
        Weekday::Mon => "Mon",
        Weekday::Tue => "Tue",
        Weekday::Wed => "Wed",
        Weekday::Thu => "Thu",
        Weekday::Fri => "Fri",
        Weekday::Sat => "Sat",
        Weekday::Sun => "Sun",
    }
}

/// Sort key placing Monday first; unknown values sort last.
pub fn day_order(day: &str) -> usize {
    DAY_NAMES
        .iter()
        .position(|d| *d == day)
        .unwrap_or(DAY_NAMES.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> Date {
        Date::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn weekdays_offset_from_start() {
        let monday = date(2026, 3, 2);
        assert_eq!(slot_date(monday, "Mon"), monday);
        assert_eq!(slot_date(monday, "Wed"), date(2026, 3, 4));
        assert_eq!(slot_date(monday, "Fri"), date(2026, 3, 6));
    }

    #[test]
    fn weekend_slots_are_not_offset() {
        let monday = date(2026, 3, 2);
        assert_eq!(slot_date(monday, "Sat"), monday);
        assert_eq!(slot_date(monday, "Sun"), monday);
    }

    #[test]
    fn week_end_is_friday() {
        assert_eq!(week_end(date(2026, 3, 2)), date(2026, 3, 6));
    }

    #[test]
    fn abbreviations_match_calendar() {
        assert_eq!(day_abbrev(date(2026, 3, 2)), "Mon");
        assert_eq!(day_abbrev(date(2026, 3, 7)), "Sat");
        assert_eq!(day_abbrev(date(2026, 3, 8)), "Sun");
    }

    #[test]
    fn day_validation() {
        assert!(validate_day("Thu").is_ok());
        assert!(validate_day("thu").is_err());
        assert!(validate_day("Thursday").is_err());
    }

    #[test]
    fn ordering_starts_monday() {
        assert!(day_order("Mon") < day_order("Tue"));
        assert!(day_order("Sat") < day_order("Sun"));
        assert_eq!(day_order("Holiday"), DAY_NAMES.len());
    }
}
