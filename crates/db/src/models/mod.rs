//! Row structs and DTOs, one module per table (or closely related group).

pub mod attendance;
pub mod batch;
pub mod class_swap;
pub mod course;
pub mod department;
pub mod faculty;
pub mod report;
pub mod section;
pub mod student;
pub mod timetable;
pub mod user;
