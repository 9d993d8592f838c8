//! Domain logic for the attendance service.
//!
//! Nothing in this crate performs I/O. The `db` crate loads rows and the
//! `api` crate orchestrates; the rules for classifying sessions, resolving
//! swap targets, checking verification keys, and computing shortage reports
//! live here so they can be tested in isolation.

pub mod attendance;
pub mod calendar;
pub mod capabilities;
pub mod directory;
pub mod error;
pub mod report;
pub mod roles;
pub mod types;
pub mod verification;
