//! Authentication and authorization extractors.
//!
//! - [`auth::AuthUser`] -- Extracts the authenticated user from a JWT Bearer token.
//! - [`rbac::Require`] -- Checks the user's role against the capability table
//!   for the operation named by its guard type.

pub mod auth;
pub mod rbac;
