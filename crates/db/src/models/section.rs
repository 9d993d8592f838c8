//! Section (class division within a batch) entity model and DTOs.

use attendance_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `sections` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Section {
    pub id: DbId,
    pub batch_id: DbId,
    pub section_name: String,
    pub created_at: Timestamp,
}

/// Section listing row, joined with its batch name.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SectionListing {
    pub id: DbId,
    pub batch_id: DbId,
    pub batch_name: String,
    pub section_name: String,
}

/// DTO for creating a section.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateSection {
    pub batch_id: DbId,
    pub section_name: String,
}

/// DTO for updating a section.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateSection {
    pub batch_id: Option<DbId>,
    pub section_name: Option<String>,
}
