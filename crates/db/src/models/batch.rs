//! Batch (intake year group) entity model and DTOs.

use attendance_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `batches` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Batch {
    pub id: DbId,
    pub dept_id: DbId,
    pub start_year: i32,
    pub end_year: i32,
    pub batch_name: String,
    pub created_at: Timestamp,
}

/// Batch listing row, joined with its department code.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct BatchListing {
    pub id: DbId,
    pub dept_id: DbId,
    pub dept_code: String,
    pub start_year: i32,
    pub end_year: i32,
    pub batch_name: String,
}

/// DTO for creating a batch.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateBatch {
    pub dept_id: DbId,
    pub start_year: i32,
    pub end_year: i32,
    pub batch_name: String,
}

/// DTO for updating a batch. All fields are optional.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateBatch {
    pub dept_id: Option<DbId>,
    pub start_year: Option<i32>,
    pub end_year: Option<i32>,
    pub batch_name: Option<String>,
}
