//! Repository for the `batches` table.

use attendance_core::types::DbId;
use sqlx::PgPool;

use crate::models::batch::{Batch, BatchListing, CreateBatch, UpdateBatch};

const COLUMNS: &str = "id, dept_id, start_year, end_year, batch_name, created_at";

/// Provides CRUD operations for batches.
pub struct BatchRepo;

impl BatchRepo {
    /// Insert a new batch, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateBatch) -> Result<Batch, sqlx::Error> {
        let query = format!(
            "INSERT INTO batches (dept_id, start_year, end_year, batch_name)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Batch>(&query)
            .bind(input.dept_id)
            .bind(input.start_year)
            .bind(input.end_year)
            .bind(&input.batch_name)
            .fetch_one(pool)
            .await
    }

    /// List batches with their department code, newest intake first.
    pub async fn list(pool: &PgPool) -> Result<Vec<BatchListing>, sqlx::Error> {
        sqlx::query_as::<_, BatchListing>(
            "SELECT b.id, b.dept_id, d.dept_code, b.start_year, b.end_year, b.batch_name
             FROM batches b
             JOIN departments d ON d.id = b.dept_id
             ORDER BY b.start_year DESC, d.dept_code",
        )
        .fetch_all(pool)
        .await
    }

    /// Update a batch. Returns `None` if no row with `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateBatch,
    ) -> Result<Option<Batch>, sqlx::Error> {
        let query = format!(
            "UPDATE batches SET
                dept_id = COALESCE($2, dept_id),
                start_year = COALESCE($3, start_year),
                end_year = COALESCE($4, end_year),
                batch_name = COALESCE($5, batch_name)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Batch>(&query)
            .bind(id)
            .bind(input.dept_id)
            .bind(input.start_year)
            .bind(input.end_year)
            .bind(&input.batch_name)
            .fetch_optional(pool)
            .await
    }

    /// Delete a batch. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM batches WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
