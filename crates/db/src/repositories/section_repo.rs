//! Repository for the `sections` table.

use attendance_core::types::DbId;
use sqlx::PgPool;

use crate::models::section::{CreateSection, Section, SectionListing, UpdateSection};

const COLUMNS: &str = "id, batch_id, section_name, created_at";

/// Provides CRUD operations for sections.
pub struct SectionRepo;

impl SectionRepo {
    /// Insert a new section, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateSection) -> Result<Section, sqlx::Error> {
        let query = format!(
            "INSERT INTO sections (batch_id, section_name)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Section>(&query)
            .bind(input.batch_id)
            .bind(&input.section_name)
            .fetch_one(pool)
            .await
    }

    /// List sections with their batch name.
    pub async fn list(pool: &PgPool) -> Result<Vec<SectionListing>, sqlx::Error> {
        sqlx::query_as::<_, SectionListing>(
            "SELECT s.id, s.batch_id, b.batch_name, s.section_name
             FROM sections s
             JOIN batches b ON b.id = s.batch_id
             ORDER BY b.batch_name, s.section_name",
        )
        .fetch_all(pool)
        .await
    }

    /// Update a section. Returns `None` if no row with `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateSection,
    ) -> Result<Option<Section>, sqlx::Error> {
        let query = format!(
            "UPDATE sections SET
                batch_id = COALESCE($2, batch_id),
                section_name = COALESCE($3, section_name)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Section>(&query)
            .bind(id)
            .bind(input.batch_id)
            .bind(&input.section_name)
            .fetch_optional(pool)
            .await
    }

    /// Delete a section with its students and slots. Returns `true` if a row was removed.
    ///
    /// Fails like [`super::TimetableRepo::delete`] when attendance exists.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM sections WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
