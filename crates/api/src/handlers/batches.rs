//! Handlers for `/admin/batches`.

use attendance_core::directory::{validate_batch_years, validate_required};
use attendance_core::types::DbId;
use attendance_db::models::batch::{Batch, BatchListing, CreateBatch, UpdateBatch};
use attendance_db::repositories::BatchRepo;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::{can, Require};
use crate::state::AppState;

/// POST /api/admin/batches
pub async fn create(
    Require(admin, _): Require<can::ManageDirectory>,
    State(state): State<AppState>,
    Json(input): Json<CreateBatch>,
) -> AppResult<(StatusCode, Json<Batch>)> {
    validate_required("batch_name", &input.batch_name)?;
    validate_batch_years(input.start_year, input.end_year)?;

    let batch = BatchRepo::create(&state.pool, &input).await?;
    tracing::info!(batch_id = batch.id, user_id = admin.user_id, "Batch created");
    Ok((StatusCode::CREATED, Json(batch)))
}

/// GET /api/admin/batches
pub async fn list(
    _auth: Require<can::ViewDirectory>,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<BatchListing>>> {
    Ok(Json(BatchRepo::list(&state.pool).await?))
}

/// PUT /api/admin/batches/{id}
///
/// Year order is checked here when both years are given, and by the
/// database otherwise.
pub async fn update(
    Require(admin, _): Require<can::ManageDirectory>,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateBatch>,
) -> AppResult<Json<Batch>> {
    if let (Some(start), Some(end)) = (input.start_year, input.end_year) {
        validate_batch_years(start, end)?;
    }
    if let Some(name) = &input.batch_name {
        validate_required("batch_name", name)?;
    }

    let batch = BatchRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| AppError::not_found("Batch", id))?;
    tracing::info!(batch_id = id, user_id = admin.user_id, "Batch updated");
    Ok(Json(batch))
}

/// DELETE /api/admin/batches/{id}
pub async fn delete(
    Require(admin, _): Require<can::ManageDirectory>,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !BatchRepo::delete(&state.pool, id).await? {
        return Err(AppError::not_found("Batch", id));
    }
    tracing::info!(batch_id = id, user_id = admin.user_id, "Batch deleted");
    Ok(StatusCode::NO_CONTENT)
}
