//! Handlers for `/admin/sections`.

use attendance_core::directory::validate_required;
use attendance_core::types::DbId;
use attendance_db::models::section::{CreateSection, Section, SectionListing, UpdateSection};
use attendance_db::repositories::SectionRepo;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::{can, Require};
use crate::state::AppState;

/// POST /api/admin/sections
pub async fn create(
    Require(admin, _): Require<can::ManageDirectory>,
    State(state): State<AppState>,
    Json(input): Json<CreateSection>,
) -> AppResult<(StatusCode, Json<Section>)> {
    validate_required("section_name", &input.section_name)?;

    let section = SectionRepo::create(&state.pool, &input).await?;
    tracing::info!(section_id = section.id, user_id = admin.user_id, "Section created");
    Ok((StatusCode::CREATED, Json(section)))
}

/// GET /api/admin/sections
pub async fn list(
    _auth: Require<can::ViewDirectory>,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<SectionListing>>> {
    Ok(Json(SectionRepo::list(&state.pool).await?))
}

/// PUT /api/admin/sections/{id}
pub async fn update(
    Require(admin, _): Require<can::ManageDirectory>,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateSection>,
) -> AppResult<Json<Section>> {
    if let Some(name) = &input.section_name {
        validate_required("section_name", name)?;
    }

    let section = SectionRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| AppError::not_found("Section", id))?;
    tracing::info!(section_id = id, user_id = admin.user_id, "Section updated");
    Ok(Json(section))
}

/// DELETE /api/admin/sections/{id}
pub async fn delete(
    Require(admin, _): Require<can::ManageDirectory>,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !SectionRepo::delete(&state.pool, id).await? {
        return Err(AppError::not_found("Section", id));
    }
    tracing::info!(section_id = id, user_id = admin.user_id, "Section deleted");
    Ok(StatusCode::NO_CONTENT)
}
