//! Handlers for `/admin/depts`.

use attendance_core::directory::validate_required;
use attendance_core::types::DbId;
use attendance_db::models::department::{CreateDepartment, Department, UpdateDepartment};
use attendance_db::repositories::DepartmentRepo;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::{can, Require};
use crate::state::AppState;

/// POST /api/admin/depts
pub async fn create(
    Require(admin, _): Require<can::ManageDirectory>,
    State(state): State<AppState>,
    Json(input): Json<CreateDepartment>,
) -> AppResult<(StatusCode, Json<Department>)> {
    validate_required("name", &input.name)?;
    validate_required("code", &input.code)?;

    let dept = DepartmentRepo::create(&state.pool, &input).await?;
    tracing::info!(dept_id = dept.id, user_id = admin.user_id, "Department created");
    Ok((StatusCode::CREATED, Json(dept)))
}

/// GET /api/admin/depts
pub async fn list(
    _auth: Require<can::ViewDirectory>,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<Department>>> {
    let depts = DepartmentRepo::list(&state.pool).await?;
    Ok(Json(depts))
}

/// PUT /api/admin/depts/{id}
pub async fn update(
    Require(admin, _): Require<can::ManageDirectory>,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateDepartment>,
) -> AppResult<Json<Department>> {
    if let Some(name) = &input.name {
        validate_required("name", name)?;
    }
    if let Some(code) = &input.code {
        validate_required("code", code)?;
    }

    let dept = DepartmentRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| AppError::not_found("Department", id))?;
    tracing::info!(dept_id = id, user_id = admin.user_id, "Department updated");
    Ok(Json(dept))
}

/// DELETE /api/admin/depts/{id}
///
/// Cascades to batches; fails with 409 while courses or faculty remain.
pub async fn delete(
    Require(admin, _): Require<can::ManageDirectory>,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !DepartmentRepo::delete(&state.pool, id).await? {
        return Err(AppError::not_found("Department", id));
    }
    tracing::info!(dept_id = id, user_id = admin.user_id, "Department deleted");
    Ok(StatusCode::NO_CONTENT)
}
