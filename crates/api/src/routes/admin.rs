//! Admin user-management routes.

use axum::{extract::State, http::StatusCode, Json};
use domain::models::User;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::{Admin, PathId};
use crate::services::AdminService;

/// GET /api/v1/admin/users
pub async fn list_users(
    State(state): State<AppState>,
    Admin(identity): Admin,
) -> Result<Json<Vec<User>>, ApiError> {
    let users = AdminService::new(state.pool.clone())
        .list_users(&identity)
        .await?;
    Ok(Json(users))
}

/// DELETE /api/v1/admin/users/:user_id
pub async fn delete_user(
    State(state): State<AppState>,
    Admin(identity): Admin,
    PathId(user_id): PathId,
) -> Result<StatusCode, ApiError> {
    AdminService::new(state.pool.clone())
        .delete_user(&identity, user_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
