//! Court and schedule routes.
//!
//! Reads are public. Mutations take the [`Admin`] extractor first, so a
//! non-admin gets 403 whatever the path or payload; the services repeat the
//! role check before touching data.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use domain::models::{
    Court, CourtRequest, CreateScheduleRequest, Schedule, ScheduleBatchRequest,
    UpdateScheduleRequest,
};
use serde::Deserialize;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::{Admin, PathId};
use crate::services::{CourtService, ScheduleService};

#[derive(Debug, Default, Deserialize)]
pub struct ScheduleQuery {
    /// Only return schedules that can still be booked.
    #[serde(default)]
    pub available: bool,
}

// ============================================================================
// Public
// ============================================================================

/// GET /api/v1/courts
pub async fn list_courts(State(state): State<AppState>) -> Result<Json<Vec<Court>>, ApiError> {
    let courts = CourtService::new(state.pool.clone()).list().await?;
    Ok(Json(courts))
}

/// GET /api/v1/courts/:court_id
pub async fn get_court(
    State(state): State<AppState>,
    PathId(court_id): PathId,
) -> Result<Json<Court>, ApiError> {
    let court = CourtService::new(state.pool.clone()).get(court_id).await?;
    Ok(Json(court))
}

/// GET /api/v1/courts/:court_id/schedules
pub async fn list_court_schedules(
    State(state): State<AppState>,
    PathId(court_id): PathId,
    Query(query): Query<ScheduleQuery>,
) -> Result<Json<Vec<Schedule>>, ApiError> {
    let schedules = ScheduleService::new(state.pool.clone())
        .list_for_court(court_id, query.available)
        .await?;
    Ok(Json(schedules))
}

// ============================================================================
// Admin
// ============================================================================

/// POST /api/v1/admin/courts
pub async fn create_court(
    State(state): State<AppState>,
    Admin(identity): Admin,
    Json(request): Json<CourtRequest>,
) -> Result<(StatusCode, Json<Court>), ApiError> {
    request.validate()?;

    let court = CourtService::new(state.pool.clone())
        .create(&identity, &request)
        .await?;
    Ok((StatusCode::CREATED, Json(court)))
}

/// PUT /api/v1/admin/courts/:court_id
pub async fn update_court(
    State(state): State<AppState>,
    Admin(identity): Admin,
    PathId(court_id): PathId,
    Json(request): Json<CourtRequest>,
) -> Result<Json<Court>, ApiError> {
    request.validate()?;

    let court = CourtService::new(state.pool.clone())
        .update(&identity, court_id, &request)
        .await?;
    Ok(Json(court))
}

/// DELETE /api/v1/admin/courts/:court_id
pub async fn delete_court(
    State(state): State<AppState>,
    Admin(identity): Admin,
    PathId(court_id): PathId,
) -> Result<StatusCode, ApiError> {
    CourtService::new(state.pool.clone())
        .delete(&identity, court_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/admin/courts/:court_id/schedules
pub async fn create_schedule(
    State(state): State<AppState>,
    Admin(identity): Admin,
    PathId(court_id): PathId,
    Json(request): Json<CreateScheduleRequest>,
) -> Result<(StatusCode, Json<Schedule>), ApiError> {
    request.validate()?;

    let schedule = ScheduleService::new(state.pool.clone())
        .create(&identity, court_id, &request)
        .await?;
    Ok((StatusCode::CREATED, Json(schedule)))
}

/// POST /api/v1/admin/courts/:court_id/schedules/batch
pub async fn create_schedule_batch(
    State(state): State<AppState>,
    Admin(identity): Admin,
    PathId(court_id): PathId,
    Json(request): Json<ScheduleBatchRequest>,
) -> Result<(StatusCode, Json<Vec<Schedule>>), ApiError> {
    request.validate()?;

    let schedules = ScheduleService::new(state.pool.clone())
        .create_batch(&identity, court_id, &request)
        .await?;
    Ok((StatusCode::CREATED, Json(schedules)))
}

/// PUT /api/v1/admin/schedules/:schedule_id
pub async fn update_schedule(
    State(state): State<AppState>,
    Admin(identity): Admin,
    PathId(schedule_id): PathId,
    Json(request): Json<UpdateScheduleRequest>,
) -> Result<Json<Schedule>, ApiError> {
    request.validate()?;

    let schedule = ScheduleService::new(state.pool.clone())
        .update(&identity, schedule_id, &request)
        .await?;
    Ok(Json(schedule))
}

/// DELETE /api/v1/admin/schedules/:schedule_id
pub async fn delete_schedule(
    State(state): State<AppState>,
    Admin(identity): Admin,
    PathId(schedule_id): PathId,
) -> Result<StatusCode, ApiError> {
    ScheduleService::new(state.pool.clone())
        .delete(&identity, schedule_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
