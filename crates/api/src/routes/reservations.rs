//! Reservation routes for authenticated users, plus the admin overview.

use axum::{extract::State, http::StatusCode, Json};
use domain::models::Reservation;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::{Admin, Auth, PathId};
use crate::services::ReservationService;

/// Book a schedule.
///
/// POST /api/v1/schedules/:schedule_id/reservations
pub async fn book_schedule(
    State(state): State<AppState>,
    Auth(identity): Auth,
    PathId(schedule_id): PathId,
) -> Result<(StatusCode, Json<Reservation>), ApiError> {
    let reservation = ReservationService::new(state.pool.clone())
        .book_schedule(schedule_id, &identity)
        .await?;
    Ok((StatusCode::CREATED, Json(reservation)))
}

/// The caller's reservations, newest first.
///
/// GET /api/v1/reservations
pub async fn list_my_reservations(
    State(state): State<AppState>,
    Auth(identity): Auth,
) -> Result<Json<Vec<Reservation>>, ApiError> {
    let reservations = ReservationService::new(state.pool.clone())
        .list_mine(&identity)
        .await?;
    Ok(Json(reservations))
}

/// Cancel a reservation and release its schedule.
///
/// DELETE /api/v1/reservations/:reservation_id
pub async fn cancel_reservation(
    State(state): State<AppState>,
    Auth(identity): Auth,
    PathId(reservation_id): PathId,
) -> Result<StatusCode, ApiError> {
    ReservationService::new(state.pool.clone())
        .cancel_reservation(reservation_id, &identity)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Every reservation, newest first.
///
/// GET /api/v1/admin/reservations
pub async fn list_all_reservations(
    State(state): State<AppState>,
    Admin(identity): Admin,
) -> Result<Json<Vec<Reservation>>, ApiError> {
    let reservations = ReservationService::new(state.pool.clone())
        .list_all(&identity)
        .await?;
    Ok(Json(reservations))
}
