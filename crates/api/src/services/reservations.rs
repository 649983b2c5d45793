//! Booking and cancellation of schedules.
//!
//! All consistency decisions are made inside the repository transactions;
//! this layer maps their outcomes onto [`DomainError`] and records metrics.

use domain::models::{Identity, Reservation, Role};
use domain::DomainError;
use persistence::repositories::{BookingOutcome, CancelOutcome, ReservationRepository};
use sqlx::PgPool;
use tracing::info;

use crate::middleware::metrics::{
    record_reservation_booked, record_reservation_cancelled, record_reservation_conflict,
};
use crate::services::guard::{owns_or_admin, require_role};

pub struct ReservationService {
    reservations: ReservationRepository,
}

impl ReservationService {
    pub fn new(pool: PgPool) -> Self {
        Self {
            reservations: ReservationRepository::new(pool),
        }
    }

    /// Book a schedule for the caller.
    ///
    /// Of several concurrent attempts on one schedule exactly one succeeds;
    /// the others get `Conflict`.
    pub async fn book_schedule(
        &self,
        schedule_id: i64,
        identity: &Identity,
    ) -> Result<Reservation, DomainError> {
        match self.reservations.book(schedule_id, identity.id).await? {
            BookingOutcome::Booked(reservation) => {
                record_reservation_booked();
                info!(
                    reservation_id = reservation.id,
                    schedule_id,
                    user_id = identity.id,
                    "Schedule booked"
                );
                Ok(reservation.into())
            }
            BookingOutcome::ScheduleNotFound => Err(DomainError::not_found("Schedule")),
            BookingOutcome::Unavailable => {
                record_reservation_conflict();
                info!(schedule_id, user_id = identity.id, "Booking lost to existing reservation");
                Err(DomainError::Conflict(
                    "Schedule is no longer available".to_string(),
                ))
            }
        }
    }

    /// Cancel a reservation held by the caller (or any reservation, for an admin).
    pub async fn cancel_reservation(
        &self,
        reservation_id: i64,
        identity: &Identity,
    ) -> Result<(), DomainError> {
        let outcome = self
            .reservations
            .cancel(reservation_id, |reservation| {
                owns_or_admin(identity, reservation.owner_id)
            })
            .await?;

        match outcome {
            CancelOutcome::Cancelled(reservation) => {
                record_reservation_cancelled();
                info!(
                    reservation_id,
                    schedule_id = reservation.schedule_id,
                    user_id = identity.id,
                    "Reservation cancelled"
                );
                Ok(())
            }
            CancelOutcome::NotFound => Err(DomainError::not_found("Reservation")),
            CancelOutcome::Forbidden => Err(DomainError::Forbidden(
                "Not allowed to cancel this reservation".to_string(),
            )),
            CancelOutcome::AlreadyCancelled => Err(DomainError::Conflict(
                "Reservation is already cancelled".to_string(),
            )),
        }
    }

    /// The caller's reservations, newest first.
    pub async fn list_mine(&self, identity: &Identity) -> Result<Vec<Reservation>, DomainError> {
        let reservations = self.reservations.list_by_owner(identity.id).await?;
        Ok(reservations.into_iter().map(Reservation::from).collect())
    }

    /// Every reservation in the system, newest first. Admin only.
    pub async fn list_all(&self, identity: &Identity) -> Result<Vec<Reservation>, DomainError> {
        require_role(identity, Role::Admin)?;

        let reservations = self.reservations.list_all().await?;
        Ok(reservations.into_iter().map(Reservation::from).collect())
    }
}
