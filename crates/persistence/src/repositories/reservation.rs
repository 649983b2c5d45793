//! Reservation repository for database operations.
//!
//! Booking and cancellation each run in a single transaction that moves the
//! schedule's `available` flag together with the reservation row, so a slot
//! is never held by two active reservations.

use sqlx::PgPool;

use crate::entities::ReservationEntity;
use crate::metrics::QueryTimer;

const RESERVATION_COLUMNS: &str = "id, schedule_id, owner_id, status, created_at, updated_at";

/// Result of an attempt to book a schedule.
#[derive(Debug)]
pub enum BookingOutcome {
    Booked(ReservationEntity),
    ScheduleNotFound,
    /// The schedule exists but is already held by an active reservation.
    Unavailable,
}

/// Result of an attempt to cancel a reservation.
#[derive(Debug)]
pub enum CancelOutcome {
    Cancelled(ReservationEntity),
    NotFound,
    Forbidden,
    AlreadyCancelled,
}

/// Repository for reservation-related database operations.
#[derive(Clone)]
pub struct ReservationRepository {
    pool: PgPool,
}

impl ReservationRepository {
    /// Creates a new ReservationRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Atomically claim a schedule and record a confirmed reservation for it.
    ///
    /// The conditional update on `available` serializes concurrent bookers:
    /// the second one blocks on the row lock, re-evaluates the predicate
    /// after the first commits, and matches nothing.
    pub async fn book(
        &self,
        schedule_id: i64,
        owner_id: i64,
    ) -> Result<BookingOutcome, sqlx::Error> {
        let _timer = QueryTimer::new("book_schedule");
        let mut tx = self.pool.begin().await?;

        let claimed = sqlx::query(
            r#"
            UPDATE schedules
            SET available = false, updated_at = NOW()
            WHERE id = $1 AND available = true
            "#,
        )
        .bind(schedule_id)
        .execute(&mut *tx)
        .await?;

        if claimed.rows_affected() == 0 {
            let exists: bool =
                sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM schedules WHERE id = $1)")
                    .bind(schedule_id)
                    .fetch_one(&mut *tx)
                    .await?;
            tx.rollback().await?;
            return Ok(if exists {
                BookingOutcome::Unavailable
            } else {
                BookingOutcome::ScheduleNotFound
            });
        }

        let inserted = sqlx::query_as::<_, ReservationEntity>(&format!(
            r#"
            INSERT INTO reservations (schedule_id, owner_id, status)
            VALUES ($1, $2, 'confirmed')
            RETURNING {}
            "#,
            RESERVATION_COLUMNS
        ))
        .bind(schedule_id)
        .bind(owner_id)
        .fetch_one(&mut *tx)
        .await;

        let reservation = match inserted {
            Ok(reservation) => reservation,
            // One-active-reservation index caught a stale `available` flag.
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                tracing::warn!(schedule_id, "Active reservation exists for available schedule");
                tx.rollback().await?;
                return Ok(BookingOutcome::Unavailable);
            }
            Err(e) => return Err(e),
        };

        tx.commit().await?;
        Ok(BookingOutcome::Booked(reservation))
    }

    /// Cancel a reservation and release its schedule.
    ///
    /// `authorize` sees the locked row and decides whether the caller may
    /// cancel it. The schedule is released only when no other active
    /// reservation references it.
    pub async fn cancel<F>(
        &self,
        reservation_id: i64,
        authorize: F,
    ) -> Result<CancelOutcome, sqlx::Error>
    where
        F: FnOnce(&ReservationEntity) -> bool,
    {
        let _timer = QueryTimer::new("cancel_reservation");
        let mut tx = self.pool.begin().await?;

        let current = sqlx::query_as::<_, ReservationEntity>(&format!(
            "SELECT {} FROM reservations WHERE id = $1 FOR UPDATE",
            RESERVATION_COLUMNS
        ))
        .bind(reservation_id)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(current) = current else {
            tx.rollback().await?;
            return Ok(CancelOutcome::NotFound);
        };

        if !authorize(&current) {
            tx.rollback().await?;
            return Ok(CancelOutcome::Forbidden);
        }

        if !current.status().is_active() {
            tx.rollback().await?;
            return Ok(CancelOutcome::AlreadyCancelled);
        }

        let cancelled = sqlx::query_as::<_, ReservationEntity>(&format!(
            r#"
            UPDATE reservations
            SET status = 'cancelled', updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            RESERVATION_COLUMNS
        ))
        .bind(reservation_id)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query(
            r#"
            UPDATE schedules
            SET available = true, updated_at = NOW()
            WHERE id = $1
              AND NOT EXISTS (
                  SELECT 1 FROM reservations
                  WHERE schedule_id = $1 AND status <> 'cancelled'
              )
            "#,
        )
        .bind(cancelled.schedule_id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(CancelOutcome::Cancelled(cancelled))
    }

    /// List a user's reservations, newest first.
    pub async fn list_by_owner(
        &self,
        owner_id: i64,
    ) -> Result<Vec<ReservationEntity>, sqlx::Error> {
        let _timer = QueryTimer::new("list_reservations_by_owner");
        let result = sqlx::query_as::<_, ReservationEntity>(&format!(
            "SELECT {} FROM reservations WHERE owner_id = $1 ORDER BY created_at DESC, id DESC",
            RESERVATION_COLUMNS
        ))
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await;
        result
    }

    /// List every reservation, newest first.
    pub async fn list_all(&self) -> Result<Vec<ReservationEntity>, sqlx::Error> {
        let _timer = QueryTimer::new("list_reservations");
        let result = sqlx::query_as::<_, ReservationEntity>(&format!(
            "SELECT {} FROM reservations ORDER BY created_at DESC, id DESC",
            RESERVATION_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await;
        result
    }

    /// Number of non-cancelled reservations referencing a schedule.
    pub async fn count_active_for_schedule(&self, schedule_id: i64) -> Result<i64, sqlx::Error> {
        let _timer = QueryTimer::new("count_active_reservations");
        let result = sqlx::query_scalar(
            "SELECT COUNT(*) FROM reservations WHERE schedule_id = $1 AND status <> 'cancelled'",
        )
        .bind(schedule_id)
        .fetch_one(&self.pool)
        .await;
        result
    }
}
