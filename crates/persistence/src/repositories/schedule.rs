//! Schedule repository for database operations.

use domain::models::court::duration_in_range;
use domain::models::{SlotWindow, UpdateScheduleRequest};
use sqlx::{PgConnection, PgPool};

use crate::entities::ScheduleEntity;
use crate::metrics::QueryTimer;

const SCHEDULE_COLUMNS: &str =
    "id, court_id, owner_id, date, start_time, end_time, available, created_at, updated_at";

/// Result of an attempt to add one or more schedules to a court.
#[derive(Debug)]
pub enum CreateScheduleOutcome {
    /// Every requested window was inserted, in request order.
    Created(Vec<ScheduleEntity>),
    CourtNotFound,
    /// A window's length falls outside the court's reservation bounds.
    DurationOutOfRange { minutes: i64, min: i32, max: i32 },
    /// The window overlaps another schedule of the same court.
    Overlaps(SlotWindow),
}

/// Result of an attempt to move an existing schedule.
#[derive(Debug)]
pub enum UpdateScheduleOutcome {
    Updated(ScheduleEntity),
    NotFound,
    /// An active reservation holds the slot.
    Held,
    /// The merged window does not end after it starts.
    InvalidWindow,
    DurationOutOfRange { minutes: i64, min: i32, max: i32 },
    Overlaps(SlotWindow),
}

/// Repository for schedule-related database operations.
#[derive(Clone)]
pub struct ScheduleRepository {
    pool: PgPool,
}

/// Locks the court row and returns its `(min, max)` reservation bounds.
async fn lock_court_bounds(
    conn: &mut PgConnection,
    court_id: i64,
) -> Result<Option<(i32, i32)>, sqlx::Error> {
    sqlx::query_as(
        "SELECT min_reservation_time, max_reservation_time FROM courts WHERE id = $1 FOR UPDATE",
    )
    .bind(court_id)
    .fetch_optional(conn)
    .await
}

/// True if another schedule of the court intersects `window`.
async fn overlaps(
    conn: &mut PgConnection,
    court_id: i64,
    window: &SlotWindow,
    exclude_id: Option<i64>,
) -> Result<bool, sqlx::Error> {
    sqlx::query_scalar(
        r#"
        SELECT EXISTS(
            SELECT 1 FROM schedules
            WHERE court_id = $1 AND date = $2
              AND start_time < $4 AND end_time > $3
              AND ($5::BIGINT IS NULL OR id <> $5)
        )
        "#,
    )
    .bind(court_id)
    .bind(window.date)
    .bind(window.start_time)
    .bind(window.end_time)
    .bind(exclude_id)
    .fetch_one(conn)
    .await
}

impl ScheduleRepository {
    /// Creates a new ScheduleRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert `windows` on a court, all or nothing.
    ///
    /// The court row is locked for the duration of the transaction, so the
    /// reservation bounds read here cannot change before commit and two
    /// concurrent inserts for one court cannot both pass the overlap check.
    /// Windows are checked against each other as well as stored slots.
    pub async fn create(
        &self,
        court_id: i64,
        owner_id: i64,
        windows: &[SlotWindow],
    ) -> Result<CreateScheduleOutcome, sqlx::Error> {
        let _timer = QueryTimer::new("create_schedules");
        let mut tx = self.pool.begin().await?;

        let Some((min, max)) = lock_court_bounds(&mut *tx, court_id).await? else {
            tx.rollback().await?;
            return Ok(CreateScheduleOutcome::CourtNotFound);
        };

        let mut created = Vec::with_capacity(windows.len());
        for window in windows {
            let minutes = window.duration_minutes();
            if !duration_in_range(minutes, min, max) {
                tx.rollback().await?;
                return Ok(CreateScheduleOutcome::DurationOutOfRange { minutes, min, max });
            }
            if overlaps(&mut *tx, court_id, window, None).await? {
                tx.rollback().await?;
                return Ok(CreateScheduleOutcome::Overlaps(*window));
            }

            let schedule = sqlx::query_as::<_, ScheduleEntity>(&format!(
                r#"
                INSERT INTO schedules (court_id, owner_id, date, start_time, end_time, available)
                VALUES ($1, $2, $3, $4, $5, true)
                RETURNING {}
                "#,
                SCHEDULE_COLUMNS
            ))
            .bind(court_id)
            .bind(owner_id)
            .bind(window.date)
            .bind(window.start_time)
            .bind(window.end_time)
            .fetch_one(&mut *tx)
            .await?;
            created.push(schedule);
        }

        tx.commit().await?;
        Ok(CreateScheduleOutcome::Created(created))
    }

    /// Move an unreserved schedule to a new window on the same court.
    ///
    /// Locks the court (bounds) and then the schedule row, the same order as
    /// [`Self::create`]. A booking that commits first leaves the slot held.
    pub async fn update(
        &self,
        schedule_id: i64,
        request: &UpdateScheduleRequest,
    ) -> Result<UpdateScheduleOutcome, sqlx::Error> {
        let _timer = QueryTimer::new("update_schedule");
        let mut tx = self.pool.begin().await?;

        let court_id: Option<i64> =
            sqlx::query_scalar("SELECT court_id FROM schedules WHERE id = $1")
                .bind(schedule_id)
                .fetch_optional(&mut *tx)
                .await?;
        let Some(court_id) = court_id else {
            tx.rollback().await?;
            return Ok(UpdateScheduleOutcome::NotFound);
        };

        let Some((min, max)) = lock_court_bounds(&mut *tx, court_id).await? else {
            tx.rollback().await?;
            return Ok(UpdateScheduleOutcome::NotFound);
        };

        let current = sqlx::query_as::<_, ScheduleEntity>(&format!(
            "SELECT {} FROM schedules WHERE id = $1 FOR UPDATE",
            SCHEDULE_COLUMNS
        ))
        .bind(schedule_id)
        .fetch_optional(&mut *tx)
        .await?;
        let Some(current) = current else {
            tx.rollback().await?;
            return Ok(UpdateScheduleOutcome::NotFound);
        };
        if !current.available {
            tx.rollback().await?;
            return Ok(UpdateScheduleOutcome::Held);
        }

        let window = request.apply(current.window());
        if window.start_time >= window.end_time {
            tx.rollback().await?;
            return Ok(UpdateScheduleOutcome::InvalidWindow);
        }
        let minutes = window.duration_minutes();
        if !duration_in_range(minutes, min, max) {
            tx.rollback().await?;
            return Ok(UpdateScheduleOutcome::DurationOutOfRange { minutes, min, max });
        }
        if overlaps(&mut *tx, court_id, &window, Some(schedule_id)).await? {
            tx.rollback().await?;
            return Ok(UpdateScheduleOutcome::Overlaps(window));
        }

        let schedule = sqlx::query_as::<_, ScheduleEntity>(&format!(
            r#"
            UPDATE schedules
            SET date = $2, start_time = $3, end_time = $4, updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            SCHEDULE_COLUMNS
        ))
        .bind(schedule_id)
        .bind(window.date)
        .bind(window.start_time)
        .bind(window.end_time)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(UpdateScheduleOutcome::Updated(schedule))
    }

    /// Find a schedule by ID.
    pub async fn find_by_id(&self, id: i64) -> Result<Option<ScheduleEntity>, sqlx::Error> {
        let _timer = QueryTimer::new("find_schedule_by_id");
        let result = sqlx::query_as::<_, ScheduleEntity>(&format!(
            "SELECT {} FROM schedules WHERE id = $1",
            SCHEDULE_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        result
    }

    /// List a court's schedules in chronological order.
    pub async fn list_by_court(
        &self,
        court_id: i64,
        only_available: bool,
    ) -> Result<Vec<ScheduleEntity>, sqlx::Error> {
        let _timer = QueryTimer::new("list_schedules_by_court");
        let result = sqlx::query_as::<_, ScheduleEntity>(&format!(
            r#"
            SELECT {}
            FROM schedules
            WHERE court_id = $1 AND ($2 = false OR available = true)
            ORDER BY date, start_time
            "#,
            SCHEDULE_COLUMNS
        ))
        .bind(court_id)
        .bind(only_available)
        .fetch_all(&self.pool)
        .await;
        result
    }

    /// Delete a schedule; its reservations cascade. Returns false if absent.
    pub async fn delete(&self, id: i64) -> Result<bool, sqlx::Error> {
        let _timer = QueryTimer::new("delete_schedule");
        let result = sqlx::query("DELETE FROM schedules WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
