//! Court repository for database operations.

use domain::models::CourtRequest;
use sqlx::PgPool;

use crate::entities::CourtEntity;
use crate::metrics::QueryTimer;

const COURT_COLUMNS: &str = "id, name, description, sport_type, environment, \
     min_reservation_time, max_reservation_time, owner_id, created_at, updated_at";

/// Result of an attempt to edit a court.
#[derive(Debug)]
pub enum UpdateCourtOutcome {
    Updated(CourtEntity),
    NotFound,
    /// This many schedules would fall outside the new reservation bounds.
    SchedulesOutOfRange(i64),
}

/// Repository for court-related database operations.
#[derive(Clone)]
pub struct CourtRepository {
    pool: PgPool,
}

impl CourtRepository {
    /// Creates a new CourtRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a court owned by `owner_id`.
    pub async fn create(
        &self,
        request: &CourtRequest,
        owner_id: i64,
    ) -> Result<CourtEntity, sqlx::Error> {
        let _timer = QueryTimer::new("create_court");
        let result = sqlx::query_as::<_, CourtEntity>(&format!(
            r#"
            INSERT INTO courts (name, description, sport_type, environment,
                                min_reservation_time, max_reservation_time, owner_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {}
            "#,
            COURT_COLUMNS
        ))
        .bind(&request.name)
        .bind(&request.description)
        .bind(&request.sport_type)
        .bind(request.environment.as_str())
        .bind(request.min_reservation_time)
        .bind(request.max_reservation_time)
        .bind(owner_id)
        .fetch_one(&self.pool)
        .await;
        result
    }

    /// Find a court by ID.
    pub async fn find_by_id(&self, id: i64) -> Result<Option<CourtEntity>, sqlx::Error> {
        let _timer = QueryTimer::new("find_court_by_id");
        let result = sqlx::query_as::<_, CourtEntity>(&format!(
            "SELECT {} FROM courts WHERE id = $1",
            COURT_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        result
    }

    /// List all courts ordered by ID.
    pub async fn list_all(&self) -> Result<Vec<CourtEntity>, sqlx::Error> {
        let _timer = QueryTimer::new("list_courts");
        let result = sqlx::query_as::<_, CourtEntity>(&format!(
            "SELECT {} FROM courts ORDER BY id",
            COURT_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await;
        result
    }

    /// Replace every editable field of a court.
    ///
    /// The court row is locked first, so no schedule can be added between the
    /// bounds check and the write. New bounds that an existing schedule would
    /// fall outside of are refused.
    pub async fn update(
        &self,
        id: i64,
        request: &CourtRequest,
    ) -> Result<UpdateCourtOutcome, sqlx::Error> {
        let _timer = QueryTimer::new("update_court");
        let mut tx = self.pool.begin().await?;

        let locked: Option<i64> =
            sqlx::query_scalar("SELECT id FROM courts WHERE id = $1 FOR UPDATE")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?;
        if locked.is_none() {
            tx.rollback().await?;
            return Ok(UpdateCourtOutcome::NotFound);
        }

        let out_of_range: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*) FROM schedules
            WHERE court_id = $1
              AND (end_time - start_time < make_interval(mins => $2)
                   OR end_time - start_time > make_interval(mins => $3))
            "#,
        )
        .bind(id)
        .bind(request.min_reservation_time)
        .bind(request.max_reservation_time)
        .fetch_one(&mut *tx)
        .await?;
        if out_of_range > 0 {
            tx.rollback().await?;
            return Ok(UpdateCourtOutcome::SchedulesOutOfRange(out_of_range));
        }

        let court = sqlx::query_as::<_, CourtEntity>(&format!(
            r#"
            UPDATE courts
            SET name = $2, description = $3, sport_type = $4, environment = $5,
                min_reservation_time = $6, max_reservation_time = $7, updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            COURT_COLUMNS
        ))
        .bind(id)
        .bind(&request.name)
        .bind(&request.description)
        .bind(&request.sport_type)
        .bind(request.environment.as_str())
        .bind(request.min_reservation_time)
        .bind(request.max_reservation_time)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(UpdateCourtOutcome::Updated(court))
    }

    /// Delete a court; schedules and reservations cascade. Returns false if absent.
    pub async fn delete(&self, id: i64) -> Result<bool, sqlx::Error> {
        let _timer = QueryTimer::new("delete_court");
        let result = sqlx::query("DELETE FROM courts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
