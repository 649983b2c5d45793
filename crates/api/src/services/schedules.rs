//! Schedule (bookable slot) management service.

use domain::models::{
    CreateScheduleRequest, Identity, Role, Schedule, ScheduleBatchRequest, SlotWindow,
    UpdateScheduleRequest,
};
use domain::DomainError;
use persistence::repositories::{
    CourtRepository, CreateScheduleOutcome, ScheduleRepository, UpdateScheduleOutcome,
};
use sqlx::PgPool;
use tracing::info;

use crate::services::guard::require_role;

pub struct ScheduleService {
    courts: CourtRepository,
    schedules: ScheduleRepository,
}

impl ScheduleService {
    pub fn new(pool: PgPool) -> Self {
        Self {
            courts: CourtRepository::new(pool.clone()),
            schedules: ScheduleRepository::new(pool),
        }
    }

    /// Schedules of a court in chronological order.
    pub async fn list_for_court(
        &self,
        court_id: i64,
        only_available: bool,
    ) -> Result<Vec<Schedule>, DomainError> {
        if self.courts.find_by_id(court_id).await?.is_none() {
            return Err(DomainError::not_found("Court"));
        }

        let schedules = self
            .schedules
            .list_by_court(court_id, only_available)
            .await?;
        Ok(schedules.into_iter().map(Schedule::from).collect())
    }

    /// Add a slot to a court.
    ///
    /// The slot length must fit the court's reservation bounds and the slot
    /// may not overlap another one of the same court on the same date. Both
    /// checks run against the locked court row. The payload must already be
    /// validated.
    pub async fn create(
        &self,
        identity: &Identity,
        court_id: i64,
        request: &CreateScheduleRequest,
    ) -> Result<Schedule, DomainError> {
        require_role(identity, Role::Admin)?;

        let mut created = self.insert(identity, court_id, &[request.window()]).await?;
        let schedule = created.pop().ok_or_else(|| {
            DomainError::Persistence("Schedule insert returned no row".to_string())
        })?;
        info!(
            schedule_id = schedule.id,
            court_id,
            admin_id = identity.id,
            "Schedule created"
        );
        Ok(schedule)
    }

    /// Generate a run of slots on a court in one transaction.
    ///
    /// Any out-of-range or overlapping slot aborts the whole batch.
    pub async fn create_batch(
        &self,
        identity: &Identity,
        court_id: i64,
        request: &ScheduleBatchRequest,
    ) -> Result<Vec<Schedule>, DomainError> {
        require_role(identity, Role::Admin)?;

        let windows = request.expand();
        let created = self.insert(identity, court_id, &windows).await?;
        info!(
            court_id,
            count = created.len(),
            admin_id = identity.id,
            "Schedule batch created"
        );
        Ok(created)
    }

    async fn insert(
        &self,
        identity: &Identity,
        court_id: i64,
        windows: &[SlotWindow],
    ) -> Result<Vec<Schedule>, DomainError> {
        match self.schedules.create(court_id, identity.id, windows).await? {
            CreateScheduleOutcome::Created(schedules) => {
                Ok(schedules.into_iter().map(Schedule::from).collect())
            }
            CreateScheduleOutcome::CourtNotFound => Err(DomainError::not_found("Court")),
            CreateScheduleOutcome::DurationOutOfRange { minutes, min, max } => {
                Err(duration_error(minutes, min, max))
            }
            CreateScheduleOutcome::Overlaps(window) => Err(overlap_error(&window)),
        }
    }

    /// Move an unreserved slot to a new date or time window.
    pub async fn update(
        &self,
        identity: &Identity,
        schedule_id: i64,
        request: &UpdateScheduleRequest,
    ) -> Result<Schedule, DomainError> {
        require_role(identity, Role::Admin)?;

        match self.schedules.update(schedule_id, request).await? {
            UpdateScheduleOutcome::Updated(schedule) => {
                info!(schedule_id, admin_id = identity.id, "Schedule updated");
                Ok(schedule.into())
            }
            UpdateScheduleOutcome::NotFound => Err(DomainError::not_found("Schedule")),
            UpdateScheduleOutcome::Held => Err(DomainError::Conflict(
                "Schedule is reserved and cannot be moved".to_string(),
            )),
            UpdateScheduleOutcome::InvalidWindow => Err(DomainError::Validation(
                "start_time must be before end_time".to_string(),
            )),
            UpdateScheduleOutcome::DurationOutOfRange { minutes, min, max } => {
                Err(duration_error(minutes, min, max))
            }
            UpdateScheduleOutcome::Overlaps(window) => Err(overlap_error(&window)),
        }
    }

    /// Delete a slot; its reservations go with it.
    pub async fn delete(&self, identity: &Identity, schedule_id: i64) -> Result<(), DomainError> {
        require_role(identity, Role::Admin)?;

        if !self.schedules.delete(schedule_id).await? {
            return Err(DomainError::not_found("Schedule"));
        }
        info!(schedule_id, admin_id = identity.id, "Schedule deleted");
        Ok(())
    }
}

fn duration_error(minutes: i64, min: i32, max: i32) -> DomainError {
    DomainError::Validation(format!(
        "Schedule length of {} minutes is outside the court's allowed range of {}-{} minutes",
        minutes, min, max
    ))
}

fn overlap_error(window: &SlotWindow) -> DomainError {
    DomainError::Conflict(format!(
        "Schedule {} {}-{} overlaps an existing slot on this court",
        window.date, window.start_time, window.end_time
    ))
}
