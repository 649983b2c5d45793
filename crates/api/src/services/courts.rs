//! Court management service.

use domain::models::{Court, CourtRequest, Identity, Role};
use domain::DomainError;
use persistence::repositories::{CourtRepository, UpdateCourtOutcome};
use sqlx::PgPool;
use tracing::info;

use crate::services::guard::require_role;

pub struct CourtService {
    courts: CourtRepository,
}

impl CourtService {
    pub fn new(pool: PgPool) -> Self {
        Self {
            courts: CourtRepository::new(pool),
        }
    }

    pub async fn list(&self) -> Result<Vec<Court>, DomainError> {
        let courts = self.courts.list_all().await?;
        Ok(courts.into_iter().map(Court::from).collect())
    }

    pub async fn get(&self, court_id: i64) -> Result<Court, DomainError> {
        self.courts
            .find_by_id(court_id)
            .await?
            .map(Court::from)
            .ok_or_else(|| DomainError::not_found("Court"))
    }

    /// Create a court owned by the calling admin.
    ///
    /// The payload must already be validated.
    pub async fn create(
        &self,
        identity: &Identity,
        request: &CourtRequest,
    ) -> Result<Court, DomainError> {
        require_role(identity, Role::Admin)?;

        let court = self.courts.create(request, identity.id).await?;
        info!(court_id = court.id, admin_id = identity.id, "Court created");
        Ok(court.into())
    }

    /// Replace every editable field of a court.
    ///
    /// Refused with `Conflict` if existing schedules would no longer fit
    /// the new reservation bounds.
    pub async fn update(
        &self,
        identity: &Identity,
        court_id: i64,
        request: &CourtRequest,
    ) -> Result<Court, DomainError> {
        require_role(identity, Role::Admin)?;

        match self.courts.update(court_id, request).await? {
            UpdateCourtOutcome::Updated(court) => {
                info!(court_id, admin_id = identity.id, "Court updated");
                Ok(court.into())
            }
            UpdateCourtOutcome::NotFound => Err(DomainError::not_found("Court")),
            UpdateCourtOutcome::SchedulesOutOfRange(count) => Err(DomainError::Conflict(format!(
                "{} existing schedule(s) fall outside the new reservation bounds",
                count
            ))),
        }
    }

    /// Delete a court together with its schedules and reservations.
    pub async fn delete(&self, identity: &Identity, court_id: i64) -> Result<(), DomainError> {
        require_role(identity, Role::Admin)?;

        if !self.courts.delete(court_id).await? {
            return Err(DomainError::not_found("Court"));
        }
        info!(court_id, admin_id = identity.id, "Court deleted");
        Ok(())
    }
}
