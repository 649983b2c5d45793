//! Reservation entity (database row mapping).

use chrono::{DateTime, Utc};
use domain::models::ReservationStatus;
use sqlx::FromRow;
use std::str::FromStr;

/// Database row mapping for the reservations table.
#[derive(Debug, Clone, FromRow)]
pub struct ReservationEntity {
    pub id: i64,
    pub schedule_id: i64,
    pub owner_id: i64,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ReservationEntity {
    /// Parsed status; unknown values degrade to `Cancelled`, which holds no slot.
    pub fn status(&self) -> ReservationStatus {
        ReservationStatus::from_str(&self.status).unwrap_or(ReservationStatus::Cancelled)
    }
}

impl From<ReservationEntity> for domain::models::Reservation {
    fn from(entity: ReservationEntity) -> Self {
        let status = entity.status();
        Self {
            id: entity.id,
            schedule_id: entity.schedule_id,
            owner_id: entity.owner_id,
            status,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}
