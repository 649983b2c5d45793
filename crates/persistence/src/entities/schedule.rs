//! Schedule entity (database row mapping).

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use domain::models::SlotWindow;
use sqlx::FromRow;

/// Database row mapping for the schedules table.
#[derive(Debug, Clone, FromRow)]
pub struct ScheduleEntity {
    pub id: i64,
    pub court_id: i64,
    pub owner_id: i64,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub available: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ScheduleEntity {
    pub fn window(&self) -> SlotWindow {
        SlotWindow {
            date: self.date,
            start_time: self.start_time,
            end_time: self.end_time,
        }
    }
}

impl From<ScheduleEntity> for domain::models::Schedule {
    fn from(entity: ScheduleEntity) -> Self {
        Self {
            id: entity.id,
            court_id: entity.court_id,
            owner_id: entity.owner_id,
            date: entity.date,
            start_time: entity.start_time,
            end_time: entity.end_time,
            available: entity.available,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}
