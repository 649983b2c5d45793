//! Court entity (database row mapping).

use chrono::{DateTime, Utc};
use domain::models::CourtEnvironment;
use sqlx::FromRow;
use std::str::FromStr;

/// Database row mapping for the courts table.
#[derive(Debug, Clone, FromRow)]
pub struct CourtEntity {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub sport_type: String,
    pub environment: String,
    pub min_reservation_time: i32,
    pub max_reservation_time: i32,
    pub owner_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<CourtEntity> for domain::models::Court {
    fn from(entity: CourtEntity) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
            description: entity.description,
            sport_type: entity.sport_type,
            // The column carries a CHECK constraint; the fallback is unreachable in practice
            environment: CourtEnvironment::from_str(&entity.environment)
                .unwrap_or(CourtEnvironment::Outdoor),
            min_reservation_time: entity.min_reservation_time,
            max_reservation_time: entity.max_reservation_time,
            owner_id: entity.owner_id,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}
