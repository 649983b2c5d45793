//! User account entity (database row mapping).

use chrono::{DateTime, Utc};
use domain::models::Role;
use sqlx::FromRow;
use std::str::FromStr;

/// Database row mapping for the users table.
#[derive(Debug, Clone, FromRow)]
pub struct UserEntity {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub password_hash: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UserEntity {
    /// Parsed role; unknown values degrade to the least-privileged role.
    pub fn role(&self) -> Role {
        Role::from_str(&self.role).unwrap_or(Role::User)
    }
}

impl From<UserEntity> for domain::models::User {
    fn from(entity: UserEntity) -> Self {
        let role = entity.role();
        Self {
            id: entity.id,
            username: entity.username,
            email: entity.email,
            first_name: entity.first_name,
            last_name: entity.last_name,
            password_hash: entity.password_hash,
            role,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}
