//! User repository for database operations.

use domain::models::Role;
use sqlx::PgPool;

use crate::entities::UserEntity;
use crate::metrics::QueryTimer;

const USER_COLUMNS: &str =
    "id, username, email, first_name, last_name, password_hash, role, created_at, updated_at";

/// Fields required to insert a user row.
#[derive(Debug, Clone)]
pub struct NewUser<'a> {
    pub username: &'a str,
    pub email: &'a str,
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub password_hash: &'a str,
    pub role: Role,
}

/// Repository for user-related database operations.
#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    /// Creates a new UserRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a user by ID.
    pub async fn find_by_id(&self, id: i64) -> Result<Option<UserEntity>, sqlx::Error> {
        let _timer = QueryTimer::new("find_user_by_id");
        let result = sqlx::query_as::<_, UserEntity>(&format!(
            "SELECT {} FROM users WHERE id = $1",
            USER_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        result
    }

    /// Find a user by username.
    pub async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<UserEntity>, sqlx::Error> {
        let _timer = QueryTimer::new("find_user_by_username");
        let result = sqlx::query_as::<_, UserEntity>(&format!(
            "SELECT {} FROM users WHERE username = $1",
            USER_COLUMNS
        ))
        .bind(username)
        .fetch_optional(&self.pool)
        .await;
        result
    }

    /// Create a new user account.
    ///
    /// Uniqueness of username and email is enforced by the table constraints;
    /// a duplicate surfaces as a unique_violation database error.
    pub async fn create_user(&self, user: NewUser<'_>) -> Result<UserEntity, sqlx::Error> {
        let _timer = QueryTimer::new("create_user");
        let result = sqlx::query_as::<_, UserEntity>(&format!(
            r#"
            INSERT INTO users (username, email, first_name, last_name, password_hash, role)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {}
            "#,
            USER_COLUMNS
        ))
        .bind(user.username)
        .bind(user.email.to_lowercase())
        .bind(user.first_name)
        .bind(user.last_name)
        .bind(user.password_hash)
        .bind(user.role.as_str())
        .fetch_one(&self.pool)
        .await;
        result
    }

    /// List every user ordered by ID.
    pub async fn list_users(&self) -> Result<Vec<UserEntity>, sqlx::Error> {
        let _timer = QueryTimer::new("list_users");
        let result = sqlx::query_as::<_, UserEntity>(&format!(
            "SELECT {} FROM users ORDER BY id",
            USER_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await;
        result
    }

    /// Delete a user together with everything they own.
    ///
    /// The user row is locked first. That waits out bookings already
    /// referencing it and blocks new ones, so the release step sees every
    /// active reservation before the cascade removes them. The user's
    /// reservations are then locked before their schedules, the same order a
    /// cancellation takes. Returns false if no such user.
    pub async fn delete_user(&self, id: i64) -> Result<bool, sqlx::Error> {
        let _timer = QueryTimer::new("delete_user");
        let mut tx = self.pool.begin().await?;

        let locked: Option<(i64,)> =
            sqlx::query_as("SELECT id FROM users WHERE id = $1 FOR UPDATE")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?;
        if locked.is_none() {
            tx.rollback().await?;
            return Ok(false);
        }

        sqlx::query("SELECT id FROM reservations WHERE owner_id = $1 FOR UPDATE")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        sqlx::query(
            r#"
            UPDATE schedules
            SET available = true, updated_at = NOW()
            WHERE id IN (
                SELECT schedule_id FROM reservations
                WHERE owner_id = $1 AND status <> 'cancelled'
            )
            "#,
        )
        .bind(id)
        .execute(&mut *tx)
        .await?;

        sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(true)
    }
}
