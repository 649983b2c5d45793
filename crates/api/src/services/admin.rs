//! User administration service.

use domain::models::{Identity, Role, User};
use domain::DomainError;
use persistence::repositories::UserRepository;
use sqlx::PgPool;
use tracing::warn;

use crate::services::guard::require_role;

pub struct AdminService {
    users: UserRepository,
}

impl AdminService {
    pub fn new(pool: PgPool) -> Self {
        Self {
            users: UserRepository::new(pool),
        }
    }

    pub async fn list_users(&self, identity: &Identity) -> Result<Vec<User>, DomainError> {
        require_role(identity, Role::Admin)?;

        let users = self.users.list_users().await?;
        Ok(users.into_iter().map(User::from).collect())
    }

    /// Delete an account with everything it owns.
    ///
    /// Schedules held by the account's active reservations become available
    /// again. An admin cannot delete their own account.
    pub async fn delete_user(&self, identity: &Identity, user_id: i64) -> Result<(), DomainError> {
        require_role(identity, Role::Admin)?;

        if identity.id == user_id {
            return Err(DomainError::Conflict(
                "Administrators cannot delete their own account".to_string(),
            ));
        }

        if !self.users.delete_user(user_id).await? {
            return Err(DomainError::not_found("User"));
        }

        warn!(user_id, admin_id = identity.id, "User deleted");
        Ok(())
    }
}
