//! Admin bootstrap service for initial setup.
//!
//! Creates the first admin account on startup when credentials are
//! configured. Registration never grants the admin role, so this is the only
//! way to provision one.

use domain::models::Role;
use persistence::repositories::{NewUser, UserRepository};
use shared::password::{hash_password, PasswordError};
use sqlx::PgPool;
use tracing::{info, warn};

use crate::config::AdminBootstrapConfig;

/// Error types for admin bootstrap.
#[derive(Debug, thiserror::Error)]
pub enum BootstrapError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Password hashing error: {0}")]
    PasswordHash(#[from] PasswordError),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// What [`bootstrap_admin`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BootstrapOutcome {
    NotConfigured,
    AlreadyExists,
    Created(i64),
}

/// Bootstrap the admin user if configured and not already present.
///
/// Called after migrations on startup. Idempotent: an existing account with
/// the bootstrap username is left untouched.
pub async fn bootstrap_admin(
    pool: &PgPool,
    config: &AdminBootstrapConfig,
) -> Result<BootstrapOutcome, BootstrapError> {
    if config.bootstrap_username.is_empty() {
        return Ok(BootstrapOutcome::NotConfigured);
    }

    if config.bootstrap_password.is_empty() || config.bootstrap_email.is_empty() {
        return Err(BootstrapError::Config(
            "CR__ADMIN__BOOTSTRAP_USERNAME is set but the bootstrap email or password is empty"
                .to_string(),
        ));
    }

    let users = UserRepository::new(pool.clone());

    if users
        .find_by_username(&config.bootstrap_username)
        .await?
        .is_some()
    {
        info!(
            username = %config.bootstrap_username,
            "Bootstrap admin already exists - skipping bootstrap"
        );
        return Ok(BootstrapOutcome::AlreadyExists);
    }

    let password_hash = hash_password(&config.bootstrap_password)?;

    let created = users
        .create_user(NewUser {
            username: &config.bootstrap_username,
            email: &config.bootstrap_email,
            first_name: "System",
            last_name: "Administrator",
            password_hash: &password_hash,
            role: Role::Admin,
        })
        .await;

    let admin = match created {
        Ok(admin) => admin,
        // Another instance bootstrapped concurrently.
        Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
            return Ok(BootstrapOutcome::AlreadyExists);
        }
        Err(e) => return Err(e.into()),
    };

    info!(
        username = %admin.username,
        user_id = admin.id,
        "Bootstrap admin user created successfully"
    );
    warn!(
        "SECURITY: Remove CR__ADMIN__BOOTSTRAP_PASSWORD from configuration after initial setup"
    );

    Ok(BootstrapOutcome::Created(admin.id))
}
