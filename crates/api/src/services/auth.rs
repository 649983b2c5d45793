//! Authentication service for user registration and login.

use std::sync::Arc;

use domain::models::{RegisterUserRequest, Role, User};
use domain::DomainError;
use persistence::repositories::{NewUser, UserRepository};
use shared::jwt::{IssuedToken, TokenService};
use shared::password::{dummy_hash, hash_password, verify_password};
use sqlx::PgPool;
use tracing::info;

const INVALID_CREDENTIALS: &str = "Incorrect username or password";

/// Hashes on the blocking pool so Argon2 does not stall the runtime.
pub async fn hash_password_blocking(password: String) -> Result<String, DomainError> {
    tokio::task::spawn_blocking(move || hash_password(&password))
        .await
        .map_err(|e| DomainError::Persistence(format!("Password hashing task failed: {}", e)))?
        .map_err(|e| DomainError::Persistence(e.to_string()))
}

async fn verify_password_blocking(password: String, hash: String) -> Result<bool, DomainError> {
    tokio::task::spawn_blocking(move || verify_password(&password, &hash))
        .await
        .map_err(|e| DomainError::Persistence(format!("Password verify task failed: {}", e)))
}

/// Digest a login attempt is checked against: the account's own, or a dummy
/// one that never matches.
fn stored_digest(password_hash: Option<&str>) -> String {
    password_hash.unwrap_or(dummy_hash()).to_string()
}

/// Authentication service.
pub struct AuthService {
    users: UserRepository,
    tokens: Arc<TokenService>,
}

impl AuthService {
    pub fn new(pool: PgPool, tokens: Arc<TokenService>) -> Self {
        Self {
            users: UserRepository::new(pool),
            tokens,
        }
    }

    /// Register a new `user`-role account and return its id.
    ///
    /// The payload must already be validated.
    pub async fn register(&self, request: RegisterUserRequest) -> Result<i64, DomainError> {
        let RegisterUserRequest {
            username,
            email,
            first_name,
            last_name,
            password,
        } = request;

        let password_hash = hash_password_blocking(password).await?;

        let user = self
            .users
            .create_user(NewUser {
                username: &username,
                email: &email,
                first_name: &first_name,
                last_name: &last_name,
                password_hash: &password_hash,
                role: Role::User,
            })
            .await
            .map_err(|e| match DomainError::from(e) {
                DomainError::Conflict(_) => {
                    DomainError::Conflict("Username or email already registered".to_string())
                }
                other => other,
            })?;

        info!(user_id = user.id, username = %user.username, "User registered");
        Ok(user.id)
    }

    /// Verify credentials and issue an access token.
    ///
    /// Unknown usernames and wrong passwords produce the same error.
    pub async fn login(&self, username: &str, password: &str) -> Result<IssuedToken, DomainError> {
        let user = self.users.find_by_username(username).await?;

        // Unknown usernames still pay for a full Argon2 verification
        let digest = stored_digest(user.as_ref().map(|u| u.password_hash.as_str()));
        let is_valid = verify_password_blocking(password.to_string(), digest).await?;
        let user = match user {
            Some(user) if is_valid => user,
            _ => {
                info!(username = %username, "Login rejected");
                return Err(DomainError::Authentication(INVALID_CREDENTIALS.to_string()));
            }
        };

        let issued = self.tokens.issue(user.id, &user.username, user.role())?;
        info!(user_id = user.id, jti = %issued.jti, "Access token issued");
        Ok(issued)
    }

    /// Load the account behind an authenticated identity.
    pub async fn current_user(&self, user_id: i64) -> Result<User, DomainError> {
        self.users
            .find_by_id(user_id)
            .await?
            .map(User::from)
            .ok_or_else(|| DomainError::Authentication("Account no longer exists".to_string()))
    }
}
