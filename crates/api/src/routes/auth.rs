//! Authentication routes for registration, login and the current profile.

use axum::{extract::State, http::StatusCode, Form, Json};
use domain::models::{RegisterUserRequest, User};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::Auth;
use crate::services::AuthService;

/// OAuth2 password-grant form body.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
    /// Accepted for OAuth2 compatibility; only `password` is meaningful.
    #[serde(default)]
    pub grant_type: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RegisterResponse {
    pub id: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
}

/// Register a new account.
///
/// POST /api/v1/auth
pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterUserRequest>,
) -> Result<(StatusCode, Json<RegisterResponse>), ApiError> {
    request.validate()?;

    let id = AuthService::new(state.pool.clone(), state.tokens.clone())
        .register(request)
        .await?;

    Ok((StatusCode::CREATED, Json(RegisterResponse { id })))
}

/// Exchange credentials for an access token.
///
/// POST /api/v1/auth/token
pub async fn login(
    State(state): State<AppState>,
    Form(form): Form<LoginForm>,
) -> Result<Json<TokenResponse>, ApiError> {
    if let Some(grant_type) = form.grant_type.as_deref() {
        if grant_type != "password" {
            return Err(ApiError::Validation(
                "grant_type must be \"password\"".to_string(),
            ));
        }
    }

    let issued = AuthService::new(state.pool.clone(), state.tokens.clone())
        .login(&form.username, &form.password)
        .await?;

    Ok(Json(TokenResponse {
        access_token: issued.token,
        token_type: "bearer".to_string(),
        expires_in: issued.expires_in,
    }))
}

/// Profile of the authenticated caller.
///
/// GET /api/v1/auth/me
pub async fn me(State(state): State<AppState>, Auth(identity): Auth) -> Result<Json<User>, ApiError> {
    let user = AuthService::new(state.pool.clone(), state.tokens.clone())
        .current_user(identity.id)
        .await?;
    Ok(Json(user))
}
