//! Bearer token authentication extractor.
//!
//! Resolves the caller's [`Identity`] from `Authorization: Bearer <token>`
//! before any handler logic runs.

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};
use domain::models::{Identity, Role};
use domain::DomainError;

use crate::app::AppState;
use crate::error::ApiError;
use crate::services::guard::require_role;

/// Authenticated caller.
#[derive(Debug, Clone)]
pub struct Auth(pub Identity);

/// Pulls the raw token out of an `Authorization` header value.
///
/// The scheme is matched case-insensitively.
fn bearer_token(header: &str) -> Option<&str> {
    let (scheme, token) = header.split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    let token = token.trim();
    (!token.is_empty()).then_some(token)
}

#[async_trait]
impl FromRequestParts<AppState> for Auth {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| ApiError::Unauthorized("Not authenticated".to_string()))?;

        let token = bearer_token(header).ok_or_else(|| {
            ApiError::Unauthorized("Invalid Authorization header format".to_string())
        })?;

        let identity = state.tokens.verify(token).map_err(|e| {
            tracing::debug!(error = %e, "Rejected bearer token");
            ApiError::from(DomainError::from(e))
        })?;

        Ok(Auth(identity))
    }
}

/// Authenticated caller holding the admin role.
///
/// Placed ahead of path and body extractors so a non-admin is refused with
/// 403 before the rest of the request is even parsed.
#[derive(Debug, Clone)]
pub struct Admin(pub Identity);

#[async_trait]
impl FromRequestParts<AppState> for Admin {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Auth(identity) = Auth::from_request_parts(parts, state).await?;
        require_role(&identity, Role::Admin)?;
        Ok(Admin(identity))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bearer_token_parsing() {
        assert_eq!(bearer_token("Bearer abc.def.ghi"), Some("abc.def.ghi"));
        assert_eq!(bearer_token("bearer abc"), Some("abc"));
        assert_eq!(bearer_token("Basic dXNlcjpwYXNz"), None);
        assert_eq!(bearer_token("Bearer "), None);
        assert_eq!(bearer_token("Bearer"), None);
    }
}
