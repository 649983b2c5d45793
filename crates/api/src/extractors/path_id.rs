//! Positive numeric path parameter extractor.

use axum::{
    async_trait,
    extract::{FromRequestParts, Path},
    http::request::Parts,
};
use shared::validation::validate_positive_id;

use crate::error::ApiError;

/// A single `:id` path segment that must parse as a positive integer.
///
/// Both a non-numeric segment and a zero or negative value are rejected
/// with 400.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathId(pub i64);

#[async_trait]
impl<S> FromRequestParts<S> for PathId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id) = Path::<i64>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::Validation(e.body_text()))?;

        validate_positive_id(id).map_err(|e| {
            ApiError::Validation(
                e.message
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| "Id must be positive".to_string()),
            )
        })?;

        Ok(PathId(id))
    }
}
