//! Role-based authorization checks.

use domain::models::{Identity, Role};
use domain::DomainError;

/// Ensures the caller holds `required`.
///
/// Admin-gated operations call this before touching any data, so a
/// non-admin gets 403 regardless of whether the payload or target is valid.
pub fn require_role(identity: &Identity, required: Role) -> Result<(), DomainError> {
    if identity.role.satisfies(required) {
        return Ok(());
    }

    tracing::warn!(
        user_id = identity.id,
        role = %identity.role,
        required = %required,
        "Authorization denied"
    );

    Err(DomainError::Forbidden(match required {
        Role::Admin => "Administrator privileges required".to_string(),
        Role::User => "Authenticated user required".to_string(),
    }))
}

/// True if the caller may act on a resource owned by `owner_id`.
pub fn owns_or_admin(identity: &Identity, owner_id: i64) -> bool {
    match identity.role {
        Role::Admin => true,
        Role::User => identity.id == owner_id,
    }
}
