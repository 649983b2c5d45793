//! Common validation utilities.

use chrono::NaiveTime;
use validator::ValidationError;

lazy_static::lazy_static! {
    static ref USERNAME_REGEX: regex::Regex =
        regex::Regex::new(r"^[A-Za-z0-9][A-Za-z0-9_.-]*$").unwrap();
}

/// Validates that a username starts with an alphanumeric character and only
/// contains letters, digits, `_`, `.` or `-`.
pub fn validate_username(username: &str) -> Result<(), ValidationError> {
    if USERNAME_REGEX.is_match(username) {
        Ok(())
    } else {
        let mut err = ValidationError::new("username_format");
        err.message = Some(
            "Username may only contain letters, digits, '_', '.' and '-'".into(),
        );
        Err(err)
    }
}

/// Validates that a path or body identifier is strictly positive.
pub fn validate_positive_id(id: i64) -> Result<(), ValidationError> {
    if id > 0 {
        Ok(())
    } else {
        let mut err = ValidationError::new("id_range");
        err.message = Some("Identifier must be greater than 0".into());
        Err(err)
    }
}

/// Validates that a time window is non-empty (`start < end`).
pub fn validate_time_window(start: NaiveTime, end: NaiveTime) -> Result<(), ValidationError> {
    if start < end {
        Ok(())
    } else {
        let mut err = ValidationError::new("time_window");
        err.message = Some("start_time must be before end_time".into());
        Err(err)
    }
}

/// Validates that a duration range in minutes is positive and ordered.
pub fn validate_duration_range(min_minutes: i32, max_minutes: i32) -> Result<(), ValidationError> {
    if min_minutes <= 0 || max_minutes <= 0 {
        let mut err = ValidationError::new("duration_positive");
        err.message = Some("Reservation durations must be positive".into());
        return Err(err);
    }
    if min_minutes > max_minutes {
        let mut err = ValidationError::new("duration_order");
        err.message = Some(
            "min_reservation_time cannot exceed max_reservation_time".into(),
        );
        return Err(err);
    }
    Ok(())
}
