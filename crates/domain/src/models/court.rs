//! Court domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use validator::{Validate, ValidationError};

/// Whether a court is covered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CourtEnvironment {
    Indoor,
    Outdoor,
}

impl CourtEnvironment {
    pub fn as_str(&self) -> &'static str {
        match self {
            CourtEnvironment::Indoor => "indoor",
            CourtEnvironment::Outdoor => "outdoor",
        }
    }
}

impl FromStr for CourtEnvironment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "indoor" => Ok(CourtEnvironment::Indoor),
            "outdoor" => Ok(CourtEnvironment::Outdoor),
            _ => Err(format!("Invalid court environment: {}", s)),
        }
    }
}

impl fmt::Display for CourtEnvironment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A bookable court.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct Court {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub sport_type: String,
    pub environment: CourtEnvironment,
    /// Minimum reservation length in minutes.
    pub min_reservation_time: i32,
    /// Maximum reservation length in minutes.
    pub max_reservation_time: i32,
    pub owner_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Returns true if a slot of `minutes` fits a court's inclusive
/// `[min, max]` reservation bounds.
pub fn duration_in_range(minutes: i64, min: i32, max: i32) -> bool {
    minutes >= i64::from(min) && minutes <= i64::from(max)
}

/// Payload for creating or fully updating a court.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
#[validate(schema(function = "validate_court_durations"))]
pub struct CourtRequest {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: String,

    #[validate(length(max = 500, message = "Description must be at most 500 characters"))]
    pub description: Option<String>,

    #[validate(length(min = 1, max = 50, message = "Sport type must be 1-50 characters"))]
    pub sport_type: String,

    pub environment: CourtEnvironment,

    #[validate(range(min = 1, max = 1440, message = "min_reservation_time must be 1-1440 minutes"))]
    pub min_reservation_time: i32,

    #[validate(range(min = 1, max = 1440, message = "max_reservation_time must be 1-1440 minutes"))]
    pub max_reservation_time: i32,
}

fn validate_court_durations(request: &CourtRequest) -> Result<(), ValidationError> {
    shared::validation::validate_duration_range(
        request.min_reservation_time,
        request.max_reservation_time,
    )
}
