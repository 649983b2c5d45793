//! Schedule (bookable time slot) domain models.

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// A bookable time window on a court.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct Schedule {
    pub id: i64,
    pub court_id: i64,
    pub owner_id: i64,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    /// False while an active reservation holds the slot.
    pub available: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Length of the `[start, end)` window in whole minutes.
pub fn slot_minutes(start: NaiveTime, end: NaiveTime) -> i64 {
    (end - start).num_minutes()
}

/// Upper bound on the number of days a batch may span.
pub const MAX_BATCH_DAYS: i64 = 366;

/// Upper bound on the number of slots a single batch may create.
pub const MAX_BATCH_SLOTS: usize = 2000;

/// Date and time bounds of a slot, detached from any stored row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotWindow {
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
}

impl SlotWindow {
    pub fn duration_minutes(&self) -> i64 {
        slot_minutes(self.start_time, self.end_time)
    }
}

/// Payload for creating a schedule on a court.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
#[validate(schema(function = "validate_schedule_window"))]
pub struct CreateScheduleRequest {
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
}

impl CreateScheduleRequest {
    pub fn window(&self) -> SlotWindow {
        SlotWindow {
            date: self.date,
            start_time: self.start_time,
            end_time: self.end_time,
        }
    }
}

fn validate_schedule_window(request: &CreateScheduleRequest) -> Result<(), ValidationError> {
    shared::validation::validate_time_window(request.start_time, request.end_time)
}

/// Partial update of an unreserved schedule. Omitted fields keep their
/// current value.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
#[validate(schema(function = "validate_update_fields"))]
pub struct UpdateScheduleRequest {
    pub date: Option<NaiveDate>,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
}

impl UpdateScheduleRequest {
    /// Merges the provided fields over `current`.
    pub fn apply(&self, current: SlotWindow) -> SlotWindow {
        SlotWindow {
            date: self.date.unwrap_or(current.date),
            start_time: self.start_time.unwrap_or(current.start_time),
            end_time: self.end_time.unwrap_or(current.end_time),
        }
    }
}

fn validate_update_fields(request: &UpdateScheduleRequest) -> Result<(), ValidationError> {
    if request.date.is_none() && request.start_time.is_none() && request.end_time.is_none() {
        let mut err = ValidationError::new("empty_update");
        err.message = Some("At least one of date, start_time or end_time is required".into());
        return Err(err);
    }
    match (request.start_time, request.end_time) {
        (Some(start), Some(end)) => shared::validation::validate_time_window(start, end),
        _ => Ok(()),
    }
}

/// Payload for generating a run of equally sized slots across a date range.
///
/// `weekdays` uses 0 for Monday through 6 for Sunday and `months` uses 1
/// through 12. An empty list matches every day or month.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
#[validate(schema(function = "validate_batch"))]
pub struct ScheduleBatchRequest {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    #[validate(range(min = 1, max = 1440, message = "interval_minutes must be between 1 and 1440"))]
    pub interval_minutes: i64,
    #[serde(default)]
    pub weekdays: Vec<u32>,
    #[serde(default)]
    pub months: Vec<u32>,
}

impl ScheduleBatchRequest {
    fn matches(&self, day: NaiveDate) -> bool {
        let weekday = day.weekday().num_days_from_monday();
        (self.weekdays.is_empty() || self.weekdays.contains(&weekday))
            && (self.months.is_empty() || self.months.contains(&day.month()))
    }

    fn matching_days(&self) -> Vec<NaiveDate> {
        let mut days = Vec::new();
        let mut day = self.start_date;
        while day <= self.end_date {
            if self.matches(day) {
                days.push(day);
            }
            match day.succ_opt() {
                Some(next) => day = next,
                None => break,
            }
        }
        days
    }

    fn slots_per_day(&self) -> i64 {
        if self.interval_minutes <= 0 {
            return 0;
        }
        slot_minutes(self.start_time, self.end_time).max(0) / self.interval_minutes
    }

    /// Expands the request into concrete slot windows, ordered by date then
    /// start time. Slots never run past `end_time`.
    pub fn expand(&self) -> Vec<SlotWindow> {
        let per_day = self.slots_per_day();
        let mut windows = Vec::new();
        for date in self.matching_days() {
            for k in 0..per_day {
                let start_time = self.start_time + Duration::minutes(k * self.interval_minutes);
                windows.push(SlotWindow {
                    date,
                    start_time,
                    end_time: start_time + Duration::minutes(self.interval_minutes),
                });
            }
        }
        windows
    }
}

fn batch_error(code: &'static str, message: &'static str) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(message.into());
    err
}

fn validate_batch(request: &ScheduleBatchRequest) -> Result<(), ValidationError> {
    if request.end_date < request.start_date {
        return Err(batch_error("date_order", "end_date cannot be before start_date"));
    }
    if (request.end_date - request.start_date).num_days() + 1 > MAX_BATCH_DAYS {
        return Err(batch_error("date_span", "A batch may span at most 366 days"));
    }
    shared::validation::validate_time_window(request.start_time, request.end_time)?;
    if request.interval_minutes > slot_minutes(request.start_time, request.end_time) {
        return Err(batch_error(
            "interval_length",
            "interval_minutes cannot exceed the daily window",
        ));
    }
    if request.weekdays.iter().any(|day| *day > 6) {
        return Err(batch_error("weekday_range", "weekdays must be between 0 and 6"));
    }
    if request.months.iter().any(|month| !(1..=12).contains(month)) {
        return Err(batch_error("month_range", "months must be between 1 and 12"));
    }
    let total = request.matching_days().len() as i64 * request.slots_per_day();
    if total == 0 {
        return Err(batch_error("empty_batch", "The batch does not match any day"));
    }
    if total > MAX_BATCH_SLOTS as i64 {
        return Err(batch_error("batch_size", "A batch may create at most 2000 slots"));
    }
    Ok(())
}
