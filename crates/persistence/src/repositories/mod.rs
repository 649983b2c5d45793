//! Repository implementations for database operations.

pub mod court;
pub mod reservation;
pub mod schedule;
pub mod user;

pub use court::{CourtRepository, UpdateCourtOutcome};
pub use reservation::{BookingOutcome, CancelOutcome, ReservationRepository};
pub use schedule::{CreateScheduleOutcome, ScheduleRepository, UpdateScheduleOutcome};
pub use user::{NewUser, UserRepository};
