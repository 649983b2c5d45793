//! Domain models for court reservations.

pub mod court;
pub mod reservation;
pub mod schedule;
pub mod user;

pub use court::{Court, CourtEnvironment, CourtRequest};
pub use reservation::{Reservation, ReservationStatus};
pub use schedule::{
    CreateScheduleRequest, Schedule, ScheduleBatchRequest, SlotWindow, UpdateScheduleRequest,
};
pub use user::{Identity, RegisterUserRequest, Role, User};
