//! Database entity definitions.
//!
//! Entities are direct mappings to database rows.

pub mod court;
pub mod reservation;
pub mod schedule;
pub mod user;

pub use court::CourtEntity;
pub use reservation::ReservationEntity;
pub use schedule::ScheduleEntity;
pub use user::UserEntity;
