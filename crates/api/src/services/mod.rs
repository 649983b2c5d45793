//! Service layer between route handlers and repositories.

pub mod admin;
pub mod admin_bootstrap;
pub mod auth;
pub mod courts;
pub mod guard;
pub mod reservations;
pub mod schedules;

pub use admin::AdminService;
pub use auth::AuthService;
pub use courts::CourtService;
pub use reservations::ReservationService;
pub use schedules::ScheduleService;
