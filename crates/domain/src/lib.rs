//! Domain layer for the court reservation backend.
//!
//! This crate contains:
//! - Domain models (User, Court, Schedule, Reservation)
//! - Request payloads and their validation rules
//! - The domain error taxonomy shared by every service

pub mod errors;
pub mod models;

pub use errors::DomainError;
