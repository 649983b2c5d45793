//! HTTP route handlers.

pub mod admin;
pub mod auth;
pub mod courts;
pub mod health;
pub mod reservations;
