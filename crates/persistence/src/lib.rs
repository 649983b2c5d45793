//! Persistence layer for the court reservation backend.
//!
//! This crate contains:
//! - Database connection management
//! - Entity definitions (database row mappings)
//! - Repository implementations, including the atomic booking protocol

pub mod db;
pub mod entities;
pub mod metrics;
pub mod repositories;
