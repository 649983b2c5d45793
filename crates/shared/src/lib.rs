//! Shared utilities and common types for the court reservation backend.
//!
//! This crate provides common functionality used across all other crates:
//! - Caller identity and role types
//! - Password hashing with Argon2id
//! - Signed session tokens (JWT)
//! - Common validation logic

pub mod identity;
pub mod jwt;
pub mod password;
pub mod validation;
