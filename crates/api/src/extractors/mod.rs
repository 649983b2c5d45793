//! Custom Axum extractors.
//!
//! Extractors for parsing and validating request data.

pub mod auth;
pub mod path_id;

pub use auth::{Admin, Auth};
pub use path_id::PathId;
