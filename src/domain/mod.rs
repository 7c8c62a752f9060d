//! Domain layer for the gmdesk console data layer
//!
//! This module contains the core models, the error taxonomy, and the
//! transport port the rest of the crate is built against.

pub mod errors;
pub mod models;
pub mod ports;

// Re-export error types for convenient access
pub use errors::{ApiError, ApiResult};
