//! Infrastructure layer: external integrations.
//!
//! - `http`: reqwest-backed implementation of the transport port
//! - `config`: figment-based configuration loading
//! - `logging`: tracing subscriber setup

pub mod config;
pub mod http;
pub mod logging;
