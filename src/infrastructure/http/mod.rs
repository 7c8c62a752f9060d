//! HTTP transport adapter.

pub mod client;

pub use client::HttpTransport;
