//! Port trait definitions (Hexagonal Architecture)
//!
//! The data layer talks to the backend exclusively through the
//! [`Transport`](transport::Transport) port; infrastructure supplies the
//! HTTP implementation, tests supply in-memory fakes.

pub mod transport;

pub use transport::{ApiRequest, Envelope, EnvelopeShape, Method, Transport};
