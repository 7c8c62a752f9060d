//! Gmdesk - Back-Office Console Data Layer
//!
//! Gmdesk is the client-side data layer for a multiplayer game's admin
//! console: paginated, filterable entity lists (users, resource transaction
//! logs, announcements, personal and system mail), command-style mutations,
//! and a session-scoped reference-data cache used to resolve mail-attachment
//! display names.
//!
//! # Architecture
//!
//! This crate follows Clean Architecture / Hexagonal Architecture principles:
//!
//! - **Domain Layer** (`domain`): Pure models, the error taxonomy, and the
//!   transport port every call goes through
//! - **Service Layer** (`services`): The generic list controller, the
//!   reference catalog cache, the attachment resolver, and submission
//!   normalization
//! - **Store Layer** (`stores`): Per-entity state containers built on the
//!   service layer
//! - **Infrastructure Layer** (`infrastructure`): HTTP transport,
//!   configuration loading, and logging setup
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use gmdesk::infrastructure::http::HttpTransport;
//! use gmdesk::stores::SystemMailStore;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = gmdesk::infrastructure::config::ConfigLoader::load()?;
//!     let transport = Arc::new(HttpTransport::new(&config)?);
//!     let mut store = SystemMailStore::new(transport);
//!     store.fetch_list(gmdesk::FilterMap::new()).await;
//!     Ok(())
//! }
//! ```

pub mod domain;
pub mod infrastructure;
pub mod services;
pub mod stores;

// Re-export commonly used types for convenience
pub use domain::errors::{ApiError, ApiResult};
pub use domain::models::{
    Attachment, CatalogEntry, Config, EntityPage, FilterMap, FilterValue, HttpConfig,
    LoggingConfig, ResourceType,
};
pub use domain::ports::{ApiRequest, Envelope, EnvelopeShape, Method, Transport};
pub use infrastructure::config::{ConfigError, ConfigLoader};
pub use infrastructure::http::HttpTransport;
pub use services::{AttachmentResolver, ListController, ReferenceCatalog};
