//! Service layer: the generic list controller, the reference catalog
//! cache, the attachment resolver, and submission normalization.

pub mod catalog;
pub mod list_controller;
pub mod normalize;
pub mod resolver;

pub use catalog::ReferenceCatalog;
pub use list_controller::{ListController, ListEndpoint};
pub use normalize::normalize_submission;
pub use resolver::AttachmentResolver;
