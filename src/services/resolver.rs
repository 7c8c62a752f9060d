//! Attachment resolution.
//!
//! Given a batch of heterogeneous attachment records, loads exactly the
//! catalogs needed to render them: N attachments referencing K distinct
//! types issue at most K network calls, and types already cached this
//! session issue none. Loads run concurrently and failures are isolated
//! per type.

use std::sync::Arc;

use futures::future::join_all;

use crate::domain::models::Attachment;
use crate::services::catalog::ReferenceCatalog;

/// Loads the reference catalogs a batch of attachments needs.
pub struct AttachmentResolver {
    catalog: Arc<ReferenceCatalog>,
}

impl AttachmentResolver {
    pub fn new(catalog: Arc<ReferenceCatalog>) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &Arc<ReferenceCatalog> {
        &self.catalog
    }

    /// Make every attachment's display name resolvable.
    ///
    /// Dedupes the distinct `type` values, skips those already cached,
    /// and dispatches the remaining loads concurrently. A failed load is
    /// logged and does not prevent the other types from resolving. This
    /// returns only once every dispatched load has settled; afterwards
    /// `resolve_entry_name` answers from the cache for every type that
    /// loaded successfully.
    ///
    /// There is no in-flight marker: two overlapping calls naming the
    /// same uncached type will both fetch it. The second write stores an
    /// equivalent map, so the race wastes one call and nothing else.
    pub async fn ensure_resolved(&self, attachments: &[Attachment]) {
        if attachments.is_empty() {
            return;
        }

        let mut needed: Vec<&str> = Vec::new();
        for attachment in attachments {
            if !needed.contains(&attachment.res_type.as_str()) {
                needed.push(&attachment.res_type);
            }
        }
        needed.retain(|res_type| !self.catalog.is_loaded(res_type));
        if needed.is_empty() {
            return;
        }

        let loads = needed.into_iter().map(|res_type| async move {
            if let Err(error) = self.catalog.load_catalog(res_type).await {
                tracing::warn!(res_type, %error, "attachment catalog load failed");
            }
        });
        join_all(loads).await;
    }
}
