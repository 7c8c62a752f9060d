//! Reference catalog cache.
//!
//! Session-scoped id -> display-name catalogs, one per resource type,
//! fetched lazily and kept until an explicit [`clear`](ReferenceCatalog::clear).
//! The cache key invariant carries the loading state: a `type` key present
//! at the top level means that type's catalog is loaded; a missing id
//! inside a loaded map means "unknown id", not "not yet loaded". The
//! synchronous lookups degrade to deterministic placeholders on a miss, so
//! rendering never blocks on a fetch.
//!
//! Constructed once per session and injected into consumers; intended to
//! be shared behind an `Arc`.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use serde_json::Value;

use crate::domain::errors::ApiResult;
use crate::domain::models::{CatalogEntry, ResourceType};
use crate::domain::ports::{ApiRequest, Transport};

const RESOURCE_TYPE_LIST_PATH: &str = "/gm/item/resourceTypeList";
const RESOURCE_LIST_PATH: &str = "/gm/item/resourceList";

/// Per-resource-type id -> name catalogs with a session lifetime.
pub struct ReferenceCatalog {
    transport: Arc<dyn Transport>,
    /// Full descriptor set, loaded once, lazily.
    types: RwLock<Vec<ResourceType>>,
    /// type -> (id -> display name). Key presence means "loaded".
    cache: RwLock<HashMap<String, HashMap<i64, String>>>,
    /// Working view for type-scoped UI pickers: the most recently loaded
    /// catalog, cleared on "no selection" and on load failure.
    current: RwLock<Vec<CatalogEntry>>,
}

impl ReferenceCatalog {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            types: RwLock::new(Vec::new()),
            cache: RwLock::new(HashMap::new()),
            current: RwLock::new(Vec::new()),
        }
    }

    /// Fetch the resource-type descriptor set if not already present.
    ///
    /// Idempotent once loaded. Concurrent first calls are not coalesced:
    /// both will fetch and the second assignment overwrites the first with
    /// an equivalent set.
    pub async fn load_types(&self) -> ApiResult<()> {
        if !self.types.read().expect("types lock").is_empty() {
            return Ok(());
        }

        let envelope = self
            .transport
            .call(ApiRequest::get(RESOURCE_TYPE_LIST_PATH))
            .await?;
        let data = envelope.into_data("resource type list fetch failed")?;
        let types: Vec<ResourceType> = match data.get("list") {
            Some(rows @ Value::Array(_)) => serde_json::from_value(rows.clone())?,
            _ => Vec::new(),
        };

        *self.types.write().expect("types lock") = types;
        Ok(())
    }

    /// Fetch one resource type's full id/name list and cache it.
    ///
    /// An empty `res_type` is the valid "no selection" state: it clears
    /// the working view and returns an empty list without touching the
    /// network. On failure the working view is cleared and the error is
    /// logged and returned.
    pub async fn load_catalog(&self, res_type: &str) -> ApiResult<Vec<CatalogEntry>> {
        if res_type.is_empty() {
            self.current.write().expect("current lock").clear();
            return Ok(Vec::new());
        }

        let result = self.fetch_catalog(res_type).await;
        match result {
            Ok(entries) => {
                let mut cache = self.cache.write().expect("cache lock");
                let by_id = cache.entry(res_type.to_string()).or_default();
                for entry in &entries {
                    by_id.insert(entry.id, entry.name.clone());
                }
                drop(cache);
                *self.current.write().expect("current lock") = entries.clone();
                Ok(entries)
            }
            Err(error) => {
                self.current.write().expect("current lock").clear();
                tracing::error!(res_type, %error, "resource catalog load failed");
                Err(error)
            }
        }
    }

    async fn fetch_catalog(&self, res_type: &str) -> ApiResult<Vec<CatalogEntry>> {
        let envelope = self
            .transport
            .call(ApiRequest::get(RESOURCE_LIST_PATH).with_query("type", res_type))
            .await?;
        let data = envelope.into_data("resource list fetch failed")?;
        match data.get("list") {
            Some(rows @ Value::Array(_)) => Ok(serde_json::from_value(rows.clone())?),
            _ => Ok(Vec::new()),
        }
    }

    /// Whether a type's catalog has been loaded this session.
    pub fn is_loaded(&self, res_type: &str) -> bool {
        self.cache.read().expect("cache lock").contains_key(res_type)
    }

    /// Display name of a resource type, or `Type{type}` when the
    /// descriptor set does not contain it. Never fails, never blocks.
    pub fn resolve_type_name(&self, res_type: &str) -> String {
        self.types
            .read()
            .expect("types lock")
            .iter()
            .find(|t| t.type_id == res_type)
            .map_or_else(|| format!("Type{res_type}"), |t| t.name.clone())
    }

    /// Display name of a catalog entry, or `Resource{id}` when the type
    /// or the id is not cached. Never fails, never blocks; safe to call
    /// mid-load.
    pub fn resolve_entry_name(&self, res_type: &str, id: i64) -> String {
        self.cache
            .read()
            .expect("cache lock")
            .get(res_type)
            .and_then(|by_id| by_id.get(&id))
            .map_or_else(|| format!("Resource{id}"), Clone::clone)
    }

    /// The loaded descriptor set.
    pub fn types(&self) -> Vec<ResourceType> {
        self.types.read().expect("types lock").clone()
    }

    /// The working resource list for type-scoped pickers.
    pub fn current_list(&self) -> Vec<CatalogEntry> {
        self.current.read().expect("current lock").clone()
    }

    /// Drop every catalog, the descriptor set, and the working view.
    /// The only reset; there is no TTL.
    pub fn clear(&self) {
        self.types.write().expect("types lock").clear();
        self.cache.write().expect("cache lock").clear();
        self.current.write().expect("current lock").clear();
    }

    #[cfg(test)]
    pub(crate) fn loaded_types(&self) -> Vec<String> {
        let mut types: Vec<String> = self
            .cache
            .read()
            .expect("cache lock")
            .keys()
            .cloned()
            .collect();
        types.sort();
        types
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::test_support::FakeTransport;
    use serde_json::json;

    fn catalog_with(transport: Arc<FakeTransport>) -> ReferenceCatalog {
        ReferenceCatalog::new(transport)
    }

    fn gold_rows() -> Value {
        json!({ "list": [ { "id": 7, "name": "Gold Pouch" }, { "id": 8, "name": "Gold Chest" } ] })
    }

    #[tokio::test]
    async fn test_load_types_is_idempotent_after_completion() {
        let transport = Arc::new(FakeTransport::new());
        transport.ok(
            "/gm/item/resourceTypeList",
            json!({ "list": [ { "type": "gold", "name": "Gold" } ] }),
        );

        let catalog = catalog_with(Arc::clone(&transport));
        catalog.load_types().await.unwrap();
        catalog.load_types().await.unwrap();

        assert_eq!(transport.call_count("/gm/item/resourceTypeList"), 1);
        assert_eq!(catalog.resolve_type_name("gold"), "Gold");
    }

    #[tokio::test]
    async fn test_resolve_type_name_fallback() {
        let transport = Arc::new(FakeTransport::new());
        let catalog = catalog_with(transport);
        assert_eq!(catalog.resolve_type_name("gem"), "Typegem");
    }

    #[tokio::test]
    async fn test_load_catalog_populates_cache_and_current() {
        let transport = Arc::new(FakeTransport::new());
        transport.ok("/gm/item/resourceList?type=gold", gold_rows());

        let catalog = catalog_with(transport);
        let entries = catalog.load_catalog("gold").await.unwrap();

        assert_eq!(entries.len(), 2);
        assert!(catalog.is_loaded("gold"));
        assert_eq!(catalog.resolve_entry_name("gold", 7), "Gold Pouch");
        assert_eq!(catalog.current_list().len(), 2);
    }

    #[tokio::test]
    async fn test_empty_type_is_no_selection_not_error() {
        let transport = Arc::new(FakeTransport::new());
        transport.ok("/gm/item/resourceList?type=gold", gold_rows());

        let catalog = catalog_with(Arc::clone(&transport));
        catalog.load_catalog("gold").await.unwrap();
        assert!(!catalog.current_list().is_empty());

        let entries = catalog.load_catalog("").await.unwrap();
        assert!(entries.is_empty());
        assert!(catalog.current_list().is_empty());
        // No network call for the empty type.
        assert_eq!(transport.total_calls(), 1);
    }

    #[tokio::test]
    async fn test_load_catalog_failure_clears_view_and_propagates() {
        let transport = Arc::new(FakeTransport::new());
        transport.ok("/gm/item/resourceList?type=gold", gold_rows());
        transport.fail("/gm/item/resourceList?type=gem", 3, "unknown type");

        let catalog = catalog_with(transport);
        catalog.load_catalog("gold").await.unwrap();
        assert!(!catalog.current_list().is_empty());

        let err = catalog.load_catalog("gem").await.unwrap_err();
        assert_eq!(err.user_message(), "unknown type");
        assert!(catalog.current_list().is_empty());
        // The failed type is not marked loaded.
        assert!(!catalog.is_loaded("gem"));
        // The earlier catalog survives.
        assert!(catalog.is_loaded("gold"));
    }

    #[tokio::test]
    async fn test_resolve_entry_name_fallback_contains_id() {
        let transport = Arc::new(FakeTransport::new());
        transport.ok("/gm/item/resourceList?type=gold", gold_rows());

        let catalog = catalog_with(transport);
        // Uncached type.
        assert_eq!(catalog.resolve_entry_name("gem", 42), "Resource42");

        catalog.load_catalog("gold").await.unwrap();
        // Cached type, unknown id.
        assert_eq!(catalog.resolve_entry_name("gold", 999), "Resource999");
    }

    #[tokio::test]
    async fn test_clear_resets_everything() {
        let transport = Arc::new(FakeTransport::new());
        transport.ok(
            "/gm/item/resourceTypeList",
            json!({ "list": [ { "type": "gold", "name": "Gold" } ] }),
        );
        transport.ok("/gm/item/resourceList?type=gold", gold_rows());

        let catalog = catalog_with(transport);
        catalog.load_types().await.unwrap();
        catalog.load_catalog("gold").await.unwrap();

        catalog.clear();
        assert!(!catalog.is_loaded("gold"));
        assert_eq!(catalog.resolve_type_name("gold"), "Typegold");
        assert!(catalog.current_list().is_empty());
    }
}
