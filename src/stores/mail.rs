//! Personal and system mail stores.
//!
//! System mail is the one surface that renders reference data: its list
//! fetch collects every attachment on the page and awaits the attachment
//! resolver, so by the time `fetch_list` returns, `resolve_entry_name`
//! answers from the cache for every type that loaded successfully.

use std::sync::Arc;

use serde_json::{json, Value};

use crate::domain::errors::ApiResult;
use crate::domain::models::{
    Attachment, CatalogEntry, FilterMap, FilterValue, PersonalMail, ResourceType, SystemMail,
};
use crate::domain::ports::{ApiRequest, Transport};
use crate::services::catalog::ReferenceCatalog;
use crate::services::{normalize_submission, AttachmentResolver, ListController, ListEndpoint};

const PERSONAL_LIST: ListEndpoint = ListEndpoint::post("/gm/email/personal/list");
const SYSTEM_LIST: ListEndpoint = ListEndpoint::post("/gm/email/system/list");

/// Submission fields holding calendar values.
const TIME_FIELDS: &[&str] = &["startTime", "maxRegTime"];

/// Submission fields holding comma-separated id lists.
const ID_LIST_FIELDS: &[&str] = &["areaIds"];

fn default_filters() -> FilterMap {
    let mut filters = FilterMap::new();
    filters.insert("player_id".to_string(), FilterValue::empty());
    filters
}

/// State container for the personal (single-recipient) mail page.
pub struct PersonalMailStore {
    transport: Arc<dyn Transport>,
    pub list: ListController<PersonalMail>,
}

impl PersonalMailStore {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        let list = ListController::new(Arc::clone(&transport), PERSONAL_LIST, default_filters());
        Self { transport, list }
    }

    /// Fetch the current page of personal mail. Never errors.
    pub async fn fetch_list(&mut self, extra: FilterMap) {
        self.list.fetch(extra).await;
    }

    pub async fn send(&mut self, mail: &Value) -> ApiResult<()> {
        let body = normalize_submission(mail, TIME_FIELDS, ID_LIST_FIELDS);
        self.transport
            .call(ApiRequest::post("/gm/email/personal/send", body))
            .await
            .and_then(|env| env.into_data("send personal mail failed"))
            .inspect_err(|error| tracing::error!(%error, "send personal mail failed"))?;
        self.fetch_list(FilterMap::new()).await;
        Ok(())
    }

    pub async fn delete(&mut self, email_id: u64) -> ApiResult<()> {
        self.transport
            .call(ApiRequest::post(
                "/gm/email/personal/delete",
                json!({ "email_id": email_id }),
            ))
            .await
            .and_then(|env| env.into_data("delete personal mail failed"))
            .inspect_err(|error| tracing::error!(email_id, %error, "delete personal mail failed"))?;
        self.fetch_list(FilterMap::new()).await;
        Ok(())
    }

    pub async fn update(&mut self, mail: &Value) -> ApiResult<()> {
        let body = normalize_submission(mail, TIME_FIELDS, ID_LIST_FIELDS);
        self.transport
            .call(ApiRequest::post("/gm/email/personal/update", body))
            .await
            .and_then(|env| env.into_data("update personal mail failed"))
            .inspect_err(|error| tracing::error!(%error, "update personal mail failed"))?;
        self.fetch_list(FilterMap::new()).await;
        Ok(())
    }
}

/// State container for the system (broadcast) mail page.
///
/// Shares a [`ReferenceCatalog`] with whoever else renders reference data
/// in the session; the catalog is injected, not owned ambient state.
pub struct SystemMailStore {
    transport: Arc<dyn Transport>,
    pub list: ListController<SystemMail>,
    catalog: Arc<ReferenceCatalog>,
    resolver: AttachmentResolver,
}

impl SystemMailStore {
    /// Build a store with its own session catalog.
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        let catalog = Arc::new(ReferenceCatalog::new(Arc::clone(&transport)));
        Self::with_catalog(transport, catalog)
    }

    /// Build a store sharing an existing session catalog.
    pub fn with_catalog(transport: Arc<dyn Transport>, catalog: Arc<ReferenceCatalog>) -> Self {
        let list = ListController::new(Arc::clone(&transport), SYSTEM_LIST, default_filters());
        let resolver = AttachmentResolver::new(Arc::clone(&catalog));
        Self {
            transport,
            list,
            catalog,
            resolver,
        }
    }

    /// Fetch the current page of system mail and resolve the reference
    /// data its attachments point at. Never errors: a failed list fetch
    /// leaves an empty page, and a failed catalog load degrades that
    /// type's names to placeholders.
    pub async fn fetch_list(&mut self, extra: FilterMap) {
        self.list.fetch(extra).await;

        let attachments: Vec<Attachment> = self
            .list
            .items()
            .iter()
            .flat_map(|mail| mail.attachments.iter().cloned())
            .collect();
        self.resolver.ensure_resolved(&attachments).await;
    }

    pub async fn send(&mut self, mail: &Value) -> ApiResult<()> {
        let body = normalize_submission(mail, TIME_FIELDS, ID_LIST_FIELDS);
        self.transport
            .call(ApiRequest::post("/gm/email/system/send", body))
            .await
            .and_then(|env| env.into_data("send system mail failed"))
            .inspect_err(|error| tracing::error!(%error, "send system mail failed"))?;
        self.fetch_list(FilterMap::new()).await;
        Ok(())
    }

    pub async fn delete(&mut self, email_id: u64) -> ApiResult<()> {
        self.transport
            .call(ApiRequest::post(
                "/gm/email/system/delete",
                json!({ "email_id": email_id }),
            ))
            .await
            .and_then(|env| env.into_data("delete system mail failed"))
            .inspect_err(|error| tracing::error!(email_id, %error, "delete system mail failed"))?;
        self.fetch_list(FilterMap::new()).await;
        Ok(())
    }

    pub async fn update(&mut self, mail: &Value) -> ApiResult<()> {
        let body = normalize_submission(mail, TIME_FIELDS, ID_LIST_FIELDS);
        self.transport
            .call(ApiRequest::post("/gm/email/system/update", body))
            .await
            .and_then(|env| env.into_data("update system mail failed"))
            .inspect_err(|error| tracing::error!(%error, "update system mail failed"))?;
        self.fetch_list(FilterMap::new()).await;
        Ok(())
    }

    /// Load the resource-type descriptor set for composer pickers.
    pub async fn fetch_resource_types(&self) -> ApiResult<Vec<ResourceType>> {
        self.catalog.load_types().await?;
        Ok(self.catalog.types())
    }

    /// Load one type's resource list for a composer picker.
    pub async fn fetch_resource_list(&self, res_type: &str) -> ApiResult<Vec<CatalogEntry>> {
        self.catalog.load_catalog(res_type).await
    }

    /// Synchronous name lookups for rendering; placeholders on a miss.
    pub fn resource_type_name(&self, res_type: &str) -> String {
        self.catalog.resolve_type_name(res_type)
    }

    pub fn resource_name(&self, res_type: &str, id: i64) -> String {
        self.catalog.resolve_entry_name(res_type, id)
    }

    pub fn catalog(&self) -> &Arc<ReferenceCatalog> {
        &self.catalog
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::test_support::FakeTransport;

    fn mail_page() -> Value {
        json!({
            "list": [
                {
                    "id": 1, "title": "season rewards",
                    "attachments": [
                        { "type": "gold", "id": 7, "amount": 500 },
                        { "type": "gem", "id": 7, "amount": 10 },
                        { "type": "gold", "id": 8, "amount": 1 }
                    ],
                    "create_time": 1_700_000_000, "start_time": 0
                }
            ],
            "total": 1
        })
    }

    fn stub_catalogs(transport: &FakeTransport) {
        transport.ok(
            "/gm/item/resourceList?type=gold",
            json!({ "list": [ { "id": 7, "name": "Gold Pouch" }, { "id": 8, "name": "Gold Chest" } ] }),
        );
        transport.ok(
            "/gm/item/resourceList?type=gem",
            json!({ "list": [ { "id": 7, "name": "Ruby" } ] }),
        );
    }

    #[tokio::test]
    async fn test_fetch_list_resolves_attachment_names() {
        let transport = Arc::new(FakeTransport::new());
        transport.ok("/gm/email/system/list", mail_page());
        stub_catalogs(&transport);

        let mut store = SystemMailStore::new(Arc::clone(&transport) as Arc<dyn Transport>);
        store.fetch_list(FilterMap::new()).await;

        assert_eq!(store.list.items().len(), 1);
        assert!(!store.list.items()[0].create_time_formatted.is_empty());
        assert_eq!(store.list.items()[0].start_time_formatted, "-");

        // Same id, different types, distinct names.
        assert_eq!(store.resource_name("gold", 7), "Gold Pouch");
        assert_eq!(store.resource_name("gem", 7), "Ruby");

        // Three attachments, two distinct types, two catalog calls.
        assert_eq!(transport.call_count("/gm/item/resourceList?type=gold"), 1);
        assert_eq!(transport.call_count("/gm/item/resourceList?type=gem"), 1);
    }

    #[tokio::test]
    async fn test_refetch_reuses_cached_catalogs() {
        let transport = Arc::new(FakeTransport::new());
        transport.ok("/gm/email/system/list", mail_page());
        stub_catalogs(&transport);

        let mut store = SystemMailStore::new(Arc::clone(&transport) as Arc<dyn Transport>);
        store.fetch_list(FilterMap::new()).await;
        store.fetch_list(FilterMap::new()).await;

        assert_eq!(transport.call_count("/gm/email/system/list"), 2);
        assert_eq!(transport.call_count("/gm/item/resourceList?type=gold"), 1);
        assert_eq!(transport.call_count("/gm/item/resourceList?type=gem"), 1);
    }

    #[tokio::test]
    async fn test_send_normalizes_submission_and_refetches() {
        let transport = Arc::new(FakeTransport::new());
        transport.ok("/gm/email/system/list", mail_page());
        stub_catalogs(&transport);
        transport.ok("/gm/email/system/send", Value::Null);

        let mut store = SystemMailStore::new(Arc::clone(&transport) as Arc<dyn Transport>);
        store
            .send(&json!({
                "title": "welcome",
                "startTime": "1970-01-01T00:01:00Z",
                "areaIds": "1,2,3"
            }))
            .await
            .unwrap();

        assert_eq!(transport.call_count("/gm/email/system/send"), 1);
        assert_eq!(transport.call_count("/gm/email/system/list"), 1);
    }

    #[tokio::test]
    async fn test_failed_list_fetch_leaves_empty_page() {
        let transport = Arc::new(FakeTransport::new());
        transport.fail("/gm/email/system/list", 1, "backend busy");

        let mut store = SystemMailStore::new(transport);
        store.fetch_list(FilterMap::new()).await;

        assert!(store.list.items().is_empty());
        assert_eq!(store.list.total(), 0);
    }

    #[tokio::test]
    async fn test_shared_catalog_between_stores() {
        let transport = Arc::new(FakeTransport::new());
        transport.ok("/gm/email/system/list", mail_page());
        stub_catalogs(&transport);

        let catalog = Arc::new(ReferenceCatalog::new(
            Arc::clone(&transport) as Arc<dyn Transport>
        ));
        let mut first =
            SystemMailStore::with_catalog(Arc::clone(&transport) as Arc<dyn Transport>, Arc::clone(&catalog));
        first.fetch_list(FilterMap::new()).await;

        let second =
            SystemMailStore::with_catalog(Arc::clone(&transport) as Arc<dyn Transport>, catalog);
        assert_eq!(second.resource_name("gold", 8), "Gold Chest");
    }

    #[tokio::test]
    async fn test_personal_mail_delete_refetches() {
        let transport = Arc::new(FakeTransport::new());
        transport.ok(
            "/gm/email/personal/list",
            json!({ "list": [], "total": 0 }),
        );
        transport.ok("/gm/email/personal/delete", Value::Null);

        let mut store = PersonalMailStore::new(Arc::clone(&transport) as Arc<dyn Transport>);
        store.delete(12).await.unwrap();

        assert_eq!(transport.call_count("/gm/email/personal/delete"), 1);
        assert_eq!(transport.call_count("/gm/email/personal/list"), 1);
    }
}
