//! Generic paginated/filterable collection state.
//!
//! One controller instance owns one entity page. `fetch` replaces the page
//! wholesale from the backend's answer and never errors toward its caller:
//! any failure resets the page to an empty shape and is logged, so the
//! rendering layer always sees a consistent, empty-but-valid state. The
//! write path in the stores is the opposite: failures propagate.
//!
//! Overlapping `fetch` calls are not cancelled; the last one to finish
//! wins, which can briefly show stale data when responses resolve out of
//! submission order. Accepted behavior, inherited from the backend's
//! console this layer fronts.

use std::sync::Arc;

use serde_json::{Map, Value};

use crate::domain::errors::ApiResult;
use crate::domain::models::filter::{merge_filters, wire_params};
use crate::domain::models::{EntityPage, FilterMap, PageItem, DEFAULT_PAGE, DEFAULT_PAGE_SIZE};
use crate::domain::ports::{ApiRequest, EnvelopeShape, Method, Transport};

/// Where and how a controller's list endpoint is called.
#[derive(Debug, Clone, Copy)]
pub struct ListEndpoint {
    pub path: &'static str,
    pub method: Method,
    pub shape: EnvelopeShape,
}

impl ListEndpoint {
    pub const fn post(path: &'static str) -> Self {
        Self {
            path,
            method: Method::Post,
            shape: EnvelopeShape::STANDARD,
        }
    }

    pub const fn with_shape(mut self, shape: EnvelopeShape) -> Self {
        self.shape = shape;
        self
    }
}

/// Paginated, filterable collection state for one entity family.
pub struct ListController<E> {
    transport: Arc<dyn Transport>,
    endpoint: ListEndpoint,
    default_filters: FilterMap,
    filters: FilterMap,
    items: Vec<E>,
    total: u64,
    page: u64,
    page_size: u64,
    loading: bool,
}

impl<E: PageItem> ListController<E> {
    pub fn new(
        transport: Arc<dyn Transport>,
        endpoint: ListEndpoint,
        default_filters: FilterMap,
    ) -> Self {
        Self {
            transport,
            endpoint,
            filters: default_filters.clone(),
            default_filters,
            items: Vec::new(),
            total: 0,
            page: DEFAULT_PAGE,
            page_size: DEFAULT_PAGE_SIZE,
            loading: false,
        }
    }

    /// Fetch the current page.
    ///
    /// `extra` parameters override stored filters for this call only. On
    /// failure the page is cleared and the error logged; it is never
    /// returned. `loading` is true for the call's duration on every path.
    pub async fn fetch(&mut self, extra: FilterMap) {
        self.loading = true;
        if let Err(error) = self.try_fetch(&extra).await {
            tracing::error!(path = self.endpoint.path, %error, "list fetch failed");
            self.items.clear();
            self.total = 0;
        }
        self.loading = false;
    }

    /// The fallible fetch underneath [`fetch`](Self::fetch); exposed so
    /// tests can observe the failure the public path collapses.
    pub(crate) async fn try_fetch(&mut self, extra: &FilterMap) -> ApiResult<()> {
        let mut params = Map::new();
        params.insert("page".to_string(), Value::from(self.page));
        params.insert("pageSize".to_string(), Value::from(self.page_size));
        for (name, value) in wire_params(&self.filters) {
            params.insert(name, value);
        }
        // Extras take precedence over stored filters.
        for (name, value) in wire_params(extra) {
            params.insert(name, value);
        }

        let request = match self.endpoint.method {
            Method::Get => {
                let mut request = ApiRequest::get(self.endpoint.path);
                for (name, value) in &params {
                    request = request.with_query(name.clone(), param_string(value));
                }
                request
            }
            Method::Post => ApiRequest::post(self.endpoint.path, Value::Object(params)),
            Method::Put => ApiRequest::put(self.endpoint.path, Value::Object(params)),
            Method::Delete => ApiRequest::delete(self.endpoint.path, Value::Object(params)),
        }
        .with_shape(self.endpoint.shape);

        let envelope = self.transport.call(request).await?;
        let data = envelope.into_data("list fetch failed")?;

        let mut items: Vec<E> = match data.get("list") {
            Some(rows @ Value::Array(_)) => serde_json::from_value(rows.clone())?,
            _ => Vec::new(),
        };
        for item in &mut items {
            item.decorate();
        }

        // The backend is authoritative for pagination state.
        self.items = items;
        self.total = data.get("total").and_then(Value::as_u64).unwrap_or(0);
        self.page = data
            .get("page")
            .and_then(Value::as_u64)
            .unwrap_or(DEFAULT_PAGE);
        self.page_size = data
            .get("pageSize")
            .and_then(Value::as_u64)
            .unwrap_or(DEFAULT_PAGE_SIZE);
        Ok(())
    }

    /// Shallow-merge `partial` into the stored filter record.
    pub fn set_filter(&mut self, partial: FilterMap) {
        merge_filters(&mut self.filters, partial);
    }

    /// Restore the entity-specific default filter shape.
    pub fn reset_filter(&mut self) {
        self.filters = self.default_filters.clone();
    }

    pub fn set_page(&mut self, page: u64) {
        self.page = page.max(1);
    }

    /// Changing the page size invalidates the prior page offset.
    pub fn set_page_size(&mut self, page_size: u64) {
        self.page_size = page_size.max(1);
        self.page = 1;
    }

    pub fn items(&self) -> &[E] {
        &self.items
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn page(&self) -> u64 {
        self.page
    }

    pub fn page_size(&self) -> u64 {
        self.page_size
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    pub fn filters(&self) -> &FilterMap {
        &self.filters
    }

    pub fn has_items(&self) -> bool {
        !self.items.is_empty()
    }

    pub fn total_pages(&self) -> u64 {
        if self.page_size == 0 {
            return 0;
        }
        self.total.div_ceil(self.page_size)
    }

    /// A copy of the page as one value, for callers that hand the whole
    /// slice to a renderer.
    pub fn snapshot(&self) -> EntityPage<E>
    where
        E: Clone,
    {
        EntityPage {
            items: self.items.clone(),
            total: self.total,
            page: self.page,
            page_size: self.page_size,
        }
    }

    /// Drop all fetched state and restore the default filters.
    pub fn clear(&mut self) {
        self.items.clear();
        self.total = 0;
        self.page = DEFAULT_PAGE;
        self.reset_filter();
    }
}

fn param_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
