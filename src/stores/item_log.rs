//! Item/resource transaction log store.

use std::sync::Arc;

use bytes::Bytes;
use serde_json::{json, Value};

use crate::domain::errors::ApiResult;
use crate::domain::models::filter::wire_params;
use crate::domain::models::{FilterMap, FilterValue, ItemStats, ResourceLog};
use crate::domain::ports::{ApiRequest, Transport};
use crate::services::{ListController, ListEndpoint};

const LIST_ENDPOINT: ListEndpoint = ListEndpoint::post("/gm/item/list");

fn default_filters() -> FilterMap {
    let mut filters = FilterMap::new();
    filters.insert("player_id".to_string(), FilterValue::empty());
    filters.insert("res_type".to_string(), FilterValue::empty());
    filters.insert("res_id".to_string(), FilterValue::empty());
    filters.insert("operation_type".to_string(), FilterValue::empty());
    filters.insert("log_time_range".to_string(), FilterValue::empty_range());
    filters
}

/// State container for the transaction-log console page.
pub struct ItemLogStore {
    transport: Arc<dyn Transport>,
    pub list: ListController<ResourceLog>,
    pub current_log: Option<ResourceLog>,
    pub stats: ItemStats,
    pub item_types: Vec<String>,
    pub operation_types: Vec<String>,
}

impl ItemLogStore {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        let list = ListController::new(Arc::clone(&transport), LIST_ENDPOINT, default_filters());
        Self {
            transport,
            list,
            current_log: None,
            stats: ItemStats::default(),
            item_types: Vec::new(),
            operation_types: Vec::new(),
        }
    }

    /// Fetch the current page of log rows. Never errors.
    pub async fn fetch_list(&mut self, extra: FilterMap) {
        self.list.fetch(extra).await;
    }

    pub async fn fetch_log(&mut self, id: u64) -> ApiResult<ResourceLog> {
        let data = self
            .transport
            .call(ApiRequest::get(format!("/gm/item/{id}")))
            .await
            .and_then(|env| env.into_data("log detail fetch failed"))
            .inspect_err(|error| tracing::error!(id, %error, "log detail fetch failed"))?;
        let log: ResourceLog = serde_json::from_value(data)?;
        self.current_log = Some(log.clone());
        Ok(log)
    }

    pub async fn create_log(&mut self, log: Value) -> ApiResult<Value> {
        let data = self
            .transport
            .call(ApiRequest::post("/gm/item", log))
            .await
            .and_then(|env| env.into_data("create log failed"))
            .inspect_err(|error| tracing::error!(%error, "create log failed"))?;
        self.fetch_list(FilterMap::new()).await;
        Ok(data)
    }

    pub async fn update_log(&mut self, log: Value) -> ApiResult<Value> {
        let data = self
            .transport
            .call(ApiRequest::put("/gm/item", log))
            .await
            .and_then(|env| env.into_data("update log failed"))
            .inspect_err(|error| tracing::error!(%error, "update log failed"))?;
        self.fetch_list(FilterMap::new()).await;
        Ok(data)
    }

    pub async fn delete_log(&mut self, id: u64) -> ApiResult<()> {
        self.transport
            .call(ApiRequest::delete("/gm/item", json!({ "id": id })))
            .await
            .and_then(|env| env.into_data("delete log failed"))
            .inspect_err(|error| tracing::error!(id, %error, "delete log failed"))?;
        self.fetch_list(FilterMap::new()).await;
        Ok(())
    }

    pub async fn batch_delete(&mut self, ids: &[u64]) -> ApiResult<()> {
        self.transport
            .call(ApiRequest::post("/gm/item/batchDelete", json!({ "ids": ids })))
            .await
            .and_then(|env| env.into_data("batch delete failed"))
            .inspect_err(|error| tracing::error!(count = ids.len(), %error, "batch delete failed"))?;
        self.fetch_list(FilterMap::new()).await;
        Ok(())
    }

    /// Export matching rows as a binary payload.
    pub async fn export(&self, extra: FilterMap) -> ApiResult<Bytes> {
        let mut params = wire_params(self.list.filters());
        for (name, value) in wire_params(&extra) {
            params.insert(name, value);
        }
        self.transport
            .download(ApiRequest::post("/gm/item/export", Value::Object(params)))
            .await
            .inspect_err(|error| tracing::error!(%error, "log export failed"))
    }

    /// Delete rows older than `days` days.
    pub async fn cleanup(&mut self, days: u32) -> ApiResult<Value> {
        let data = self
            .transport
            .call(ApiRequest::post("/gm/item/cleanup", json!({ "days": days })))
            .await
            .and_then(|env| env.into_data("cleanup failed"))
            .inspect_err(|error| tracing::error!(days, %error, "cleanup failed"))?;
        self.fetch_list(FilterMap::new()).await;
        Ok(data)
    }

    pub async fn fetch_stats(&mut self) -> ApiResult<ItemStats> {
        let data = self
            .transport
            .call(ApiRequest::post("/gm/item/stats", json!({})))
            .await
            .and_then(|env| env.into_data("log stats fetch failed"))
            .inspect_err(|error| tracing::error!(%error, "log stats fetch failed"))?;
        let stats: ItemStats = serde_json::from_value(data)?;
        self.stats = stats.clone();
        Ok(stats)
    }

    pub async fn fetch_item_types(&mut self) -> ApiResult<Vec<String>> {
        let data = self
            .transport
            .call(ApiRequest::get("/gm/item/types"))
            .await
            .and_then(|env| env.into_data("item types fetch failed"))
            .inspect_err(|error| tracing::error!(%error, "item types fetch failed"))?;
        let types = string_rows(&data);
        self.item_types = types.clone();
        Ok(types)
    }

    pub async fn fetch_operation_types(&mut self) -> ApiResult<Vec<String>> {
        let data = self
            .transport
            .call(ApiRequest::get("/gm/item/operationTypes"))
            .await
            .and_then(|env| env.into_data("operation types fetch failed"))
            .inspect_err(|error| tracing::error!(%error, "operation types fetch failed"))?;
        let types = string_rows(&data);
        self.operation_types = types.clone();
        Ok(types)
    }
}

fn string_rows(data: &Value) -> Vec<String> {
    data.get("list")
        .and_then(Value::as_array)
        .map(|rows| {
            rows.iter()
                .filter_map(Value::as_str)
                .map(ToString::to_string)
                .collect()
        })
        .unwrap_or_default()
}
