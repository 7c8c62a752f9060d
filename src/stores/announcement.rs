//! Announcement store.

use std::sync::Arc;

use serde_json::{json, Value};

use crate::domain::errors::ApiResult;
use crate::domain::models::{Announcement, FilterMap, FilterValue};
use crate::domain::ports::{ApiRequest, EnvelopeShape, Transport};
use crate::services::{normalize_submission, ListController, ListEndpoint};

const LIST_ENDPOINT: ListEndpoint =
    ListEndpoint::post("/gm/announcement/list").with_shape(EnvelopeShape::ANNOUNCEMENTS);

/// Submission fields holding calendar values.
const TIME_FIELDS: &[&str] = &["startTime", "endTime"];

fn default_filters() -> FilterMap {
    let mut filters = FilterMap::new();
    filters.insert("type".to_string(), FilterValue::empty());
    filters.insert("time_range".to_string(), FilterValue::empty_range());
    filters
}

/// State container for the announcement console page.
pub struct AnnouncementStore {
    transport: Arc<dyn Transport>,
    pub list: ListController<Announcement>,
}

impl AnnouncementStore {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        let list = ListController::new(Arc::clone(&transport), LIST_ENDPOINT, default_filters());
        Self { transport, list }
    }

    /// Fetch the current page of announcements. Never errors.
    pub async fn fetch_list(&mut self, extra: FilterMap) {
        self.list.fetch(extra).await;
    }

    pub async fn add(&mut self, announcement: &Value) -> ApiResult<()> {
        let body = normalize_submission(announcement, TIME_FIELDS, &[]);
        self.transport
            .call(ApiRequest::post("/gm/announcement/add", body))
            .await
            .and_then(|env| env.into_data("add announcement failed"))
            .inspect_err(|error| tracing::error!(%error, "add announcement failed"))?;
        self.fetch_list(FilterMap::new()).await;
        Ok(())
    }

    pub async fn delete(&mut self, id: u64) -> ApiResult<()> {
        self.transport
            .call(ApiRequest::post("/gm/announcement/delete", json!({ "id": id })))
            .await
            .and_then(|env| env.into_data("delete announcement failed"))
            .inspect_err(|error| tracing::error!(id, %error, "delete announcement failed"))?;
        self.fetch_list(FilterMap::new()).await;
        Ok(())
    }

    pub async fn alter(&mut self, announcement: &Value) -> ApiResult<()> {
        let body = normalize_submission(announcement, TIME_FIELDS, &[]);
        self.transport
            .call(ApiRequest::post("/gm/announcement/alter", body))
            .await
            .and_then(|env| env.into_data("alter announcement failed"))
            .inspect_err(|error| tracing::error!(%error, "alter announcement failed"))?;
        self.fetch_list(FilterMap::new()).await;
        Ok(())
    }

    /// Pin or unpin an announcement on the in-game board.
    pub async fn topping(&mut self, id: u64, top: bool) -> ApiResult<()> {
        self.transport
            .call(ApiRequest::post(
                "/gm/announcement/topping",
                json!({ "id": id, "top": i32::from(top) }),
            ))
            .await
            .and_then(|env| env.into_data("topping announcement failed"))
            .inspect_err(|error| tracing::error!(id, top, %error, "topping announcement failed"))?;
        self.fetch_list(FilterMap::new()).await;
        Ok(())
    }
}
