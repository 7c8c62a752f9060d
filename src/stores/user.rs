//! Game user store.
//!
//! Fronts the game-server user endpoints, including the one envelope
//! deviation in the repo: the list answers `{status, data.player_list}`
//! instead of `{code, data.list}`, declared here via
//! [`EnvelopeShape::PLAYER_LIST`] and flattened by the transport.

use std::sync::Arc;

use bytes::Bytes;
use serde_json::{json, Value};

use crate::domain::errors::ApiResult;
use crate::domain::models::filter::wire_params;
use crate::domain::models::{FilterMap, FilterValue, GameUser, UserStats};
use crate::domain::ports::{ApiRequest, EnvelopeShape, Transport};
use crate::services::{ListController, ListEndpoint};

const LIST_ENDPOINT: ListEndpoint =
    ListEndpoint::post("/gm/user/list").with_shape(EnvelopeShape::PLAYER_LIST);

fn default_filters() -> FilterMap {
    let mut filters = FilterMap::new();
    filters.insert("userId".to_string(), FilterValue::empty());
    filters.insert("playerId".to_string(), FilterValue::empty());
    filters.insert("uniqueId".to_string(), FilterValue::empty());
    filters.insert("nickname".to_string(), FilterValue::empty());
    filters
}

/// State container for the user console page.
pub struct UserStore {
    transport: Arc<dyn Transport>,
    pub list: ListController<GameUser>,
    pub current_user: Option<GameUser>,
    pub stats: UserStats,
}

impl UserStore {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        let list = ListController::new(Arc::clone(&transport), LIST_ENDPOINT, default_filters());
        Self {
            transport,
            list,
            current_user: None,
            stats: UserStats::default(),
        }
    }

    /// Fetch the current page of users. Never errors; see the read-path
    /// contract on [`ListController::fetch`].
    pub async fn fetch_list(&mut self, extra: FilterMap) {
        self.list.fetch(extra).await;
    }

    /// Fetch one user's detail record.
    pub async fn fetch_user(&mut self, id: u64) -> ApiResult<GameUser> {
        let data = self
            .transport
            .call(ApiRequest::get(format!("/gm/user/{id}")))
            .await
            .and_then(|env| env.into_data("user detail fetch failed"))
            .inspect_err(|error| tracing::error!(id, %error, "user detail fetch failed"))?;

        let user: GameUser = serde_json::from_value(data)?;
        self.current_user = Some(user.clone());
        Ok(user)
    }

    pub async fn create_user(&mut self, user: Value) -> ApiResult<Value> {
        let data = self
            .transport
            .call(ApiRequest::post("/gm/user", user))
            .await
            .and_then(|env| env.into_data("create user failed"))
            .inspect_err(|error| tracing::error!(%error, "create user failed"))?;
        self.fetch_list(FilterMap::new()).await;
        Ok(data)
    }

    pub async fn update_user(&mut self, user: Value) -> ApiResult<Value> {
        let data = self
            .transport
            .call(ApiRequest::put("/gm/user", user))
            .await
            .and_then(|env| env.into_data("update user failed"))
            .inspect_err(|error| tracing::error!(%error, "update user failed"))?;
        self.fetch_list(FilterMap::new()).await;
        Ok(data)
    }

    pub async fn delete_user(&mut self, id: u64) -> ApiResult<()> {
        self.transport
            .call(ApiRequest::delete("/gm/user", json!({ "id": id })))
            .await
            .and_then(|env| env.into_data("delete user failed"))
            .inspect_err(|error| tracing::error!(id, %error, "delete user failed"))?;
        self.fetch_list(FilterMap::new()).await;
        Ok(())
    }

    pub async fn reset_password(&mut self, id: u64) -> ApiResult<()> {
        self.transport
            .call(ApiRequest::post("/gm/user/resetPassword", json!({ "id": id })))
            .await
            .and_then(|env| env.into_data("reset password failed"))
            .inspect_err(|error| tracing::error!(id, %error, "reset password failed"))?;
        self.fetch_list(FilterMap::new()).await;
        Ok(())
    }

    /// 1: enabled, 2: disabled.
    pub async fn set_status(&mut self, id: u64, status: i32) -> ApiResult<()> {
        self.transport
            .call(ApiRequest::post(
                "/gm/user/status",
                json!({ "id": id, "status": status }),
            ))
            .await
            .and_then(|env| env.into_data("set user status failed"))
            .inspect_err(|error| tracing::error!(id, status, %error, "set user status failed"))?;
        self.fetch_list(FilterMap::new()).await;
        Ok(())
    }

    pub async fn toggle_ban_chat(&mut self, id: u64) -> ApiResult<()> {
        self.transport
            .call(ApiRequest::post("/gm/user/toggleBanChat", json!({ "id": id })))
            .await
            .and_then(|env| env.into_data("toggle ban chat failed"))
            .inspect_err(|error| tracing::error!(id, %error, "toggle ban chat failed"))?;
        self.fetch_list(FilterMap::new()).await;
        Ok(())
    }

    pub async fn toggle_ban_login(&mut self, id: u64) -> ApiResult<()> {
        self.transport
            .call(ApiRequest::post("/gm/user/toggleBanLogin", json!({ "id": id })))
            .await
            .and_then(|env| env.into_data("toggle ban login failed"))
            .inspect_err(|error| tracing::error!(id, %error, "toggle ban login failed"))?;
        self.fetch_list(FilterMap::new()).await;
        Ok(())
    }

    pub async fn batch_operate(&mut self, operation: &str, user_ids: &[u64]) -> ApiResult<()> {
        self.transport
            .call(ApiRequest::post(
                "/gm/user/batch",
                json!({ "operation": operation, "userIds": user_ids }),
            ))
            .await
            .and_then(|env| env.into_data("batch operation failed"))
            .inspect_err(|error| tracing::error!(operation, %error, "batch operation failed"))?;
        self.fetch_list(FilterMap::new()).await;
        Ok(())
    }

    /// Export matching users as a binary payload. Does not touch list
    /// state and does not re-fetch.
    pub async fn export(&self, extra: FilterMap) -> ApiResult<Bytes> {
        let mut params = wire_params(self.list.filters());
        for (name, value) in wire_params(&extra) {
            params.insert(name, value);
        }
        self.transport
            .download(ApiRequest::post("/gm/user/export", Value::Object(params)))
            .await
            .inspect_err(|error| tracing::error!(%error, "user export failed"))
    }

    pub async fn fetch_stats(&mut self) -> ApiResult<UserStats> {
        let data = self
            .transport
            .call(ApiRequest::get("/gm/user/stats"))
            .await
            .and_then(|env| env.into_data("user stats fetch failed"))
            .inspect_err(|error| tracing::error!(%error, "user stats fetch failed"))?;
        let stats: UserStats = serde_json::from_value(data)?;
        self.stats = stats.clone();
        Ok(stats)
    }

    /// Drop everything back to the initial shape.
    pub fn clear_state(&mut self) {
        self.list.clear();
        self.current_user = None;
        self.stats = UserStats::default();
    }
}
