//! reqwest-backed implementation of the transport port.
//!
//! Attaches the session headers (`x-token`, `x-user-id`) to every request,
//! enforces the configured fixed timeout, and normalizes each endpoint's
//! envelope dialect to the standard `{code, msg, data.list}` shape before
//! anything above this layer sees it. HTTP 401 maps to
//! [`ApiError::Unauthorized`]; there is no retry or backoff.

use std::sync::RwLock;
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::{Client, StatusCode};
use serde_json::Value;

use crate::domain::errors::{ApiError, ApiResult};
use crate::domain::models::Config;
use crate::domain::ports::{ApiRequest, Envelope, EnvelopeShape, Method, Transport};

/// HTTP transport for the console backend.
#[derive(Debug)]
pub struct HttpTransport {
    http: Client,
    base_url: String,
    /// Interior-mutable so a re-login can rotate the session token on a
    /// transport already shared behind an `Arc`.
    token: RwLock<String>,
    user_id: String,
}

impl HttpTransport {
    /// Build a transport from configuration.
    pub fn new(config: &Config) -> ApiResult<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.http.timeout_secs))
            .build()
            .map_err(|e| ApiError::Transport(format!("http client build failed: {e}")))?;

        Ok(Self {
            http,
            base_url: config.http.base_url.trim_end_matches('/').to_string(),
            token: RwLock::new(config.http.token.clone()),
            user_id: config.http.user_id.clone(),
        })
    }

    /// Replace the session token, e.g. after a re-login. Takes effect on
    /// the next request; in-flight requests keep the header they were
    /// built with.
    pub fn set_token(&self, token: String) {
        *self.token.write().expect("token lock") = token;
    }

    fn build(&self, request: &ApiRequest) -> reqwest::RequestBuilder {
        let url = format!("{}{}", self.base_url, request.path);
        let method = match request.method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Delete => reqwest::Method::DELETE,
        };

        let mut builder = self
            .http
            .request(method, url)
            .header("Content-Type", "application/json")
            .header("x-token", self.token.read().expect("token lock").as_str())
            .header("x-user-id", &self.user_id);

        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(ref body) = request.body {
            builder = builder.json(body);
        }
        builder
    }

    async fn send(&self, request: &ApiRequest) -> ApiResult<reqwest::Response> {
        let resp = self.build(request).send().await.map_err(|e| {
            ApiError::Transport(format!("request to {} failed: {e}", request.path))
        })?;

        let status = resp.status();
        if status == StatusCode::UNAUTHORIZED {
            let body = resp.text().await.unwrap_or_default();
            return Err(ApiError::Unauthorized(extract_msg(&body)));
        }
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(ApiError::Transport(format!(
                "{} returned {status}: {body}",
                request.path
            )));
        }
        Ok(resp)
    }

    /// Flatten an endpoint's envelope dialect into the standard shape.
    fn normalize(raw: Value, shape: EnvelopeShape) -> ApiResult<Envelope> {
        let code = raw
            .get(shape.success_field)
            .and_then(Value::as_i64)
            .ok_or_else(|| {
                ApiError::Decode(format!(
                    "envelope missing `{}` field",
                    shape.success_field
                ))
            })?;
        let msg = raw
            .get("msg")
            .and_then(Value::as_str)
            .map(ToString::to_string);

        let mut data = raw.get("data").cloned().unwrap_or(Value::Null);
        if shape.rows_field != EnvelopeShape::STANDARD.rows_field {
            if let Some(obj) = data.as_object_mut() {
                // Some deployments already answer with `list`; only move
                // the deviant field when the standard one is absent.
                if !obj.contains_key("list") {
                    if let Some(rows) = obj.remove(shape.rows_field) {
                        obj.insert("list".to_string(), rows);
                    }
                }
            }
        }

        Ok(Envelope { code, msg, data })
    }
}

fn extract_msg(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v.get("msg").and_then(Value::as_str).map(ToString::to_string))
        .unwrap_or_else(|| "session expired".to_string())
}

#[async_trait]
impl Transport for HttpTransport {
    async fn call(&self, request: ApiRequest) -> ApiResult<Envelope> {
        let resp = self.send(&request).await?;
        let raw: Value = resp
            .json()
            .await
            .map_err(|e| ApiError::Decode(format!("{} response: {e}", request.path)))?;

        tracing::debug!(path = %request.path, "api call completed");
        Self::normalize(raw, request.shape)
    }

    async fn download(&self, request: ApiRequest) -> ApiResult<Bytes> {
        let resp = self.send(&request).await?;
        resp.bytes()
            .await
            .map_err(|e| ApiError::Transport(format!("{} download: {e}", request.path)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_standard_envelope() {
        let raw = serde_json::json!({
            "code": 0,
            "msg": "ok",
            "data": { "list": [1, 2], "total": 2 }
        });
        let env = HttpTransport::normalize(raw, EnvelopeShape::STANDARD).unwrap();
        assert!(env.ok());
        assert_eq!(env.data["list"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_normalize_player_list_envelope() {
        let raw = serde_json::json!({
            "status": 0,
            "data": { "player_list": [{"id": 1}], "total": 1 }
        });
        let env = HttpTransport::normalize(raw, EnvelopeShape::PLAYER_LIST).unwrap();
        assert!(env.ok());
        assert_eq!(env.data["list"].as_array().unwrap().len(), 1);
        assert!(env.data.get("player_list").is_none());
    }

    #[test]
    fn test_normalize_player_list_prefers_existing_list() {
        let raw = serde_json::json!({
            "status": 0,
            "data": { "list": [{"id": 1}], "total": 1 }
        });
        let env = HttpTransport::normalize(raw, EnvelopeShape::PLAYER_LIST).unwrap();
        assert_eq!(env.data["list"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn test_normalize_announcement_rows() {
        let raw = serde_json::json!({
            "code": 0,
            "data": { "announcementList": [{}, {}, {}], "total": 3 }
        });
        let env = HttpTransport::normalize(raw, EnvelopeShape::ANNOUNCEMENTS).unwrap();
        assert_eq!(env.data["list"].as_array().unwrap().len(), 3);
    }

    #[test]
    fn test_normalize_rejects_missing_success_field() {
        let raw = serde_json::json!({ "data": {} });
        let err = HttpTransport::normalize(raw, EnvelopeShape::STANDARD).unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }

    #[test]
    fn test_normalize_failure_keeps_backend_message() {
        let raw = serde_json::json!({ "code": 7, "msg": "bad filter" });
        let env = HttpTransport::normalize(raw, EnvelopeShape::STANDARD).unwrap();
        assert!(!env.ok());
        assert_eq!(env.msg.as_deref(), Some("bad filter"));
    }
}
