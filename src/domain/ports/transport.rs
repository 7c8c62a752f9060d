//! The transport port: normalized request/response envelope contract.
//!
//! Call sites describe a request (path, method, payload) and receive one
//! normalized [`Envelope`] shape regardless of which backend family served
//! it. The game-server player-list endpoint deviates from the standard
//! `{code, data.list}` contract (`status` as the success field,
//! `player_list` as the row array); that seam is declared per endpoint via
//! [`EnvelopeShape`] and flattened away by the transport implementation so
//! nothing above this layer ever branches on it.

use async_trait::async_trait;
use bytes::Bytes;
use serde_json::Value;

use crate::domain::errors::{ApiError, ApiResult};

/// HTTP method of an API call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

/// Envelope dialect spoken by an endpoint.
///
/// `success_field` names the integer that is zero on success; `rows_field`
/// names the row array inside `data` for list endpoints. The transport
/// rewrites both to the standard `code`/`list` before handing the envelope
/// to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnvelopeShape {
    pub success_field: &'static str,
    pub rows_field: &'static str,
}

impl EnvelopeShape {
    /// The admin-backend contract: `{code, msg, data: {list, ...}}`.
    pub const STANDARD: Self = Self {
        success_field: "code",
        rows_field: "list",
    };

    /// The game-server user list: `{status, data: {player_list, ...}}`.
    pub const PLAYER_LIST: Self = Self {
        success_field: "status",
        rows_field: "player_list",
    };

    /// Announcement list rows arrive under `announcementList`.
    pub const ANNOUNCEMENTS: Self = Self {
        success_field: "code",
        rows_field: "announcementList",
    };
}

impl Default for EnvelopeShape {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// One API call as described by a call site.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub path: String,
    pub method: Method,
    /// JSON body for POST/PUT/DELETE calls.
    pub body: Option<Value>,
    /// Query parameters for GET calls.
    pub query: Vec<(String, String)>,
    pub shape: EnvelopeShape,
}

impl ApiRequest {
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            method: Method::Get,
            body: None,
            query: Vec::new(),
            shape: EnvelopeShape::STANDARD,
        }
    }

    pub fn post(path: impl Into<String>, body: Value) -> Self {
        Self {
            path: path.into(),
            method: Method::Post,
            body: Some(body),
            query: Vec::new(),
            shape: EnvelopeShape::STANDARD,
        }
    }

    pub fn put(path: impl Into<String>, body: Value) -> Self {
        Self {
            path: path.into(),
            method: Method::Put,
            body: Some(body),
            query: Vec::new(),
            shape: EnvelopeShape::STANDARD,
        }
    }

    pub fn delete(path: impl Into<String>, body: Value) -> Self {
        Self {
            path: path.into(),
            method: Method::Delete,
            body: Some(body),
            query: Vec::new(),
            shape: EnvelopeShape::STANDARD,
        }
    }

    pub fn with_query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((name.into(), value.into()));
        self
    }

    pub fn with_shape(mut self, shape: EnvelopeShape) -> Self {
        self.shape = shape;
        self
    }
}

/// The normalized response envelope every call resolves to.
#[derive(Debug, Clone)]
pub struct Envelope {
    /// Zero on success.
    pub code: i64,
    /// Backend-supplied human-readable message, when present.
    pub msg: Option<String>,
    /// Payload; `Value::Null` when the backend sent none.
    pub data: Value,
}

impl Envelope {
    pub fn ok(&self) -> bool {
        self.code == 0
    }

    /// Unwrap the payload of a successful envelope, or turn a failure
    /// envelope into an [`ApiError::Api`] carrying the backend message
    /// (`fallback` when the backend sent none).
    pub fn into_data(self, fallback: &str) -> ApiResult<Value> {
        if self.ok() {
            Ok(self.data)
        } else {
            Err(ApiError::from_envelope(self.code, self.msg, fallback))
        }
    }
}

/// The transport every API call goes through.
///
/// Implementations attach auth headers, enforce the fixed long timeout,
/// and normalize the per-endpoint envelope dialect. They perform no retry:
/// a failed call is surfaced exactly once.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Issue a call and normalize its response envelope.
    async fn call(&self, request: ApiRequest) -> ApiResult<Envelope>;

    /// Issue a call expecting a binary payload (exports) instead of a
    /// structured envelope.
    async fn download(&self, request: ApiRequest) -> ApiResult<Bytes>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_into_data_success() {
        let env = Envelope {
            code: 0,
            msg: None,
            data: serde_json::json!({"total": 3}),
        };
        assert_eq!(env.into_data("nope").unwrap()["total"], 3);
    }

    #[test]
    fn test_into_data_failure_carries_backend_message() {
        let env = Envelope {
            code: 5,
            msg: Some("no such mail".to_string()),
            data: Value::Null,
        };
        let err = env.into_data("update failed").unwrap_err();
        assert_eq!(err.user_message(), "no such mail");
    }
}
