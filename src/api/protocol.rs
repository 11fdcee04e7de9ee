//! Inventory API Protocol
//!
//! The response envelope shared by every `/api/items` endpoint. Clients key
//! off `isOk`; `data` carries the listing or the created record, `error` a
//! human-readable reason on failure.

use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Serialize)]
pub struct ApiResponse {
    #[serde(rename = "isOk")]
    pub is_ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ApiResponse {
    pub fn ok(data: Value) -> Self {
        Self {
            is_ok: true,
            data: Some(data),
            error: None,
        }
    }

    /// Success with no payload at all (delete acknowledgments).
    pub fn ok_empty() -> Self {
        Self {
            is_ok: true,
            data: None,
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            is_ok: false,
            data: None,
            error: Some(message.into()),
        }
    }
}
