//!
//! # Response Envelope
//!
//! Every todo endpoint and every error response shares one JSON shape:
//! `{success, message, data, meta?}`. Clients get a single parsing path for
//! failures because `success: false` bodies use the same envelope. The login
//! and refresh endpoints return the bare token object and are the only
//! exceptions.

use actix_web::HttpResponse;
use serde::Serialize;
use serde_json::Value;

/// The uniform `{success, message, data, meta?}` wrapper.
///
/// `meta` is omitted from the wire entirely when absent.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    pub message: Option<String>,
    pub data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<Value>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            data,
            meta: None,
        }
    }

    pub fn with_meta(mut self, meta: Value) -> Self {
        self.meta = Some(meta);
        self
    }

    /// 200 OK wrapped in the envelope.
    pub fn ok(data: T, message: impl Into<String>) -> HttpResponse {
        HttpResponse::Ok().json(Self::success(data, message))
    }

    /// 201 Created wrapped in the envelope.
    pub fn created(data: T, message: impl Into<String>) -> HttpResponse {
        HttpResponse::Created().json(Self::success(data, message))
    }
}

impl ApiResponse<Value> {
    /// An envelope with `success: false` and `data: null`.
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
            data: Value::Null,
            meta: None,
        }
    }

    /// Failure envelope carrying field-level detail in `data`.
    pub fn failure_with(message: impl Into<String>, data: Value) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
            data,
            meta: None,
        }
    }
}
