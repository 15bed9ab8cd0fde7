//! Response envelope
//!
//! Every action answers with HTTP 200 and one of two shapes:
//!
//! ```json
//! { "code": 0, "msg": "success", "data": { "id": "..." } }
//! { "code": 2000, "msg": "missing id parameter", "data": null }
//! ```
//!
//! Failures may carry an extra `error` string with the underlying cause.

use crate::status::Status;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The `{code, msg, data, error?}` body returned by every action
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    /// Status code, `0` on success
    pub code: i32,

    /// Human-readable message
    pub msg: String,

    /// Payload, `null` on failure
    #[serde(default)]
    pub data: Value,

    /// Underlying error text, only present on some failures
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Envelope {
    /// Whether this envelope reports success
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.code == Status::Success.code()
    }
}

impl IntoResponse for Envelope {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}

/// Envelope constructors
pub struct Responses;

impl Responses {
    /// Success envelope with the given payload
    #[must_use]
    pub fn success(data: Value) -> Envelope {
        Envelope {
            code: Status::Success.code(),
            msg: Status::Success.message().to_string(),
            data,
            error: None,
        }
    }

    /// Failure envelope for `status`
    ///
    /// `msg` falls back to the status' default message.
    #[must_use]
    pub fn failure(status: Status, msg: Option<String>, error: Option<String>) -> Envelope {
        Envelope {
            code: status.code(),
            msg: msg.unwrap_or_else(|| status.message().to_string()),
            data: Value::Null,
            error,
        }
    }

    /// Parameter error with a specific message
    #[must_use]
    pub fn params_error(msg: impl Into<String>) -> Envelope {
        Self::failure(Status::ParamsError, Some(msg.into()), None)
    }
}
