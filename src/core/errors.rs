//! Error types shared by the API client and the interaction controllers

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Code used when the backend does not name its own error
pub const DEFAULT_ERROR_CODE: &str = "API Error";

/// Message used when neither the backend nor the transport explain a failure
pub const DEFAULT_ERROR_MESSAGE: &str = "An error occurred";

/// Where a normalized failure came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApiErrorKind {
    /// No response was received (connection refused, DNS, reset...)
    Transport,
    /// The request exceeded the configured timeout
    Timeout,
    /// The backend answered with a non-success status
    Backend,
    /// The backend answered 2xx but the body could not be decoded
    Decode,
}

impl fmt::Display for ApiErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiErrorKind::Transport => write!(f, "transport"),
            ApiErrorKind::Timeout => write!(f, "timeout"),
            ApiErrorKind::Backend => write!(f, "backend"),
            ApiErrorKind::Decode => write!(f, "decode"),
        }
    }
}

/// Error body the backend sends with non-success responses.
///
/// Every field is optional; missing ones fall back to the transport message
/// or the defaults above.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ErrorBody {
    /// Short error code
    pub error: Option<String>,
    /// Human-readable message
    pub message: Option<String>,
    /// Structured payload, passed through as-is
    pub details: Option<serde_json::Value>,
}

impl ErrorBody {
    /// Read each field on its own so one mistyped field does not hide the
    /// others. Bodies that are not JSON objects yield an empty result.
    pub fn parse(body: &[u8]) -> Self {
        let value: serde_json::Value = match serde_json::from_slice(body) {
            Ok(value) => value,
            Err(_) => return Self::default(),
        };

        let text = |key: &str| value.get(key).and_then(serde_json::Value::as_str).map(String::from);

        Self {
            error: text("error"),
            message: text("message"),
            details: value.get("details").filter(|d| !d.is_null()).cloned(),
        }
    }
}

/// The single error shape every API operation surfaces
#[derive(Error, Debug, Clone, PartialEq, Serialize)]
#[error("{error}: {message}")]
pub struct ApiError {
    /// Short code, e.g. `"Validation Error"` or `"API Error"`
    pub error: String,
    /// Human-readable message, safe to show to the user
    pub message: String,
    /// Optional structured payload from the backend
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
    /// Failure origin, used for logging only
    #[serde(skip)]
    pub kind: ApiErrorKind,
    /// HTTP status, when a response was received
    #[serde(skip)]
    pub status: Option<u16>,
}

impl ApiError {
    /// Failure where no response came back
    pub fn transport(message: impl Into<String>) -> Self {
        Self::without_body(ApiErrorKind::Transport, message.into())
    }

    /// Request ran past the client timeout
    pub fn timeout(timeout_ms: u64) -> Self {
        Self::without_body(
            ApiErrorKind::Timeout,
            format!("timeout of {}ms exceeded", timeout_ms),
        )
    }

    /// Success status, undecodable body
    pub fn decode(message: impl Into<String>) -> Self {
        Self::without_body(ApiErrorKind::Decode, message.into())
    }

    /// Build from a non-success response.
    ///
    /// `body` is the raw response body; usable fields are read through
    /// [`ErrorBody::parse`] and the rest ignored.
    pub fn from_response(status: u16, body: &[u8]) -> Self {
        let parsed = ErrorBody::parse(body);
        let transport_message = format!("Request failed with status code {}", status);

        Self {
            error: non_empty(parsed.error).unwrap_or_else(|| DEFAULT_ERROR_CODE.to_string()),
            message: non_empty(parsed.message)
                .or_else(|| non_empty(Some(transport_message)))
                .unwrap_or_else(|| DEFAULT_ERROR_MESSAGE.to_string()),
            details: parsed.details,
            kind: ApiErrorKind::Backend,
            status: Some(status),
        }
    }

    fn without_body(kind: ApiErrorKind, message: String) -> Self {
        Self {
            error: DEFAULT_ERROR_CODE.to_string(),
            message: non_empty(Some(message)).unwrap_or_else(|| DEFAULT_ERROR_MESSAGE.to_string()),
            details: None,
            kind,
            status: None,
        }
    }

    /// Message to display, or `fallback` when the message is blank
    pub fn message_or(&self, fallback: &str) -> String {
        if self.message.trim().is_empty() {
            fallback.to_string()
        } else {
            self.message.clone()
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

/// Errors raised by the translation form
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FormError {
    /// Input failed local constraints; never reaches the network
    #[error("{0}")]
    Validation(String),

    /// Transport or backend failure from the API client
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Action refused while a translation is in flight
    #[error("A translation is in progress")]
    Busy,
}

/// Copying to the system clipboard failed
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Clipboard error: {message}")]
pub struct ClipboardError {
    /// What went wrong
    pub message: String,
}

impl ClipboardError {
    /// Error with the given message
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Result type for API operations
pub type Result<T> = std::result::Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_message_wins() {
        let err = ApiError::from_response(500, br#"{"message":"model busy"}"#);
        assert_eq!(err.message, "model busy");
        assert_eq!(err.error, DEFAULT_ERROR_CODE);
        assert_eq!(err.status, Some(500));
        assert_eq!(err.kind, ApiErrorKind::Backend);
    }

    #[test]
    fn test_backend_code_and_details() {
        let body = br#"{"error":"Validation Error","message":"bad input","details":[{"loc":["text"]}]}"#;
        let err = ApiError::from_response(422, body);
        assert_eq!(err.error, "Validation Error");
        assert_eq!(err.message, "bad input");
        assert!(err.details.is_some());
    }

    #[test]
    fn test_mistyped_code_keeps_message() {
        let err = ApiError::from_response(503, br#"{"error":503,"message":"model busy"}"#);
        assert_eq!(err.message, "model busy");
        assert_eq!(err.error, DEFAULT_ERROR_CODE);
    }

    #[test]
    fn test_error_body_parse_field_by_field() {
        let body = ErrorBody::parse(br#"{"error":"HTTP Error","message":["x"],"details":{"retry":true}}"#);
        assert_eq!(body.error.as_deref(), Some("HTTP Error"));
        assert_eq!(body.message, None);
        assert_eq!(body.details, Some(serde_json::json!({"retry": true})));

        assert_eq!(ErrorBody::parse(b"[1, 2]"), ErrorBody::default());
        assert_eq!(ErrorBody::parse(b""), ErrorBody::default());
    }

    #[test]
    fn test_unparseable_body_uses_status_message() {
        let err = ApiError::from_response(502, b"<html>Bad Gateway</html>");
        assert_eq!(err.message, "Request failed with status code 502");
        assert_eq!(err.error, DEFAULT_ERROR_CODE);
        assert!(err.details.is_none());
    }

    #[test]
    fn test_blank_backend_message_is_ignored() {
        let err = ApiError::from_response(503, br#"{"error":"","message":"  "}"#);
        assert_eq!(err.error, DEFAULT_ERROR_CODE);
        assert_eq!(err.message, "Request failed with status code 503");
    }

    #[test]
    fn test_transport_fallbacks() {
        assert_eq!(ApiError::transport("").message, DEFAULT_ERROR_MESSAGE);
        assert_eq!(ApiError::timeout(30000).message, "timeout of 30000ms exceeded");
        assert_eq!(ApiError::timeout(30000).kind, ApiErrorKind::Timeout);
    }

    #[test]
    fn test_message_or() {
        let mut err = ApiError::transport("connection refused");
        assert_eq!(err.message_or("fallback"), "connection refused");
        err.message = String::new();
        assert_eq!(err.message_or("fallback"), "fallback");
    }

    #[test]
    fn test_form_error_display() {
        let err = FormError::Validation("Please enter valid text (1-1000 characters)".into());
        assert_eq!(err.to_string(), "Please enter valid text (1-1000 characters)");

        let err: FormError = ApiError::from_response(500, br#"{"message":"model busy"}"#).into();
        assert_eq!(err.to_string(), "API Error: model busy");
    }
}
