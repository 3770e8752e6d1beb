//! Transport-level errors and the backend error body shapes.
//!
//! DESIGN
//! ======
//! The backend answers failures with several body shapes (FastAPI
//! validation lists, `{"detail": ...}` objects, bare strings, or nothing).
//! [`ErrorPayload`] closes that set once at the transport boundary so the
//! normalizer can match exhaustively instead of probing JSON at every call
//! site.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

use serde_json::{Map, Value};

/// Body of a failed response, classified by shape.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum ErrorPayload {
    /// Empty body, `null`, or a bare number/boolean.
    #[default]
    Absent,
    /// A JSON string, or a body that was not JSON at all.
    Text(String),
    /// A top-level JSON array.
    List(Vec<Value>),
    /// A JSON object.
    Object(Map<String, Value>),
}

impl ErrorPayload {
    /// Classify a raw response body.
    #[must_use]
    pub fn from_body(raw: &str) -> Self {
        if raw.trim().is_empty() {
            return Self::Absent;
        }
        match serde_json::from_str::<Value>(raw) {
            Ok(value) => Self::from_value(value),
            Err(_) => Self::Text(raw.to_owned()),
        }
    }

    /// Classify an already-parsed JSON value.
    #[must_use]
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::String(text) => Self::Text(text),
            Value::Array(items) => Self::List(items),
            Value::Object(map) => Self::Object(map),
            Value::Null | Value::Bool(_) | Value::Number(_) => Self::Absent,
        }
    }
}

/// Errors produced by the HTTP adapter and the resource facades.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// No response was received (connect failure, DNS, reset, etc.).
    #[error("network error: {0}")]
    Transport(String),

    /// The backend answered 401. The stored credential has already been
    /// removed by the time the caller sees this.
    #[error("unauthorized")]
    Unauthorized { payload: ErrorPayload },

    /// The backend answered 404.
    #[error("not found")]
    NotFound { payload: ErrorPayload },

    /// Any other non-success status.
    #[error("request failed with status code {status}")]
    Status { status: u16, payload: ErrorPayload },

    /// A success response whose body did not match the expected type.
    #[error("response decode failed: {0}")]
    Decode(String),

    /// The request could not be built.
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

impl ApiError {
    /// Build the error for a non-success status and its raw body.
    #[must_use]
    pub fn from_status(status: u16, raw_body: &str) -> Self {
        let payload = ErrorPayload::from_body(raw_body);
        match status {
            401 => Self::Unauthorized { payload },
            404 => Self::NotFound { payload },
            _ => Self::Status { status, payload },
        }
    }

    /// HTTP status, when a response was received.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Unauthorized { .. } => Some(401),
            Self::NotFound { .. } => Some(404),
            Self::Status { status, .. } => Some(*status),
            Self::Transport(_) | Self::Decode(_) | Self::InvalidRequest(_) => None,
        }
    }

    /// Error body, when a response was received.
    #[must_use]
    pub fn payload(&self) -> Option<&ErrorPayload> {
        match self {
            Self::Unauthorized { payload } | Self::NotFound { payload } | Self::Status { payload, .. } => {
                Some(payload)
            }
            Self::Transport(_) | Self::Decode(_) | Self::InvalidRequest(_) => None,
        }
    }

    /// Generic message for display when the body says nothing useful.
    ///
    /// Transport failures carry none: their detail is for logs, and users
    /// get the caller's fallback message instead.
    #[must_use]
    pub fn message(&self) -> Option<String> {
        match self {
            Self::Transport(_) => None,
            Self::Unauthorized { .. } | Self::NotFound { .. } | Self::Status { .. } => {
                self.status().map(|status| format!("Request failed with status code {status}"))
            }
            Self::Decode(_) | Self::InvalidRequest(_) => Some(self.to_string()),
        }
    }

    /// Reduce this error to one display string, see [`super::normalize`].
    #[must_use]
    pub fn normalized(&self, default_message: &str) -> String {
        super::normalize::normalize(self.payload(), self.message().as_deref(), default_message)
    }

    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized { .. })
    }

    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_decode() {
            Self::Decode(error.to_string())
        } else if error.is_builder() {
            Self::InvalidRequest(error.to_string())
        } else {
            Self::Transport(error.to_string())
        }
    }
}
