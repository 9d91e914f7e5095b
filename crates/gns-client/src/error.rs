use std::fmt;

use gns_common::NotificationResponse;
use serde_json::Value;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("failed to build HTTP transport: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("missing API token")]
    MissingToken,

    #[error("failed to marshal request: {0}")]
    Marshal(#[source] serde_json::Error),

    #[error("failed to create request: {0}")]
    Request(#[source] reqwest::Error),

    #[error("failed to send request: {0}")]
    Send(#[source] reqwest::Error),

    #[error("failed to read response body: {0}")]
    ReadBody(#[source] reqwest::Error),

    #[error("API error (status {status}): {body}")]
    Api { status: u16, body: ApiErrorBody },
}

impl ClientError {
    /// HTTP status of an API error response.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_timeout(&self) -> bool {
        match self {
            ClientError::Send(e) | ClientError::ReadBody(e) => e.is_timeout(),
            _ => false,
        }
    }
}

/// Body of a 4xx/5xx response: the decoded object when it parsed, otherwise
/// the raw text.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiErrorBody {
    Decoded(NotificationResponse),
    Raw(String),
}

impl ApiErrorBody {
    /// The server reports failures as `{"error": ..., "status": ...}`; this
    /// returns the `error` text, or the raw body when it was not JSON.
    pub fn message(&self) -> Option<&str> {
        match self {
            ApiErrorBody::Decoded(map) => map.get("error").and_then(Value::as_str),
            ApiErrorBody::Raw(text) => {
                let text = text.trim();
                (!text.is_empty()).then_some(text)
            }
        }
    }
}

impl fmt::Display for ApiErrorBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiErrorBody::Decoded(map) => match serde_json::to_string(map) {
                Ok(json) => f.write_str(&json),
                Err(_) => write!(f, "{map:?}"),
            },
            ApiErrorBody::Raw(text) => f.write_str(text),
        }
    }
}
