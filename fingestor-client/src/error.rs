//! Client error types

use reqwest::StatusCode;
use thiserror::Error;

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// No response: connection failure, DNS, timeout
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Backend answered 401
    #[error("Authentication required: {0}")]
    Unauthorized(String),

    /// Backend answered with any other non-success status
    #[error("API error ({status}): {}", .detail.as_deref().unwrap_or("no detail"))]
    Api {
        status: StatusCode,
        detail: Option<String>,
    },

    /// Invalid response format
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Stored token cannot be used as a header value
    #[error("Stored access token is not a valid header value")]
    InvalidToken,

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Session storage failed
    #[error("Storage error: {0}")]
    Storage(#[from] std::io::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;

/// Coarse classification callers use to pick what to show the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// No response at all; timeouts land here too
    Network,
    /// 401; the HTTP core has already ended the session
    Unauthorized,
    /// 4xx with a backend-supplied detail (validation, business rule)
    Rejected,
    /// Everything else
    Unexpected,
}

impl ClientError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Network(e) if e.is_decode() || e.is_builder() => ErrorKind::Unexpected,
            Self::Network(_) => ErrorKind::Network,
            Self::Unauthorized(_) => ErrorKind::Unauthorized,
            Self::Api { status, .. } if status.is_client_error() => ErrorKind::Rejected,
            _ => ErrorKind::Unexpected,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized(_))
    }

    /// HTTP status, when the backend answered.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Unauthorized(_) => Some(StatusCode::UNAUTHORIZED),
            Self::Api { status, .. } => Some(*status),
            Self::Network(e) => e.status(),
            _ => None,
        }
    }

    /// Human-readable detail supplied by the backend, if any.
    pub fn detail(&self) -> Option<&str> {
        match self {
            Self::Api { detail, .. } => detail.as_deref().filter(|d| !d.is_empty()),
            Self::Unauthorized(detail) if !detail.is_empty() => Some(detail.as_str()),
            _ => None,
        }
    }

    /// Build the error for a non-success response body.
    pub(crate) fn from_status(status: StatusCode, body: &str) -> Self {
        let detail = extract_detail(body);
        if status == StatusCode::UNAUTHORIZED {
            Self::Unauthorized(detail.unwrap_or_else(|| "Unauthorized".to_string()))
        } else {
            Self::Api { status, detail }
        }
    }
}

/// Pull `detail` out of a FastAPI error body.
///
/// `detail` is either a plain string or a list of validation entries
/// (`{"loc": [...], "msg": "..."}`), which are joined as `field: msg`.
pub fn extract_detail(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    match value.get("detail")? {
        serde_json::Value::String(s) => Some(s.clone()),
        serde_json::Value::Array(items) => {
            let parts: Vec<String> = items
                .iter()
                .filter_map(|item| {
                    let msg = item.get("msg")?.as_str()?;
                    let field = item
                        .get("loc")
                        .and_then(|loc| loc.as_array())
                        .and_then(|loc| loc.last())
                        .and_then(|f| f.as_str());
                    Some(match field {
                        Some(field) => format!("{field}: {msg}"),
                        None => msg.to_string(),
                    })
                })
                .collect();
            if parts.is_empty() {
                None
            } else {
                Some(parts.join("; "))
            }
        }
        _ => None,
    }
}
