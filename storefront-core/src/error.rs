//! Error types shared by every backend call.
use thiserror::Error;

/// Everything that can go wrong between issuing a request and having a
/// usable response.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SyncError {
    /// Server answered with a non-2xx status
    #[error("HTTP status {0}")]
    Status(u16),

    /// Body was not the shape we expected
    #[error("malformed payload: {0}")]
    Malformed(String),

    /// Request never completed (DNS, connection, CORS, ...)
    #[error("transport failure: {0}")]
    Transport(String),

    /// Server processed the request and answered `success: false`
    #[error("rejected by server: {}", .0.as_deref().unwrap_or("no reason given"))]
    Rejected(Option<String>),
}

impl SyncError {
    /// Server supplied rejection text, if any.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            SyncError::Rejected(Some(msg)) => Some(msg.as_str()),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for SyncError {
    fn from(e: serde_json::Error) -> Self {
        SyncError::Malformed(e.to_string())
    }
}

#[cfg(feature = "api")]
impl From<reqwest::Error> for SyncError {
    fn from(e: reqwest::Error) -> Self {
        match e.status() {
            Some(status) => SyncError::Status(status.as_u16()),
            None if e.is_decode() => SyncError::Malformed(e.to_string()),
            None => SyncError::Transport(e.to_string()),
        }
    }
}
