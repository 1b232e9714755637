//! Analysis service error types

use thiserror::Error;

/// Errors returned by [`super::ApiClient`]
#[derive(Error, Debug)]
pub enum ApiError {
    /// Connection, DNS, TLS or timeout failure
    #[error("Could not reach analysis service: {0}")]
    Transport(String),

    /// Non-2xx response; `message` is the server's explanation when it sent one
    #[error("{message}")]
    Status { status: u16, message: String },

    #[error("Invalid response from analysis service: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ApiError {
    /// Build a status error from a response body, preferring the server's
    /// `message` or `error` field over the generic status line
    pub fn from_status(status: u16, body: &str) -> Self {
        let message = serde_json::from_str::<serde_json::Value>(body)
            .ok()
            .and_then(|json| {
                ["message", "error"]
                    .iter()
                    .find_map(|field| json.get(*field)?.as_str().map(String::from))
            })
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| format!("HTTP error! status: {}", status));
        ApiError::Status { status, message }
    }
}

pub type Result<T> = std::result::Result<T, ApiError>;
