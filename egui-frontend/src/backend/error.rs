//! Errors returned by backend calls.

use thiserror::Error;

/// Failure of a single backend call
#[derive(Debug, Error)]
pub enum ApiError {
    /// The backend ran the command and rejected it
    #[error("{0}")]
    Backend(String),

    #[error("Backend transport failed: {0}")]
    Transport(#[from] std::io::Error),

    #[error("Malformed backend message: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Backend did not answer '{0}' in time")]
    Timeout(String),

    #[error("Backend process is not connected")]
    Disconnected,
}

impl ApiError {
    /// Message suitable for showing inline in a form.
    /// Backend rejections carry their own wording; anything else is a generic failure.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ApiError::Backend(message) if !message.trim().is_empty() => message.clone(),
            _ => fallback.to_string(),
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
