//! Error types for the remote todo source

use thiserror::Error;

use crate::domain::errors::ErrorAlert;

/// Failures reported by the remote source client
#[derive(Debug, Clone, PartialEq, Error)]
pub enum NetworkError {
    /// Reachability monitor reports no connectivity; no request was issued
    #[error("No internet connection")]
    NoInternetConnection,

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Successful status with an empty body
    #[error("No data received")]
    NoData,

    #[error("Failed to decode response: {0}")]
    DecodingFailed(String),

    /// Connect, timeout or other transport failure
    #[error("Transport error: {0}")]
    TransportError(String),

    #[error("Invalid server response")]
    InvalidResponse,

    #[error("Bad request (400)")]
    BadRequest,

    #[error("Not found (404)")]
    NotFound,

    #[error("Server error ({0})")]
    ServerError(u16),

    #[error("HTTP error ({0})")]
    HttpError(u16),

    #[error("Unknown error: {0}")]
    UnknownError(String),
}

impl NetworkError {
    /// Map a non-success HTTP status into the taxonomy
    pub fn from_status(status: u16) -> Self {
        match status {
            400 => NetworkError::BadRequest,
            404 => NetworkError::NotFound,
            500..=599 => NetworkError::ServerError(status),
            other => NetworkError::HttpError(other),
        }
    }
}

impl From<reqwest::Error> for NetworkError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_builder() {
            NetworkError::InvalidUrl(error.to_string())
        } else if error.is_decode() {
            NetworkError::DecodingFailed(error.to_string())
        } else if error.is_connect() || error.is_timeout() || error.is_request() || error.is_body() {
            NetworkError::TransportError(error.to_string())
        } else {
            NetworkError::UnknownError(error.to_string())
        }
    }
}

impl ErrorAlert for NetworkError {
    fn alert_title(&self) -> String {
        "Network Error".to_string()
    }

    fn alert_message(&self) -> String {
        self.to_string()
    }
}
