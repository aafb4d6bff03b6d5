//! Error types for the HTTP adapter

use streamchat_application::GatewayError;
use thiserror::Error;

/// Errors that can occur while setting up the HTTP gateway
#[derive(Error, Debug)]
pub enum HttpError {
    #[error("Invalid base URL {url}: {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(#[from] reqwest::Error),
}

/// Map a `reqwest` failure on `endpoint` to the port's error type.
pub(crate) fn to_gateway_error(endpoint: &str, error: reqwest::Error) -> GatewayError {
    if let Some(status) = error.status() {
        GatewayError::HttpStatus {
            endpoint: endpoint.to_string(),
            status: status.as_u16(),
        }
    } else if error.is_decode() {
        GatewayError::InvalidResponse(format!("{}: {}", endpoint, error))
    } else if error.is_body() {
        GatewayError::StreamError(format!("{}: {}", endpoint, error))
    } else {
        GatewayError::ConnectionError(format!("{}: {}", endpoint, error))
    }
}
