//! Chat Gateway port
//!
//! Defines the interface for talking to the chat server: the streaming
//! query endpoint and the session side actions.

use async_trait::async_trait;
use bytes::Bytes;
use futures::stream::BoxStream;
use streamchat_domain::{ChatMessage, Query};
use thiserror::Error;

/// Errors that can occur during chat gateway operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("{endpoint} returned HTTP {status}")]
    HttpStatus { endpoint: String, status: u16 },

    #[error("Stream error: {0}")]
    StreamError(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Chat session {0} not found")]
    SessionNotFound(usize),
}

/// Raw response body of a streaming query, chunked however the transport
/// delivers it. The stream ending is the only completion signal.
pub type ByteStream = BoxStream<'static, Result<Bytes, GatewayError>>;

/// Status reported by the server after clearing all sessions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClearChatsStatus {
    pub status: String,
}

impl ClearChatsStatus {
    pub fn is_success(&self) -> bool {
        self.status == "success"
    }
}

/// Gateway to the chat server
///
/// Implementations (adapters) live in the infrastructure layer.
#[async_trait]
pub trait ChatGateway: Send + Sync {
    /// Submit a query and return the response body as raw chunks.
    ///
    /// A non-success status is reported here, before any chunk is read.
    async fn stream(&self, query: &Query) -> Result<ByteStream, GatewayError>;

    /// Archive the current session and start a fresh one.
    async fn new_chat(&self) -> Result<(), GatewayError>;

    /// Fetch the messages of a stored session, oldest first.
    async fn load_chat(&self, index: usize) -> Result<Vec<ChatMessage>, GatewayError>;

    /// Delete every stored session and the current one.
    async fn clear_chats(&self) -> Result<ClearChatsStatus, GatewayError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clear_status_success() {
        let ok = ClearChatsStatus {
            status: "success".to_string(),
        };
        let other = ClearChatsStatus {
            status: "error".to_string(),
        };
        assert!(ok.is_success());
        assert!(!other.is_success());
    }

    #[test]
    fn http_status_display() {
        let err = GatewayError::HttpStatus {
            endpoint: "/stream".to_string(),
            status: 400,
        };
        assert_eq!(err.to_string(), "/stream returned HTTP 400");
    }
}
