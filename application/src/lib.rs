//! Application layer for streamchat
//!
//! This crate contains use cases and port definitions.
//! It depends only on the domain layer.

pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use ports::{
    chat_gateway::{ByteStream, ChatGateway, ClearChatsStatus, GatewayError},
    chat_view::{ChatView, TranscriptView},
    conversation_logger::{ConversationEvent, ConversationLogger, NoConversationLogger},
};
pub use use_cases::manage_sessions::{ManageSessionsUseCase, SessionActionError};
pub use use_cases::send_query::{SendOutcome, SendQueryUseCase};
