//! Wire types for the chat server endpoints.

use serde::{Deserialize, Serialize};
use streamchat_domain::ChatMessage;

/// `POST stream`: chunked `data: ...\n\n` response
pub const STREAM: &str = "stream";
/// `POST new_chat`: archives the current session
pub const NEW_CHAT: &str = "new_chat";
/// `GET load_chat/{index}`
pub const LOAD_CHAT: &str = "load_chat";
/// `POST clear_chats`
pub const CLEAR_CHATS: &str = "clear_chats";

/// Body of a streaming query.
#[derive(Debug, Serialize)]
pub struct StreamRequest<'a> {
    pub query: &'a str,
}

/// Body returned by `load_chat`.
#[derive(Debug, Deserialize)]
pub struct LoadChatResponse {
    #[serde(default)]
    pub chat_history: Vec<ChatMessage>,
}

/// Body returned by `clear_chats`.
#[derive(Debug, Deserialize)]
pub struct ClearChatsResponse {
    pub status: String,
}
