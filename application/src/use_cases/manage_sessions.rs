//! Session side actions: start a new chat, load a stored one, clear all.
//!
//! These are plain request/response calls. Failures are returned to the
//! caller, which only logs them; the view is left untouched on error.

use crate::ports::chat_gateway::{ChatGateway, ClearChatsStatus, GatewayError};
use crate::ports::chat_view::ChatView;
use crate::ports::conversation_logger::{
    ConversationEvent, ConversationLogger, NoConversationLogger,
};
use serde_json::json;
use std::sync::Arc;
use streamchat_domain::{ChatMessage, SessionPreview};
use thiserror::Error;
use tracing::info;

/// Errors from session side actions
#[derive(Error, Debug)]
pub enum SessionActionError {
    #[error("Gateway error: {0}")]
    GatewayError(#[from] GatewayError),

    #[error("Server refused to clear chats (status: {0})")]
    ClearRefused(String),
}

/// Use case for the session side actions.
pub struct ManageSessionsUseCase {
    gateway: Arc<dyn ChatGateway>,
    conversation_logger: Arc<dyn ConversationLogger>,
}

impl ManageSessionsUseCase {
    pub fn new(gateway: Arc<dyn ChatGateway>) -> Self {
        Self {
            gateway,
            conversation_logger: Arc::new(NoConversationLogger),
        }
    }

    /// Create with a conversation logger.
    pub fn with_conversation_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.conversation_logger = logger;
        self
    }

    /// Start a fresh session and show an empty view.
    pub async fn new_chat(&self, view: &mut dyn ChatView) -> Result<(), SessionActionError> {
        self.gateway.new_chat().await?;
        view.clear();
        info!("Started a new chat session");
        self.conversation_logger
            .log(ConversationEvent::new("chat_started", json!({})));
        Ok(())
    }

    /// Replace the view with a stored session, replaying its messages in
    /// order.
    pub async fn load_chat(
        &self,
        index: usize,
        view: &mut dyn ChatView,
    ) -> Result<Vec<ChatMessage>, SessionActionError> {
        let history = self.gateway.load_chat(index).await?;

        view.clear();
        for message in &history {
            view.push_message(message.role, &message.text);
            view.scroll_to_bottom();
        }

        info!(
            "Loaded chat session {} ({} messages)",
            index,
            history.len()
        );
        self.conversation_logger.log(ConversationEvent::new(
            "chat_loaded",
            json!({ "index": index, "messages": history.len() }),
        ));
        Ok(history)
    }

    /// Delete every stored session. The view is cleared only when the
    /// server reports success.
    pub async fn clear_chats(
        &self,
        view: &mut dyn ChatView,
    ) -> Result<ClearChatsStatus, SessionActionError> {
        let status = self.gateway.clear_chats().await?;
        if !status.is_success() {
            return Err(SessionActionError::ClearRefused(status.status));
        }

        view.clear();
        info!("Cleared all chat sessions");
        self.conversation_logger
            .log(ConversationEvent::new("chats_cleared", json!({})));
        Ok(status)
    }

    /// One-line summary of a session's messages.
    pub fn preview(messages: &[ChatMessage]) -> SessionPreview {
        SessionPreview::from_messages(messages)
    }
}
