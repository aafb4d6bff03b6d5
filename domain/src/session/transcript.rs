//! In-memory transcript of the chat area

use super::entities::{ChatMessage, Role};
use crate::core::error::DomainError;

/// Ordered messages currently on display.
///
/// Mirrors the chat area: messages are appended at the end, and only the
/// last message (the reply being streamed) is ever mutated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Transcript {
    messages: Vec<ChatMessage>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn last(&self) -> Option<&ChatMessage> {
        self.messages.last()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn push(&mut self, role: Role, text: impl Into<String>) {
        self.messages.push(ChatMessage {
            role,
            text: text.into(),
        });
    }

    /// Append text to the last message.
    pub fn append_to_last(&mut self, text: &str) -> Result<(), DomainError> {
        let last = self
            .messages
            .last_mut()
            .ok_or(DomainError::EmptyTranscript)?;
        last.text.push_str(text);
        Ok(())
    }

    /// Overwrite the text of the last message.
    pub fn replace_last(&mut self, text: &str) -> Result<(), DomainError> {
        let last = self
            .messages
            .last_mut()
            .ok_or(DomainError::EmptyTranscript)?;
        last.text.clear();
        last.text.push_str(text);
        Ok(())
    }

    pub fn clear(&mut self) {
        self.messages.clear();
    }
}
