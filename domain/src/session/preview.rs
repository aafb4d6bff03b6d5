//! One-line summaries of stored sessions

use super::entities::{ChatMessage, Role};
use crate::util::take_chars;

const PAIR_SNIPPET_CHARS: usize = 15;
const USER_ONLY_SNIPPET_CHARS: usize = 30;

/// Short label for a stored session, built from its first user message and
/// first assistant reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionPreview(String);

impl SessionPreview {
    pub fn from_messages(messages: &[ChatMessage]) -> Self {
        if messages.is_empty() {
            return Self("Empty chat".to_string());
        }

        let first = |role: Role| {
            messages
                .iter()
                .find(|m| m.role == role)
                .map(|m| m.text.as_str())
                .unwrap_or("")
        };
        let user = first(Role::User);
        let reply = first(Role::Assistant);

        if reply.is_empty() {
            Self(format!("👤 {}", take_chars(user, USER_ONLY_SNIPPET_CHARS)))
        } else {
            Self(format!(
                "👤 {} | 🤖 {}",
                take_chars(user, PAIR_SNIPPET_CHARS),
                take_chars(reply, PAIR_SNIPPET_CHARS)
            ))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SessionPreview {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
