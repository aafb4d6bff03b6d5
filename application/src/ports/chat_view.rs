//! Chat view port
//!
//! The display target of the chat: an ordered list of messages where only
//! the last one (the reply being streamed) is ever mutated.

use streamchat_domain::{Role, Transcript};
use tracing::warn;

/// Display target for chat messages
///
/// Implementations live in the presentation layer (console rendering) or
/// are in-memory, like [`TranscriptView`].
pub trait ChatView: Send {
    /// Add a new message at the end of the view.
    fn push_message(&mut self, role: Role, text: &str);

    /// Append text to the last message without touching earlier content.
    fn append_to_last(&mut self, text: &str);

    /// Overwrite the content of the last message.
    fn replace_last(&mut self, text: &str);

    /// Bring the newest content into view.
    fn scroll_to_bottom(&mut self);

    /// Remove every message.
    fn clear(&mut self);

    /// Called once a streamed reply has stopped changing.
    fn reply_finished(&mut self) {}
}

/// In-memory [`ChatView`] backed by a [`Transcript`].
///
/// Counts scrolls so callers can check that every append was followed by
/// one.
#[derive(Debug, Default)]
pub struct TranscriptView {
    transcript: Transcript,
    scrolls: usize,
}

impl TranscriptView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn scrolls(&self) -> usize {
        self.scrolls
    }
}

impl ChatView for TranscriptView {
    fn push_message(&mut self, role: Role, text: &str) {
        self.transcript.push(role, text);
    }

    fn append_to_last(&mut self, text: &str) {
        if let Err(e) = self.transcript.append_to_last(text) {
            warn!("Dropped append: {}", e);
        }
    }

    fn replace_last(&mut self, text: &str) {
        if let Err(e) = self.transcript.replace_last(text) {
            warn!("Dropped replace: {}", e);
        }
    }

    fn scroll_to_bottom(&mut self) {
        self.scrolls += 1;
    }

    fn clear(&mut self) {
        self.transcript.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transcript_view_tracks_messages_and_scrolls() {
        let mut view = TranscriptView::new();
        view.push_message(Role::User, "hi");
        view.push_message(Role::Assistant, "");
        view.append_to_last("hel");
        view.scroll_to_bottom();
        view.append_to_last("lo");
        view.scroll_to_bottom();

        assert_eq!(view.transcript().len(), 2);
        assert_eq!(view.transcript().last().unwrap().text, "hello");
        assert_eq!(view.scrolls(), 2);
    }

    #[test]
    fn append_on_empty_view_is_ignored() {
        let mut view = TranscriptView::new();
        view.append_to_last("lost");
        assert!(view.transcript().is_empty());
    }
}
