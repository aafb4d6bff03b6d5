//! Send Query use case.
//!
//! Submits a query and streams the reply into a [`ChatView`] as segments
//! complete, so the reply grows while the server is still generating it.
//!
//! Flow:
//! 1. Reject empty input without touching the gateway or the view
//! 2. Show the user message and an empty assistant placeholder
//! 3. Feed each response chunk to a [`StreamReader`]; append every segment
//!    to the placeholder and scroll
//! 4. On any transport failure, replace the placeholder with
//!    [`ERROR_INDICATOR`]

use crate::ports::chat_gateway::{ChatGateway, GatewayError};
use crate::ports::chat_view::ChatView;
use crate::ports::conversation_logger::{
    ConversationEvent, ConversationLogger, NoConversationLogger,
};
use futures::StreamExt;
use serde_json::json;
use std::sync::Arc;
use streamchat_domain::util::truncate_str;
use streamchat_domain::{ERROR_INDICATOR, Query, Role, StreamReader, StreamSummary};
use tracing::{debug, info, warn};

/// Result of one submission.
///
/// Stream failures are reported here rather than as an `Err`: by the time
/// this returns, the failure is already visible in the view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SendOutcome {
    /// Input was empty; nothing was sent or shown.
    Skipped,
    /// The stream ended normally.
    Completed { reply: String, segments: usize },
    /// The transport failed; the placeholder now shows the error indicator.
    Failed { error: GatewayError },
}

/// Use case for submitting a query and rendering the streamed reply.
pub struct SendQueryUseCase {
    gateway: Arc<dyn ChatGateway>,
    conversation_logger: Arc<dyn ConversationLogger>,
}

impl SendQueryUseCase {
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

    pub async fn execute(&self, input: &str, view: &mut dyn ChatView) -> SendOutcome {
        let Some(query) = Query::try_new(input) else {
            debug!("Ignoring empty query");
            return SendOutcome::Skipped;
        };

        info!("Submitting query: {}", truncate_str(query.text(), 100));
        self.conversation_logger.log(ConversationEvent::new(
            "query_submitted",
            json!({ "query": query.text() }),
        ));

        view.push_message(Role::User, query.text());
        view.scroll_to_bottom();
        view.push_message(Role::Assistant, "");

        let outcome = match self.stream_reply(&query, view).await {
            Ok((reply, summary)) => {
                if !summary.discarded.is_empty() {
                    debug!(
                        "Discarded {} bytes of undelimited trailing text",
                        summary.discarded.len()
                    );
                }
                info!(
                    "Reply complete ({} segments, {} bytes)",
                    summary.segments,
                    reply.len()
                );
                self.conversation_logger.log(ConversationEvent::new(
                    "reply_completed",
                    json!({
                        "query": query.text(),
                        "reply": reply,
                        "segments": summary.segments,
                        "discarded_bytes": summary.discarded.len(),
                    }),
                ));
                SendOutcome::Completed {
                    reply,
                    segments: summary.segments,
                }
            }
            Err(error) => {
                view.replace_last(ERROR_INDICATOR);
                warn!("Streaming failed: {}", error);
                self.conversation_logger.log(ConversationEvent::new(
                    "stream_failed",
                    json!({ "query": query.text(), "error": error.to_string() }),
                ));
                SendOutcome::Failed { error }
            }
        };

        view.reply_finished();
        outcome
    }

    /// Read the response body to completion, appending segments as they
    /// complete. Every segment of a chunk is rendered before the next chunk
    /// is awaited.
    async fn stream_reply(
        &self,
        query: &Query,
        view: &mut dyn ChatView,
    ) -> Result<(String, StreamSummary), GatewayError> {
        let mut chunks = self.gateway.stream(query).await?;
        let mut reader = StreamReader::new();
        let mut reply = String::new();

        while let Some(chunk) = chunks.next().await {
            let chunk = chunk?;
            for segment in reader.feed(&chunk) {
                view.append_to_last(segment.text());
                view.scroll_to_bottom();
                reply.push_str(segment.text());
            }
        }

        Ok((reply, reader.finish()))
    }
}
