//! Scripted ports for use case tests.

use crate::ports::chat_gateway::{ByteStream, ChatGateway, ClearChatsStatus, GatewayError};
use crate::ports::chat_view::ChatView;
use crate::ports::conversation_logger::{ConversationEvent, ConversationLogger};
use async_trait::async_trait;
use bytes::Bytes;
use futures::StreamExt;
use std::sync::Mutex;
use streamchat_domain::{ChatMessage, Query, Role};

type ScriptedStream = Result<Vec<Result<Bytes, GatewayError>>, GatewayError>;

/// Gateway that replays canned responses and records every call.
pub(crate) struct ScriptedGateway {
    stream: Mutex<ScriptedStream>,
    history: Result<Vec<ChatMessage>, GatewayError>,
    clear_status: String,
    side_action_error: Option<GatewayError>,
    calls: Mutex<Vec<String>>,
}

impl ScriptedGateway {
    pub fn new() -> Self {
        Self {
            stream: Mutex::new(Ok(Vec::new())),
            history: Ok(Vec::new()),
            clear_status: "success".to_string(),
            side_action_error: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn with_chunks(self, chunks: &[&[u8]]) -> Self {
        self.with_stream_items(
            chunks
                .iter()
                .map(|c| Ok(Bytes::copy_from_slice(c)))
                .collect(),
        )
    }

    pub fn with_stream_items(mut self, items: Vec<Result<Bytes, GatewayError>>) -> Self {
        self.stream = Mutex::new(Ok(items));
        self
    }

    pub fn with_stream_error(mut self, error: GatewayError) -> Self {
        self.stream = Mutex::new(Err(error));
        self
    }

    pub fn with_history(mut self, history: Vec<ChatMessage>) -> Self {
        self.history = Ok(history);
        self
    }

    pub fn with_history_error(mut self, error: GatewayError) -> Self {
        self.history = Err(error);
        self
    }

    pub fn with_clear_status(mut self, status: &str) -> Self {
        self.clear_status = status.to_string();
        self
    }

    pub fn with_side_action_error(mut self, error: GatewayError) -> Self {
        self.side_action_error = Some(error);
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }

    fn side_action(&self) -> Result<(), GatewayError> {
        match &self.side_action_error {
            Some(e) => Err(e.clone()),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl ChatGateway for ScriptedGateway {
    async fn stream(&self, query: &Query) -> Result<ByteStream, GatewayError> {
        self.record(format!("stream:{}", query));
        let items = std::mem::replace(&mut *self.stream.lock().unwrap(), Ok(Vec::new()))?;
        Ok(futures::stream::iter(items).boxed())
    }

    async fn new_chat(&self) -> Result<(), GatewayError> {
        self.record("new_chat".to_string());
        self.side_action()
    }

    async fn load_chat(&self, index: usize) -> Result<Vec<ChatMessage>, GatewayError> {
        self.record(format!("load_chat:{}", index));
        self.history.clone()
    }

    async fn clear_chats(&self) -> Result<ClearChatsStatus, GatewayError> {
        self.record("clear_chats".to_string());
        self.side_action()?;
        Ok(ClearChatsStatus {
            status: self.clear_status.clone(),
        })
    }
}

/// View that records every call in order.
#[derive(Default)]
pub(crate) struct RecordingView {
    pub ops: Vec<String>,
}

impl ChatView for RecordingView {
    fn push_message(&mut self, role: Role, text: &str) {
        self.ops.push(format!("push:{}:{}", role, text));
    }

    fn append_to_last(&mut self, text: &str) {
        self.ops.push(format!("append:{}", text));
    }

    fn replace_last(&mut self, text: &str) {
        self.ops.push(format!("replace:{}", text));
    }

    fn scroll_to_bottom(&mut self) {
        self.ops.push("scroll".to_string());
    }

    fn clear(&mut self) {
        self.ops.push("clear".to_string());
    }

    fn reply_finished(&mut self) {
        self.ops.push("finished".to_string());
    }
}

/// Logger that keeps the event types it receives.
#[derive(Default)]
pub(crate) struct RecordingLogger {
    events: Mutex<Vec<&'static str>>,
}

impl RecordingLogger {
    pub fn event_types(&self) -> Vec<&'static str> {
        self.events.lock().unwrap().clone()
    }
}

impl ConversationLogger for RecordingLogger {
    fn log(&self, event: ConversationEvent) {
        self.events.lock().unwrap().push(event.event_type);
    }
}
