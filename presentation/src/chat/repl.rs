//! REPL (Read-Eval-Print Loop) for interactive chat

use crate::ConsoleView;
use reedline::{DefaultPrompt, DefaultPromptSegment, FileBackedHistory, Reedline, Signal};
use std::io::{self, Stdout, Write};
use std::path::PathBuf;
use streamchat_application::{ManageSessionsUseCase, SendOutcome, SendQueryUseCase};
use tracing::{debug, warn};

/// One line of REPL input, parsed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    Help,
    New,
    Load(usize),
    Clear,
    Quit,
    /// Anything that is not a slash command is sent to the server
    Query(String),
    /// `/load` without a usable index
    BadIndex(String),
    Unknown(String),
    Empty,
}

impl ReplCommand {
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        if line.is_empty() {
            return Self::Empty;
        }
        if !line.starts_with('/') {
            return Self::Query(line.to_string());
        }

        let mut parts = line.split_whitespace();
        let command = parts.next().unwrap_or_default();
        match command {
            "/quit" | "/exit" | "/q" => Self::Quit,
            "/help" | "/h" | "/?" => Self::Help,
            "/new" => Self::New,
            "/clear" => Self::Clear,
            "/load" => {
                let arg = parts.collect::<Vec<_>>().join(" ");
                match arg.parse::<usize>() {
                    Ok(index) => Self::Load(index),
                    Err(_) => Self::BadIndex(arg),
                }
            }
            other => Self::Unknown(other.to_string()),
        }
    }
}

/// Interactive chat REPL
pub struct ChatRepl<W: Write + Send = Stdout> {
    send_query: SendQueryUseCase,
    sessions: ManageSessionsUseCase,
    view: ConsoleView<W>,
    history_path: Option<PathBuf>,
    history_size: usize,
}

impl<W: Write + Send> ChatRepl<W> {
    /// Create a REPL rendering the conversation into `view`
    pub fn new(
        send_query: SendQueryUseCase,
        sessions: ManageSessionsUseCase,
        view: ConsoleView<W>,
    ) -> Self {
        Self {
            send_query,
            sessions,
            view,
            history_path: None,
            history_size: 1000,
        }
    }

    /// Persist input history to a file
    pub fn with_history(mut self, path: Option<PathBuf>, size: usize) -> Self {
        self.history_path = path;
        self.history_size = size;
        self
    }

    fn editor(&self) -> Reedline {
        let editor = Reedline::create();
        let Some(path) = &self.history_path else {
            return editor;
        };

        if let Some(parent) = path.parent() {
            let _ = std::fs::create_dir_all(parent);
        }
        match FileBackedHistory::with_file(self.history_size, path.clone()) {
            Ok(history) => editor.with_history(Box::new(history)),
            Err(e) => {
                warn!("History disabled, cannot use {}: {}", path.display(), e);
                editor
            }
        }
    }

    /// Run the interactive REPL until `/quit` or end of input
    pub async fn run(&mut self) -> io::Result<()> {
        let mut editor = self.editor();
        let prompt = DefaultPrompt::new(
            DefaultPromptSegment::Basic(">>> ".to_string()),
            DefaultPromptSegment::Empty,
        );

        print_welcome();

        loop {
            match editor.read_line(&prompt)? {
                Signal::Success(line) => {
                    if self.dispatch(ReplCommand::parse(&line)).await {
                        break;
                    }
                }
                Signal::CtrlC => {
                    println!("^C");
                }
                Signal::CtrlD => {
                    println!("Bye!");
                    break;
                }
                #[allow(unreachable_patterns)]
                _ => {}
            }
        }

        Ok(())
    }

    /// Act on one command. Returns true if the REPL should exit.
    async fn dispatch(&mut self, command: ReplCommand) -> bool {
        match command {
            ReplCommand::Empty => {}
            ReplCommand::Quit => {
                println!("Bye!");
                return true;
            }
            ReplCommand::Help => print_help(),
            ReplCommand::Query(text) => {
                let outcome = self.send_query.execute(&text, &mut self.view).await;
                debug!("Query outcome: {:?}", outcome);
                if let SendOutcome::Failed { error } = outcome {
                    eprintln!("  ({})", error);
                }
            }
            ReplCommand::New => {
                if let Err(e) = self.sessions.new_chat(&mut self.view).await {
                    warn!("New chat failed: {}", e);
                    eprintln!("Could not start a new chat: {}", e);
                }
            }
            ReplCommand::Load(index) => match self.sessions.load_chat(index, &mut self.view).await
            {
                Ok(history) => {
                    println!("[{}] {}", index, ManageSessionsUseCase::preview(&history));
                }
                Err(e) => {
                    warn!("Loading chat {} failed: {}", index, e);
                    eprintln!("Could not load chat {}: {}", index, e);
                }
            },
            ReplCommand::Clear => {
                if let Err(e) = self.sessions.clear_chats(&mut self.view).await {
                    warn!("Clearing chats failed: {}", e);
                    eprintln!("Could not clear chats: {}", e);
                }
            }
            ReplCommand::BadIndex(arg) => {
                println!("Usage: /load <index> (got '{}')", arg);
            }
            ReplCommand::Unknown(cmd) => {
                println!("Unknown command: {}", cmd);
                println!("Type /help for available commands");
            }
        }
        false
    }
}

fn print_welcome() {
    println!();
    println!("╭─────────────────────────────────────────────╮");
    println!("│               streamchat                    │");
    println!("╰─────────────────────────────────────────────╯");
    print_help();
}

fn print_help() {
    println!();
    println!("Commands:");
    println!("  /help, /h, /?     - Show this help");
    println!("  /new              - Archive this chat and start a new one");
    println!("  /load <index>     - Load a stored chat");
    println!("  /clear            - Delete all stored chats");
    println!("  /quit, /exit, /q  - Exit");
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use bytes::Bytes;
    use futures::StreamExt;
    use std::sync::Arc;
    use streamchat_application::{ByteStream, ChatGateway, ClearChatsStatus, GatewayError};
    use streamchat_domain::{ChatMessage, Query, Role};

    /// Server that answers every query with the same two segments and
    /// stores a single session.
    struct CannedGateway;

    #[async_trait]
    impl ChatGateway for CannedGateway {
        async fn stream(&self, _query: &Query) -> Result<ByteStream, GatewayError> {
            let chunks = vec![Ok(Bytes::from_static(b"data: Sel\n\ndata: am\n\n"))];
            Ok(futures::stream::iter(chunks).boxed())
        }

        async fn new_chat(&self) -> Result<(), GatewayError> {
            Ok(())
        }

        async fn load_chat(&self, index: usize) -> Result<Vec<ChatMessage>, GatewayError> {
            match index {
                0 => Ok(vec![ChatMessage::user("hi"), ChatMessage::assistant("hello")]),
                _ => Err(GatewayError::SessionNotFound(index)),
            }
        }

        async fn clear_chats(&self) -> Result<ClearChatsStatus, GatewayError> {
            Ok(ClearChatsStatus {
                status: "success".to_string(),
            })
        }
    }

    fn repl() -> ChatRepl<Vec<u8>> {
        let gateway: Arc<dyn ChatGateway> = Arc::new(CannedGateway);
        ChatRepl::new(
            SendQueryUseCase::new(gateway.clone()),
            ManageSessionsUseCase::new(gateway),
            ConsoleView::new(Vec::new()),
        )
    }

    #[tokio::test]
    async fn query_is_rendered_into_the_given_view() {
        let mut repl = repl();

        let quit = repl.dispatch(ReplCommand::parse("salam?")).await;

        assert!(!quit);
        assert_eq!(
            repl.view.transcript().messages(),
            &[ChatMessage::user("salam?"), ChatMessage::assistant("Selam")]
        );
        let printed = String::from_utf8(repl.view.into_inner()).unwrap();
        assert!(printed.contains("Selam\n"));
    }

    #[tokio::test]
    async fn session_commands_drive_the_view() {
        let mut repl = repl();

        repl.dispatch(ReplCommand::Load(0)).await;
        let roles: Vec<Role> = repl.view.transcript().messages().iter().map(|m| m.role).collect();
        assert_eq!(roles, vec![Role::User, Role::Assistant]);

        // A failed load leaves the current session on screen
        repl.dispatch(ReplCommand::Load(9)).await;
        assert_eq!(repl.view.transcript().len(), 2);

        repl.dispatch(ReplCommand::New).await;
        assert!(repl.view.transcript().is_empty());
    }

    #[tokio::test]
    async fn quit_ends_the_loop() {
        let mut repl = repl();
        assert!(repl.dispatch(ReplCommand::Quit).await);
        assert!(!repl.dispatch(ReplCommand::Help).await);
    }

    #[test]
    fn plain_text_is_a_query() {
        assert_eq!(
            ReplCommand::parse("  tell me about Lalibela "),
            ReplCommand::Query("tell me about Lalibela".to_string())
        );
    }

    #[test]
    fn blank_line_is_empty() {
        assert_eq!(ReplCommand::parse("   "), ReplCommand::Empty);
    }

    #[test]
    fn slash_commands() {
        assert_eq!(ReplCommand::parse("/help"), ReplCommand::Help);
        assert_eq!(ReplCommand::parse("/?"), ReplCommand::Help);
        assert_eq!(ReplCommand::parse("/new"), ReplCommand::New);
        assert_eq!(ReplCommand::parse("/clear"), ReplCommand::Clear);
        assert_eq!(ReplCommand::parse("/q"), ReplCommand::Quit);
        assert_eq!(ReplCommand::parse("/load 4"), ReplCommand::Load(4));
    }

    #[test]
    fn load_requires_a_numeric_index() {
        assert_eq!(ReplCommand::parse("/load"), ReplCommand::BadIndex(String::new()));
        assert_eq!(
            ReplCommand::parse("/load two"),
            ReplCommand::BadIndex("two".to_string())
        );
    }

    #[test]
    fn unknown_command_is_reported() {
        assert_eq!(
            ReplCommand::parse("/models"),
            ReplCommand::Unknown("/models".to_string())
        );
    }
}
