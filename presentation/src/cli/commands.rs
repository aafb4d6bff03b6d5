//! CLI command definitions

use clap::Parser;
use std::path::PathBuf;

/// CLI arguments for streamchat
#[derive(Parser, Debug)]
#[command(name = "streamchat")]
#[command(author, version, about = "Terminal client for streaming chat servers")]
#[command(long_about = r#"
streamchat sends your message to a chat server and prints the reply as it
is generated. Without a query it starts an interactive session.

Configuration files are loaded from (in priority order):
1. STREAMCHAT_* environment variables
2. --config <path>     Explicit config file
3. ./streamchat.toml   Project-level config
4. ~/.config/streamchat/config.toml   Global config

Example:
  streamchat "Summarize the history of Aksum"
  streamchat --server http://10.0.0.2:5000
  streamchat --load 0
"#)]
pub struct Cli {
    /// Message to send (starts interactive mode when omitted)
    pub query: Option<String>,

    /// Chat server base URL (overrides config)
    #[arg(short, long, value_name = "URL")]
    pub server: Option<String>,

    /// Load a stored chat session and print it
    #[arg(long, value_name = "INDEX", conflicts_with_all = ["query", "new_chat", "clear_chats"])]
    pub load: Option<usize>,

    /// Archive the current session and start a new one
    #[arg(long, conflicts_with_all = ["query", "clear_chats"])]
    pub new_chat: bool,

    /// Delete all stored chat sessions
    #[arg(long, conflicts_with = "query")]
    pub clear_chats: bool,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration sources and effective values, then exit
    #[arg(long)]
    pub show_config: bool,
}

/// What a single invocation does
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunMode {
    /// Send one query, print the reply, exit
    OneShot(String),
    NewChat,
    LoadChat(usize),
    ClearChats,
    Interactive,
}

impl Cli {
    pub fn mode(&self) -> RunMode {
        if let Some(index) = self.load {
            RunMode::LoadChat(index)
        } else if self.new_chat {
            RunMode::NewChat
        } else if self.clear_chats {
            RunMode::ClearChats
        } else if let Some(query) = &self.query {
            RunMode::OneShot(query.clone())
        } else {
            RunMode::Interactive
        }
    }
}
