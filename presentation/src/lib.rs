//! Presentation layer for streamchat
//!
//! This crate contains the CLI definition, the console chat view and the
//! interactive chat REPL.

pub mod chat;
pub mod cli;
pub mod output;

// Re-export commonly used types
pub use chat::{ChatRepl, ReplCommand};
pub use cli::commands::{Cli, RunMode};
pub use output::console::ConsoleView;
