//! Interactive chat module
//!
//! Provides a line-editor based interactive chat session.

mod repl;

pub use repl::{ChatRepl, ReplCommand};
