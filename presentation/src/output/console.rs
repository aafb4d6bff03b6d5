//! Console rendering of the chat

use colored::Colorize;
use crossterm::{
    cursor::MoveTo,
    execute,
    terminal::{Clear, ClearType},
};
use indicatif::{ProgressBar, ProgressStyle};
use std::fmt;
use std::io::{self, Stdout, Write};
use std::time::Duration;
use streamchat_application::ChatView;
use streamchat_domain::{Role, Transcript};
use tracing::debug;

/// Where the reply currently being streamed stands on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ReplyState {
    Idle,
    /// Placeholder pushed, nothing printed yet (spinner may be running)
    Waiting,
    /// Label printed, text is being appended to the current line
    Streaming,
}

/// [`ChatView`] that prints to a terminal.
///
/// Printed text cannot be taken back, so replacing the last message starts
/// a fresh line for the replacement. The in-memory [`Transcript`] always
/// holds the logical content, even after the output has been closed.
pub struct ConsoleView<W: Write + Send = Stdout> {
    out: W,
    /// Set on the first failed write; nothing is written afterwards
    output_closed: bool,
    transcript: Transcript,
    reply: ReplyState,
    spinner: Option<ProgressBar>,
    show_spinner: bool,
    clear_screen: bool,
}

impl ConsoleView<Stdout> {
    /// View on stdout with a waiting spinner and real screen clears.
    pub fn stdout() -> Self {
        Self::new(io::stdout())
            .with_spinner(true)
            .with_clear_screen(true)
    }
}

impl<W: Write + Send> ConsoleView<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            output_closed: false,
            transcript: Transcript::new(),
            reply: ReplyState::Idle,
            spinner: None,
            show_spinner: false,
            clear_screen: false,
        }
    }

    /// Show a spinner until the first segment of a reply arrives
    pub fn with_spinner(mut self, show: bool) -> Self {
        self.show_spinner = show;
        self
    }

    /// Clear the terminal on `clear`, instead of printing a separator
    pub fn with_clear_screen(mut self, clear: bool) -> Self {
        self.clear_screen = clear;
        self
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn emit(&mut self, args: fmt::Arguments<'_>) {
        if self.output_closed {
            return;
        }
        if let Err(e) = self.out.write_fmt(args) {
            self.close_output(e);
        }
    }

    fn flush(&mut self) {
        if self.output_closed {
            return;
        }
        if let Err(e) = self.out.flush() {
            self.close_output(e);
        }
    }

    fn close_output(&mut self, error: io::Error) {
        debug!("Console output closed, dropping further writes: {}", error);
        self.output_closed = true;
    }

    fn label(role: Role) -> String {
        match role {
            Role::User => "you ›".cyan().bold().to_string(),
            Role::Assistant => "bot ›".green().bold().to_string(),
        }
    }

    fn stop_spinner(&mut self) {
        if let Some(spinner) = self.spinner.take() {
            spinner.finish_and_clear();
        }
    }

    fn start_spinner(&mut self) {
        let spinner = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
            spinner.set_style(style);
        }
        spinner.set_message("waiting for reply...");
        spinner.enable_steady_tick(Duration::from_millis(100));
        self.spinner = Some(spinner);
    }

    /// Print the assistant label if the reply has not started on screen.
    fn open_reply_line(&mut self) {
        if self.reply == ReplyState::Waiting {
            self.stop_spinner();
            self.emit(format_args!("{} ", Self::label(Role::Assistant)));
            self.reply = ReplyState::Streaming;
        }
    }

    /// Terminate the current reply line, if any.
    fn close_reply_line(&mut self) {
        self.stop_spinner();
        if self.reply == ReplyState::Streaming {
            self.emit(format_args!("\n"));
        }
        self.reply = ReplyState::Idle;
    }
}

impl<W: Write + Send> ChatView for ConsoleView<W> {
    fn push_message(&mut self, role: Role, text: &str) {
        self.close_reply_line();
        self.transcript.push(role, text);

        if role == Role::Assistant && text.is_empty() {
            self.reply = ReplyState::Waiting;
            if self.show_spinner {
                self.start_spinner();
            }
        } else {
            self.emit(format_args!("{} {}\n", Self::label(role), text));
        }
    }

    fn append_to_last(&mut self, text: &str) {
        let _ = self.transcript.append_to_last(text);
        self.open_reply_line();
        self.emit(format_args!("{}", text));
    }

    fn replace_last(&mut self, text: &str) {
        let _ = self.transcript.replace_last(text);
        self.close_reply_line();
        self.emit(format_args!(
            "{} {}\n",
            Self::label(Role::Assistant),
            text.red().bold()
        ));
    }

    fn scroll_to_bottom(&mut self) {
        self.flush();
    }

    fn clear(&mut self) {
        self.close_reply_line();
        self.transcript.clear();
        if self.output_closed {
            return;
        }
        if self.clear_screen {
            if let Err(e) = execute!(self.out, Clear(ClearType::All), MoveTo(0, 0)) {
                self.close_output(e);
            }
        } else {
            self.emit(format_args!("{}\n", "── new session ──".dimmed()));
        }
    }

    fn reply_finished(&mut self) {
        // An empty reply still gets its label so the exchange reads as finished
        self.open_reply_line();
        self.close_reply_line();
        self.flush();
    }
}
