//! CLI entrypoint for streamchat
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, bail};
use clap::Parser;
use std::ffi::OsStr;
use std::io;
use std::path::Path;
use std::sync::Arc;
use streamchat_application::{
    ConversationLogger, ManageSessionsUseCase, NoConversationLogger, SendOutcome, SendQueryUseCase,
};
use streamchat_infrastructure::{
    ConfigLoader, FileConfig, FileLoggingConfig, HttpChatGateway, JsonlConversationLogger,
};
use streamchat_presentation::{ChatRepl, Cli, ConsoleView, RunMode};
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // === Configuration ===
    let mut config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_deref()).context("Failed to load configuration")?
    };
    if let Some(server) = &cli.server {
        config.server.base_url = server.clone();
    }
    config.validate()?;

    if cli.show_config {
        print_config(&cli, &config)?;
        return Ok(());
    }

    let _log_guard = init_logging(cli.verbose, &config.logging);

    if cli.no_color || !config.output.color {
        colored::control::set_override(false);
    }

    info!("Starting streamchat against {}", config.server.base_url);

    // === Dependency Injection ===
    let gateway = Arc::new(HttpChatGateway::from_config(&config.server)?);
    let conversation_logger: Arc<dyn ConversationLogger> = match &config.logging.conversation_log
    {
        Some(path) => match JsonlConversationLogger::open(path) {
            Some(logger) => Arc::new(logger),
            None => Arc::new(NoConversationLogger),
        },
        None => Arc::new(NoConversationLogger),
    };

    let send_query =
        SendQueryUseCase::new(gateway.clone()).with_conversation_logger(conversation_logger.clone());
    let sessions = ManageSessionsUseCase::new(gateway).with_conversation_logger(conversation_logger);

    // Non-interactive modes print a separator instead of clearing the screen
    let plain_view = || ConsoleView::new(io::stdout()).with_spinner(true);

    match cli.mode() {
        RunMode::Interactive => {
            let history = config
                .repl
                .history_file
                .clone()
                .or_else(ConfigLoader::default_history_path);
            let mut repl = ChatRepl::new(send_query, sessions, ConsoleView::stdout())
                .with_history(history, config.repl.history_size);
            repl.run().await?;
        }
        RunMode::OneShot(query) => match send_query.execute(&query, &mut plain_view()).await {
            SendOutcome::Failed { error } => bail!("Reply failed: {}", error),
            SendOutcome::Skipped | SendOutcome::Completed { .. } => {}
        },
        RunMode::NewChat => {
            sessions.new_chat(&mut plain_view()).await?;
            println!("Started a new chat session");
        }
        RunMode::LoadChat(index) => {
            let history = sessions.load_chat(index, &mut plain_view()).await?;
            println!();
            println!("[{}] {}", index, ManageSessionsUseCase::preview(&history));
        }
        RunMode::ClearChats => {
            sessions.clear_chats(&mut plain_view()).await?;
            println!("Cleared all chat sessions");
        }
    }

    Ok(())
}

/// Install the stderr subscriber plus the optional log file.
///
/// The returned guard flushes the file writer and must live until exit. A
/// log file that cannot be opened is reported and skipped.
fn init_logging(verbose: u8, logging: &FileLoggingConfig) -> Option<WorkerGuard> {
    let filter = match verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_writer(io::stderr);

    let mut file_error = None;
    let (file_layer, guard) = match logging.file.as_deref().map(open_log_file) {
        Some(Ok(appender)) => {
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(writer);
            (Some(layer), Some(guard))
        }
        Some(Err(e)) => {
            file_error = Some(e);
            (None, None)
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .init();

    if let Some(e) = file_error {
        warn!("File logging disabled: {:#}", e);
    }

    guard
}

/// Open `path` for appending diagnostic logs, creating its directory.
fn open_log_file(path: &Path) -> Result<RollingFileAppender> {
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let name = path
        .file_name()
        .unwrap_or_else(|| OsStr::new("streamchat.log"));

    std::fs::create_dir_all(dir)
        .with_context(|| format!("cannot create log directory {}", dir.display()))?;
    RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(name.to_string_lossy())
        .build(dir)
        .with_context(|| format!("cannot open log file {}", path.display()))
}

fn print_config(cli: &Cli, config: &FileConfig) -> Result<()> {
    if cli.no_config {
        println!("Configuration files disabled (--no-config)\n");
    } else {
        println!("{}", ConfigLoader::describe_sources(cli.config.as_deref()));
    }
    println!("Effective configuration:\n");
    println!(
        "{}",
        toml::to_string_pretty(config).context("Failed to render configuration")?
    );
    Ok(())
}
