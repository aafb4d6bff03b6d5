//! Infrastructure layer for streamchat
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod config;
pub mod http;
pub mod logging;

// Re-export commonly used types
pub use config::{
    ConfigLoader, ConfigValidationError, FileConfig, FileLoggingConfig, FileOutputConfig,
    FileReplConfig, FileServerConfig,
};
pub use http::{error::HttpError, gateway::HttpChatGateway};
pub use logging::JsonlConversationLogger;
