//! HTTP adapter for the chat server.
//!
//! - [`gateway::HttpChatGateway`] — [`ChatGateway`](streamchat_application::ChatGateway)
//!   implementation over `reqwest`
//! - [`protocol`] — request/response bodies and endpoint paths
//! - [`error::HttpError`] — client construction errors

pub mod error;
pub mod gateway;
pub mod protocol;
