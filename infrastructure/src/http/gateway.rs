//! Chat Gateway implementation over HTTP

use crate::config::FileServerConfig;
use crate::http::error::{HttpError, to_gateway_error};
use crate::http::protocol::{
    CLEAR_CHATS, ClearChatsResponse, LOAD_CHAT, LoadChatResponse, NEW_CHAT, STREAM,
    StreamRequest,
};
use async_trait::async_trait;
use futures::StreamExt;
use reqwest::{Client, Response, StatusCode, Url};
use std::time::Duration;
use streamchat_application::{ByteStream, ChatGateway, ClearChatsStatus, GatewayError};
use streamchat_domain::{ChatMessage, Query};
use tracing::{debug, info};

const USER_AGENT: &str = concat!("streamchat/", env!("CARGO_PKG_VERSION"));

/// [`ChatGateway`] backed by a `reqwest` client.
///
/// The server tracks sessions with a cookie, so the client keeps a cookie
/// jar for as long as the gateway lives.
pub struct HttpChatGateway {
    client: Client,
    base_url: Url,
}

impl HttpChatGateway {
    /// Create a gateway for the server at `base_url` with default settings.
    pub fn new(base_url: &str) -> Result<Self, HttpError> {
        Self::build(base_url, None)
    }

    /// Create a gateway from the `[server]` config section.
    pub fn from_config(config: &FileServerConfig) -> Result<Self, HttpError> {
        Self::build(
            &config.base_url,
            config.connect_timeout_seconds.map(Duration::from_secs),
        )
    }

    fn build(base_url: &str, connect_timeout: Option<Duration>) -> Result<Self, HttpError> {
        let base_url = Self::parse_base_url(base_url)?;

        let mut builder = Client::builder()
            .cookie_store(true)
            .user_agent(USER_AGENT);
        if let Some(timeout) = connect_timeout {
            builder = builder.connect_timeout(timeout);
        }
        let client = builder.build()?;

        info!("HttpChatGateway initialized for {}", base_url);
        Ok(Self { client, base_url })
    }

    /// Parse the base URL, forcing a trailing slash so endpoint paths are
    /// joined below it rather than replacing its last segment.
    fn parse_base_url(raw: &str) -> Result<Url, HttpError> {
        let mut url = Url::parse(raw).map_err(|e| HttpError::InvalidBaseUrl {
            url: raw.to_string(),
            reason: e.to_string(),
        })?;
        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }
        Ok(url)
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url, GatewayError> {
        self.base_url
            .join(path)
            .map_err(|e| GatewayError::ConnectionError(format!("{}: {}", path, e)))
    }

    /// Turn a non-success status into [`GatewayError::HttpStatus`].
    fn ensure_success(endpoint: &str, response: Response) -> Result<Response, GatewayError> {
        let status = response.status();
        if status.is_success() {
            Ok(response)
        } else {
            Err(GatewayError::HttpStatus {
                endpoint: endpoint.to_string(),
                status: status.as_u16(),
            })
        }
    }
}

#[async_trait]
impl ChatGateway for HttpChatGateway {
    async fn stream(&self, query: &Query) -> Result<ByteStream, GatewayError> {
        let url = self.endpoint(STREAM)?;
        debug!("POST {}", url);

        let response = self
            .client
            .post(url)
            .json(&StreamRequest {
                query: query.text(),
            })
            .send()
            .await
            .map_err(|e| to_gateway_error(STREAM, e))?;
        let response = Self::ensure_success(STREAM, response)?;

        Ok(response
            .bytes_stream()
            .map(|chunk| chunk.map_err(|e| to_gateway_error(STREAM, e)))
            .boxed())
    }

    async fn new_chat(&self) -> Result<(), GatewayError> {
        let url = self.endpoint(NEW_CHAT)?;
        debug!("POST {}", url);

        let response = self
            .client
            .post(url)
            .send()
            .await
            .map_err(|e| to_gateway_error(NEW_CHAT, e))?;
        Self::ensure_success(NEW_CHAT, response)?;
        Ok(())
    }

    async fn load_chat(&self, index: usize) -> Result<Vec<ChatMessage>, GatewayError> {
        let url = self.endpoint(&format!("{}/{}", LOAD_CHAT, index))?;
        debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| to_gateway_error(LOAD_CHAT, e))?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(GatewayError::SessionNotFound(index));
        }
        let response = Self::ensure_success(LOAD_CHAT, response)?;

        let body: LoadChatResponse = response
            .json()
            .await
            .map_err(|e| to_gateway_error(LOAD_CHAT, e))?;
        Ok(body.chat_history)
    }

    async fn clear_chats(&self) -> Result<ClearChatsStatus, GatewayError> {
        let url = self.endpoint(CLEAR_CHATS)?;
        debug!("POST {}", url);

        let response = self
            .client
            .post(url)
            .send()
            .await
            .map_err(|e| to_gateway_error(CLEAR_CHATS, e))?;
        let response = Self::ensure_success(CLEAR_CHATS, response)?;

        let body: ClearChatsResponse = response
            .json()
            .await
            .map_err(|e| to_gateway_error(CLEAR_CHATS, e))?;
        Ok(ClearChatsStatus {
            status: body.status,
        })
    }
}
