use std::fmt;
use std::time::Duration;

use gns_common::{NotificationResponse, SendRequest};
use gns_config::GnsConfig;
use reqwest::Request;
use tracing::debug;

use crate::error::ClientError;
use crate::request::{build_health_request, build_notify_request, normalize_base_url};
use crate::response;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

const DEFAULT_USER_AGENT: &str = concat!("gns-rust-sdk/", env!("CARGO_PKG_VERSION"));

/// Client for the GNS API.
///
/// Holds no per-call state. Cloning is cheap and clones share the
/// connection pool, so one instance can serve many tasks.
#[derive(Clone)]
pub struct Client {
    base_url: String,
    token: String,
    timeout: Duration,
    http: reqwest::Client,
}

impl Client {
    /// Client with the default 10 second timeout.
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Result<Self, ClientError> {
        Self::builder(base_url, token).build()
    }

    pub fn builder(base_url: impl Into<String>, token: impl Into<String>) -> ClientBuilder {
        ClientBuilder {
            base_url: base_url.into(),
            token: token.into(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: None,
        }
    }

    pub fn from_config(config: &GnsConfig) -> Result<Self, ClientError> {
        let token = config
            .api_token
            .as_deref()
            .ok_or(ClientError::MissingToken)?;
        Self::builder(config.api_url.as_str(), token)
            .timeout(config.timeout())
            .build()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Submit a notification for `request.task_id`.
    ///
    /// A 2xx/3xx response whose body is not a JSON object yields an empty
    /// map rather than an error.
    pub async fn send_notification(
        &self,
        request: &SendRequest,
    ) -> Result<NotificationResponse, ClientError> {
        let body = serde_json::to_vec(request).map_err(ClientError::Marshal)?;
        let http_request = build_notify_request(&self.http, &self.base_url, &self.token, body)
            .map_err(ClientError::Request)?;

        debug!(task_id = %request.task_id, "sending notification");
        self.execute(http_request).await
    }

    /// Query the server's health endpoint.
    pub async fn health(&self) -> Result<NotificationResponse, ClientError> {
        let http_request = build_health_request(&self.http, &self.base_url, &self.token)
            .map_err(ClientError::Request)?;
        self.execute(http_request).await
    }

    async fn execute(&self, request: Request) -> Result<NotificationResponse, ClientError> {
        let method = request.method().clone();
        let url = request.url().clone();

        let resp = self
            .http
            .execute(request)
            .await
            .map_err(ClientError::Send)?;

        let status = resp.status();
        let body = resp.bytes().await.map_err(ClientError::ReadBody)?;
        debug!(%method, %url, status = status.as_u16(), bytes = body.len(), "response received");

        response::interpret(status.as_u16(), &body)
    }
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("base_url", &self.base_url)
            .field("token", &"<redacted>")
            .field("timeout", &self.timeout)
            .finish()
    }
}

pub struct ClientBuilder {
    base_url: String,
    token: String,
    timeout: Duration,
    user_agent: Option<String>,
}

impl ClientBuilder {
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    pub fn build(self) -> Result<Client, ClientError> {
        let user_agent = self
            .user_agent
            .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string());

        let http = reqwest::Client::builder()
            .timeout(self.timeout)
            .user_agent(user_agent)
            .build()
            .map_err(ClientError::Transport)?;

        Ok(Client {
            base_url: normalize_base_url(&self.base_url),
            token: self.token,
            timeout: self.timeout,
            http,
        })
    }
}
