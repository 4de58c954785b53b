//! HTTP plumbing shared by every endpoint group.
//!
//! [`ApiClient`] owns the `reqwest::Client`, the API base URL and the
//! session used for bearer authentication. Endpoint methods live in the
//! sibling modules as further `impl ApiClient` blocks.
//!
//! # Example
//!
//! ```rust,no_run
//! use fundbridge::api::ApiClient;
//! use fundbridge::config::ClientConfig;
//! use fundbridge::session::{MemoryStore, SessionContext};
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let session = SessionContext::new(Arc::new(MemoryStore::new()));
//! let client = ApiClient::new(&ClientConfig::default(), session);
//!
//! let startups = client.list_startups().await?;
//! println!("{} startups", startups.len());
//! # Ok(())
//! # }
//! ```

use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::session::SessionContext;
use reqwest::{header::AUTHORIZATION, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

/// Marketplace API client.
///
/// Cheap to clone; clones share the connection pool and the session.
#[derive(Clone, Debug)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
    session: SessionContext,
}

impl ApiClient {
    /// Builds a client. No request timeout is applied unless the config
    /// sets one.
    pub fn new(config: &ClientConfig, session: SessionContext) -> Self {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().unwrap_or_else(|e| {
            warn!("falling back to default HTTP client: {}", e);
            reqwest::Client::new()
        });

        Self {
            client,
            base_url: config.api_url.trim_end_matches('/').to_string(),
            session,
        }
    }

    pub fn session(&self) -> &SessionContext {
        &self.session
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Request without credentials.
    pub(crate) fn public(&self, method: Method, path: &str) -> RequestBuilder {
        self.client.request(method, self.url(path))
    }

    /// Request carrying `Authorization: Bearer <token>`.
    pub(crate) fn authed(&self, method: Method, path: &str) -> Result<RequestBuilder, ApiError> {
        let token = match self.session.token() {
            Ok(Some(token)) => token,
            Ok(None) => return Err(ApiError::Unauthenticated),
            Err(e) => {
                warn!("failed to read session token: {}", e);
                return Err(ApiError::Unauthenticated);
            }
        };

        Ok(self
            .public(method, path)
            .header(AUTHORIZATION, format!("Bearer {}", token)))
    }

    /// Sends the request and returns the raw response when it is 2xx.
    /// Error bodies are classified with [`ApiError::from_response_body`].
    pub(crate) async fn send(&self, request: RequestBuilder) -> Result<reqwest::Response, ApiError> {
        let response = self.execute(request).await?;
        if response.status().is_success() {
            return Ok(response);
        }

        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        debug!(status, body = %body, "request rejected");
        Err(ApiError::from_response_body(status, &body))
    }

    /// Like [`ApiClient::send`] but keeps error bodies unclassified.
    pub(crate) async fn send_raw(&self, request: RequestBuilder) -> Result<reqwest::Response, ApiError> {
        let response = self.execute(request).await?;
        if response.status().is_success() {
            return Ok(response);
        }

        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        debug!(status, body = %body, "request rejected");
        Err(ApiError::Status { status, body })
    }

    /// Sends the request and decodes a 2xx JSON body into `T`.
    pub(crate) async fn send_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> Result<T, ApiError> {
        let response = self.send(request).await?;
        let bytes = response.bytes().await.map_err(ApiError::Network)?;
        serde_json::from_slice(&bytes).map_err(|e| ApiError::Decode(e.to_string()))
    }

    async fn execute(&self, request: RequestBuilder) -> Result<reqwest::Response, ApiError> {
        let request = request.build().map_err(ApiError::Network)?;
        let method = request.method().clone();
        let url = request.url().clone();
        debug!(%method, path = url.path(), "sending request");

        let response = self.client.execute(request).await.map_err(|e| {
            warn!(%method, path = url.path(), "request failed: {}", e);
            ApiError::Network(e)
        })?;

        debug!(%method, path = url.path(), status = response.status().as_u16(), "response received");
        Ok(response)
    }
}
