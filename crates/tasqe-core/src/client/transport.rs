//! Wire transport to the model provider.

use std::fmt;

use async_trait::async_trait;
use log::debug;
use serde_json::Value;

use super::ClientConfig;
use crate::error::{Result, TasqeError};

/// Provider endpoints used by the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    /// Free-text chat completion
    ChatCompletions,
    /// Schema-constrained responses API
    Responses,
}

impl Endpoint {
    pub fn path(&self) -> &'static str {
        match self {
            Endpoint::ChatCompletions => "chat/completions",
            Endpoint::Responses => "responses",
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// One POST to the provider.
#[derive(Debug, Clone)]
pub struct TransportRequest {
    pub endpoint: Endpoint,
    pub api_key: String,
    pub body: Value,
}

/// Raw provider answer: status code and body text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: String,
}

impl TransportResponse {
    pub fn ok(body: impl Into<String>) -> Self {
        Self {
            status: 200,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends requests to the provider. Timeouts are the transport's concern; a
/// request that times out is reported like any other failure.
#[async_trait]
pub trait ModelTransport: Send + Sync {
    async fn send(&self, request: TransportRequest) -> Result<TransportResponse>;
}

/// [`ModelTransport`] over HTTPS using `reqwest`.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    api_base: String,
}

impl HttpTransport {
    /// Builds a client honoring the configured timeout.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| TasqeError::Configuration {
                message: format!("Failed to build HTTP client: {e}"),
            })?;

        Ok(Self {
            client,
            api_base: config.api_base.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, endpoint: Endpoint) -> String {
        format!("{}/{}", self.api_base, endpoint.path())
    }
}

#[async_trait]
impl ModelTransport for HttpTransport {
    async fn send(&self, request: TransportRequest) -> Result<TransportResponse> {
        let url = self.url(request.endpoint);
        debug!("POST {url}");

        let failed = |e: reqwest::Error| TasqeError::RequestFailed {
            endpoint: request.endpoint.to_string(),
            status: e.status().map(|s| s.as_u16()),
            message: e.to_string(),
        };

        let response = self
            .client
            .post(&url)
            .bearer_auth(&request.api_key)
            .json(&request.body)
            .send()
            .await
            .map_err(failed)?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(failed)?;
        debug!("{url} answered {status}");

        Ok(TransportResponse { status, body })
    }
}
