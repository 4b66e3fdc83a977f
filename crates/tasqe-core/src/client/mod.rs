//! Model client: the two provider calls of the pipeline.
//!
//! Both calls resolve the API key from the [`ListStore`] first and fail with
//! `TasqeError::MissingCredential` before touching the network when none is
//! configured. A non-success status is `TasqeError::RequestFailed`; there is
//! no retry at this layer.

use std::sync::Arc;

use log::debug;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};

use crate::{
    error::{Result, TasqeError},
    prompts,
    schema,
    store::ListStore,
};

pub mod config;
pub mod envelope;
pub mod transport;

pub use config::{ClientConfig, DEFAULT_API_BASE, DEFAULT_MODEL};
pub use envelope::{OutlineResponse, StructuredResponse};
pub use transport::{
    Endpoint, HttpTransport, ModelTransport, TransportRequest, TransportResponse,
};

/// Client for the extraction and structuring endpoints.
#[derive(Clone)]
pub struct ModelClient {
    store: ListStore,
    transport: Arc<dyn ModelTransport>,
    config: ClientConfig,
}

impl ModelClient {
    pub fn new(store: ListStore, transport: Arc<dyn ModelTransport>, config: ClientConfig) -> Self {
        Self {
            store,
            transport,
            config,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Stage 1: free-text week description to markdown outline.
    pub async fn generate_outline(&self, user_text: &str) -> Result<OutlineResponse> {
        let body = self.outline_request(user_text);
        self.call(Endpoint::ChatCompletions, "outline", body).await
    }

    /// Stage 2: markdown outline to schema-constrained JSON.
    pub async fn generate_structured(&self, outline_text: &str) -> Result<StructuredResponse> {
        let body = self.structured_request(outline_text);
        self.call(Endpoint::Responses, "structured", body).await
    }

    /// Request body for the free-text completion endpoint.
    pub fn outline_request(&self, user_text: &str) -> Value {
        json!({
            "model": self.config.model,
            "messages": [
                { "role": "system", "content": prompts::extraction_prompt(self.config.today()) },
                { "role": "user", "content": user_text },
            ],
            "verbosity": self.config.verbosity,
            "reasoning_effort": self.config.extraction_effort,
            "temperature": self.config.temperature,
        })
    }

    /// Request body for the structured completion endpoint.
    pub fn structured_request(&self, outline_text: &str) -> Value {
        json!({
            "model": self.config.model,
            "reasoning": { "effort": self.config.structuring_effort },
            "input": [
                { "role": "system", "content": prompts::structuring_prompt(self.config.today()) },
                { "role": "user", "content": outline_text },
            ],
            "text": { "format": schema::response_format() },
        })
    }

    async fn call<T: DeserializeOwned>(
        &self,
        endpoint: Endpoint,
        stage: &str,
        body: Value,
    ) -> Result<T> {
        let api_key = self
            .store
            .api_key()
            .await?
            .ok_or(TasqeError::MissingCredential)?;

        debug!("Sending {stage} request to {endpoint}");
        let response = self
            .transport
            .send(TransportRequest {
                endpoint,
                api_key,
                body,
            })
            .await?;

        if !response.is_success() {
            return Err(TasqeError::request_failed(
                endpoint.path(),
                response.status,
                &response.body,
            ));
        }

        serde_json::from_str(&response.body)
            .map_err(|e| TasqeError::unexpected(stage, format!("malformed envelope: {e}")))
    }
}
