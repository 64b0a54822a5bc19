//! LLM access for the AI endpoints.
//!
//! DESIGN
//! ======
//! [`LlmClient`] holds one provider adapter plus the sampling settings and
//! implements [`LlmChat`]. Both adapters share the HTTP plumbing below:
//! build a request body, POST it, reject non-2xx statuses, then parse the
//! provider's JSON into a [`ChatResponse`].
//!
//! ERROR HANDLING
//! ==============
//! Provider bodies on failure are kept in [`LlmError::Upstream`] for logs
//! only; the HTTP layer never forwards them to callers.

pub mod anthropic;
pub mod config;
pub mod openai;
pub mod types;

use std::sync::Arc;
use std::time::Duration;

use config::{LlmConfig, Provider, Timeouts};
pub use types::LlmChat;
use types::{ChatRequest, ChatResponse, LlmError};

/// Model and sampling settings sent with every request.
#[derive(Debug, Clone, PartialEq)]
pub struct Sampling {
    pub model: String,
    pub temperature: f32,
}

pub struct LlmClient {
    adapter: Adapter,
    sampling: Sampling,
}

enum Adapter {
    OpenAi(openai::OpenAiClient),
    Anthropic(anthropic::AnthropicClient),
}

impl LlmClient {
    /// Client configured from the environment, ready to share across handlers.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is missing or the settings are invalid.
    pub fn from_env() -> Result<Arc<Self>, LlmError> {
        Ok(Arc::new(Self::from_config(LlmConfig::from_env()?)?))
    }

    /// # Errors
    ///
    /// Returns [`LlmError::Config`] if the HTTP client cannot be built.
    pub fn from_config(config: LlmConfig) -> Result<Self, LlmError> {
        let http = http_client(config.timeouts)?;
        let adapter = match config.provider {
            Provider::OpenAi => Adapter::OpenAi(openai::OpenAiClient::new(
                http,
                config.api_key,
                config.openai_base_url,
                config.openai_endpoint,
            )),
            Provider::Anthropic => Adapter::Anthropic(anthropic::AnthropicClient::new(http, config.api_key)),
        };
        Ok(Self { adapter, sampling: Sampling { model: config.model, temperature: config.temperature } })
    }

    #[must_use]
    pub fn model(&self) -> &str {
        &self.sampling.model
    }
}

#[async_trait::async_trait]
impl LlmChat for LlmClient {
    async fn chat(&self, request: ChatRequest<'_>) -> Result<ChatResponse, LlmError> {
        match &self.adapter {
            Adapter::OpenAi(client) => client.chat(&self.sampling, request).await,
            Adapter::Anthropic(client) => client.chat(&self.sampling, request).await,
        }
    }
}

fn http_client(timeouts: Timeouts) -> Result<reqwest::Client, LlmError> {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(timeouts.request_secs))
        .connect_timeout(Duration::from_secs(timeouts.connect_secs))
        .build()
        .map_err(|e| LlmError::Config(format!("http client: {e}")))
}

/// Send a prepared POST and return the body of a 2xx reply.
pub(crate) async fn send(request: reqwest::RequestBuilder) -> Result<String, LlmError> {
    let response = request.send().await.map_err(|e| LlmError::Transport(e.to_string()))?;
    let status = response.status();
    let body = response.text().await.map_err(|e| LlmError::Transport(e.to_string()))?;
    if !status.is_success() {
        return Err(LlmError::Upstream { status: status.as_u16(), body });
    }
    Ok(body)
}

/// Decode a provider body into its wire type.
pub(crate) fn decode<T: serde::de::DeserializeOwned>(body: &str) -> Result<T, LlmError> {
    serde_json::from_str(body).map_err(|e| LlmError::Malformed(e.to_string()))
}
