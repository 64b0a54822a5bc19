//! LLM settings read from the environment.
//!
//! The key itself is never named directly: `LLM_API_KEY_ENV` holds the name
//! of the variable that carries it, so deployments can reuse an existing
//! `OPENAI_API_KEY` or `ANTHROPIC_API_KEY`.

use super::types::LlmError;

pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_TEMPERATURE: f32 = 0.7;
const DEFAULT_REQUEST_SECS: u64 = 60;
const DEFAULT_CONNECT_SECS: u64 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
    OpenAi,
    Anthropic,
}

/// Which OpenAI-compatible endpoint to call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenAiEndpoint {
    ChatCompletions,
    Responses,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timeouts {
    pub request_secs: u64,
    pub connect_secs: u64,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self { request_secs: DEFAULT_REQUEST_SECS, connect_secs: DEFAULT_CONNECT_SECS }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LlmConfig {
    pub provider: Provider,
    pub api_key: String,
    pub model: String,
    pub temperature: f32,
    pub openai_endpoint: OpenAiEndpoint,
    pub openai_base_url: String,
    pub timeouts: Timeouts,
}

impl LlmConfig {
    /// Read `LLM_PROVIDER` (`openai` | `anthropic`), `LLM_API_KEY_ENV`,
    /// `LLM_MODEL`, `LLM_TEMPERATURE`, `LLM_OPENAI_MODE`
    /// (`chat_completions` | `responses`), `LLM_OPENAI_BASE_URL`,
    /// `LLM_REQUEST_TIMEOUT_SECS` and `LLM_CONNECT_TIMEOUT_SECS`.
    ///
    /// # Errors
    ///
    /// [`LlmError::MissingKey`] when no key is found, [`LlmError::Config`]
    /// for an unknown provider, endpoint or temperature.
    pub fn from_env() -> Result<Self, LlmError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`LlmConfig::from_env`] over an arbitrary lookup.
    ///
    /// # Errors
    ///
    /// See [`LlmConfig::from_env`].
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, LlmError> {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_owned()).filter(|v| !v.is_empty());

        let provider = match get("LLM_PROVIDER").as_deref() {
            None | Some("openai") => Provider::OpenAi,
            Some("anthropic") => Provider::Anthropic,
            Some(other) => return Err(LlmError::Config(format!("unknown LLM_PROVIDER: {other}"))),
        };

        let key_var = get("LLM_API_KEY_ENV").ok_or_else(|| LlmError::MissingKey { var: "LLM_API_KEY_ENV".into() })?;
        let api_key = get(&key_var).ok_or(LlmError::MissingKey { var: key_var })?;

        let openai_endpoint = match get("LLM_OPENAI_MODE").as_deref() {
            None | Some("chat_completions") => OpenAiEndpoint::ChatCompletions,
            Some("responses") => OpenAiEndpoint::Responses,
            Some(other) => return Err(LlmError::Config(format!("unknown LLM_OPENAI_MODE: {other}"))),
        };

        let temperature = match get("LLM_TEMPERATURE") {
            None => DEFAULT_TEMPERATURE,
            Some(raw) => raw
                .parse::<f32>()
                .ok()
                .filter(|t| (0.0..=2.0).contains(t))
                .ok_or_else(|| LlmError::Config(format!("LLM_TEMPERATURE must be within 0..=2, got {raw}")))?,
        };

        let secs = |key: &str, default: u64| get(key).and_then(|v| v.parse().ok()).unwrap_or(default);

        Ok(Self {
            model: get("LLM_MODEL").unwrap_or_else(|| default_model(provider).to_owned()),
            provider,
            api_key,
            temperature,
            openai_endpoint,
            openai_base_url: get("LLM_OPENAI_BASE_URL")
                .unwrap_or_else(|| DEFAULT_OPENAI_BASE_URL.to_owned())
                .trim_end_matches('/')
                .to_owned(),
            timeouts: Timeouts {
                request_secs: secs("LLM_REQUEST_TIMEOUT_SECS", DEFAULT_REQUEST_SECS),
                connect_secs: secs("LLM_CONNECT_TIMEOUT_SECS", DEFAULT_CONNECT_SECS),
            },
        })
    }
}

fn default_model(provider: Provider) -> &'static str {
    match provider {
        Provider::OpenAi => "gpt-4o-mini",
        Provider::Anthropic => "claude-3-5-haiku-latest",
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
