//! Provider-neutral chat types.
//!
//! The AI service sends one system prompt plus a short list of turns and
//! reads back plain text. Provider adapters translate to and from their own
//! wire shapes; nothing provider-specific leaks past this module.

// =============================================================================
// ERROR
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    /// LLM settings are present but unusable.
    #[error("LLM config invalid: {0}")]
    Config(String),

    /// The API key variable (or the variable naming it) is unset.
    #[error("LLM API key missing: env var {var} not set")]
    MissingKey { var: String },

    /// Connection, timeout, or body read failure.
    #[error("LLM transport failed: {0}")]
    Transport(String),

    /// The provider answered with a non-success status.
    #[error("LLM provider returned HTTP {status}")]
    Upstream { status: u16, body: String },

    /// The provider's body did not have the expected shape.
    #[error("LLM reply unreadable: {0}")]
    Malformed(String),
}

impl crate::error::ErrorCode for LlmError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Config(_) => "E_LLM_CONFIG",
            Self::MissingKey { .. } => "E_LLM_MISSING_KEY",
            Self::Transport(_) => "E_LLM_TRANSPORT",
            Self::Upstream { .. } => "E_LLM_UPSTREAM",
            Self::Malformed(_) => "E_LLM_MALFORMED",
        }
    }

    fn retryable(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::Upstream { status: 408 | 429 | 500..=599, .. })
    }
}

// =============================================================================
// REQUEST
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Assistant => "assistant",
        }
    }
}

/// Picture attached to a turn, already base64-encoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineImage {
    pub mime_type: String,
    pub base64: String,
}

impl InlineImage {
    /// `data:<mime>;base64,<data>`
    #[must_use]
    pub fn data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.base64)
    }
}

/// One conversation turn. Adapters map it onto their provider's message
/// shape; a turn with an image becomes a multi-part message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatTurn {
    pub role: Role,
    pub content: String,
    pub image: Option<InlineImage>,
}

impl ChatTurn {
    #[must_use]
    pub fn user(content: impl Into<String>) -> Self {
        Self { role: Role::User, content: content.into(), image: None }
    }

    #[must_use]
    pub fn user_with_image(content: impl Into<String>, image: InlineImage) -> Self {
        Self { role: Role::User, content: content.into(), image: Some(image) }
    }
}

/// Everything one completion needs besides the provider settings.
#[derive(Debug, Clone, Copy)]
pub struct ChatRequest<'a> {
    pub system: &'a str,
    pub turns: &'a [ChatTurn],
    pub max_tokens: u32,
}

// =============================================================================
// RESPONSE
// =============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TokenUsage {
    pub input: u64,
    pub output: u64,
}

impl TokenUsage {
    #[must_use]
    pub fn total(self) -> u64 {
        self.input.saturating_add(self.output)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatResponse {
    /// Text parts joined with newlines.
    pub text: String,
    pub model: String,
    /// The reply stopped at the output token limit.
    pub truncated: bool,
    pub usage: TokenUsage,
}

/// Join the non-empty text parts of a reply with newlines.
pub(crate) fn join_text<'a>(parts: impl IntoIterator<Item = &'a str>) -> String {
    parts
        .into_iter()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

// =============================================================================
// TRAIT
// =============================================================================

/// Chat completion seam; the AI service only sees this trait so tests can
/// answer with canned replies.
#[async_trait::async_trait]
pub trait LlmChat: Send + Sync {
    /// # Errors
    ///
    /// Returns an [`LlmError`] if the call fails or the reply is unreadable.
    async fn chat(&self, request: ChatRequest<'_>) -> Result<ChatResponse, LlmError>;
}

#[cfg(test)]
#[path = "types_test.rs"]
mod tests;
