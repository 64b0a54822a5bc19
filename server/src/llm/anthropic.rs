//! Anthropic Messages API adapter (`POST /v1/messages`).

use serde::{Deserialize, Serialize};

use super::types::{ChatRequest, ChatResponse, ChatTurn, LlmError, TokenUsage, join_text};
use super::{Sampling, decode, send};

const MESSAGES_URL: &str = "https://api.anthropic.com/v1/messages";
const API_VERSION: &str = "2023-06-01";

pub struct AnthropicClient {
    http: reqwest::Client,
    api_key: String,
}

impl AnthropicClient {
    pub fn new(http: reqwest::Client, api_key: String) -> Self {
        Self { http, api_key }
    }

    pub async fn chat(&self, sampling: &Sampling, request: ChatRequest<'_>) -> Result<ChatResponse, LlmError> {
        let body = MessagesRequest {
            model: &sampling.model,
            max_tokens: request.max_tokens,
            temperature: sampling.temperature,
            system: request.system,
            messages: request.turns.iter().map(message).collect(),
        };
        let http = self
            .http
            .post(MESSAGES_URL)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", API_VERSION)
            .json(&body);
        parse_messages(&send(http).await?)
    }
}

#[derive(Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    temperature: f32,
    system: &'a str,
    messages: Vec<Message<'a>>,
}

#[derive(Serialize)]
struct Message<'a> {
    role: &'static str,
    content: Content<'a>,
}

#[derive(Serialize)]
#[serde(untagged)]
enum Content<'a> {
    Text(&'a str),
    Blocks(Vec<InputBlock<'a>>),
}

#[derive(Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum InputBlock<'a> {
    Image { source: ImageSource<'a> },
    Text { text: &'a str },
}

#[derive(Serialize)]
struct ImageSource<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    media_type: &'a str,
    data: &'a str,
}

/// Images go before the text, as the Messages API recommends.
fn message(turn: &ChatTurn) -> Message<'_> {
    let content = match &turn.image {
        None => Content::Text(&turn.content),
        Some(image) => Content::Blocks(vec![
            InputBlock::Image {
                source: ImageSource { kind: "base64", media_type: &image.mime_type, data: &image.base64 },
            },
            InputBlock::Text { text: &turn.content },
        ]),
    };
    Message { role: turn.role.as_str(), content }
}

#[derive(Deserialize)]
struct MessagesResponse {
    #[serde(default)]
    content: Vec<Block>,
    #[serde(default)]
    model: String,
    #[serde(default)]
    stop_reason: Option<String>,
    #[serde(default)]
    usage: Usage,
}

/// Any content block; only `text` blocks carry display text.
#[derive(Deserialize)]
struct Block {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: String,
}

#[derive(Deserialize, Default)]
struct Usage {
    #[serde(default)]
    input_tokens: u64,
    #[serde(default)]
    output_tokens: u64,
}

fn parse_messages(body: &str) -> Result<ChatResponse, LlmError> {
    let reply: MessagesResponse = decode(body)?;
    Ok(ChatResponse {
        text: join_text(reply.content.iter().filter(|b| b.kind == "text").map(|b| b.text.as_str())),
        model: reply.model,
        truncated: reply.stop_reason.as_deref() == Some("max_tokens"),
        usage: TokenUsage { input: reply.usage.input_tokens, output: reply.usage.output_tokens },
    })
}

#[cfg(test)]
#[path = "anthropic_test.rs"]
mod tests;
