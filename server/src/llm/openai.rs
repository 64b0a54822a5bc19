//! OpenAI-compatible adapter.
//!
//! Speaks `/chat/completions` by default and `/responses` when configured,
//! against any base URL, so self-hosted gateways work unchanged.

use serde::{Deserialize, Serialize};

use super::config::OpenAiEndpoint;
use super::types::{ChatRequest, ChatResponse, ChatTurn, LlmError, TokenUsage, join_text};
use super::{Sampling, decode, send};

pub struct OpenAiClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
    endpoint: OpenAiEndpoint,
}

impl OpenAiClient {
    pub fn new(http: reqwest::Client, api_key: String, base_url: String, endpoint: OpenAiEndpoint) -> Self {
        Self { http, api_key, base_url: base_url.trim_end_matches('/').to_owned(), endpoint }
    }

    pub async fn chat(&self, sampling: &Sampling, request: ChatRequest<'_>) -> Result<ChatResponse, LlmError> {
        match self.endpoint {
            OpenAiEndpoint::ChatCompletions => {
                let body = completion_request(sampling, request);
                parse_completion(&send(self.post("/chat/completions").json(&body)).await?)
            }
            OpenAiEndpoint::Responses => {
                let body = responses_request(sampling, request);
                parse_responses(&send(self.post("/responses").json(&body)).await?)
            }
        }
    }

    fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.http.post(format!("{}{path}", self.base_url)).bearer_auth(&self.api_key)
    }
}

// =============================================================================
// CHAT COMPLETIONS
// =============================================================================

#[derive(Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: Vec<CompletionMessage<'a>>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Serialize)]
struct CompletionMessage<'a> {
    role: &'static str,
    content: CompletionContent<'a>,
}

/// Plain text, or text plus an image for vision models.
#[derive(Serialize)]
#[serde(untagged)]
enum CompletionContent<'a> {
    Text(&'a str),
    Parts(Vec<CompletionPart<'a>>),
}

#[derive(Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum CompletionPart<'a> {
    Text { text: &'a str },
    ImageUrl { image_url: ImageUrl },
}

#[derive(Serialize)]
struct ImageUrl {
    url: String,
}

fn completion_message(turn: &ChatTurn) -> CompletionMessage<'_> {
    let content = match &turn.image {
        None => CompletionContent::Text(&turn.content),
        Some(image) => CompletionContent::Parts(vec![
            CompletionPart::Text { text: &turn.content },
            CompletionPart::ImageUrl { image_url: ImageUrl { url: image.data_url() } },
        ]),
    };
    CompletionMessage { role: turn.role.as_str(), content }
}

/// The system prompt travels as the first message; a blank one is omitted.
fn completion_request<'a>(sampling: &'a Sampling, request: ChatRequest<'a>) -> CompletionRequest<'a> {
    let system = (!request.system.trim().is_empty())
        .then_some(CompletionMessage { role: "system", content: CompletionContent::Text(request.system) });
    CompletionRequest {
        model: &sampling.model,
        messages: system.into_iter().chain(request.turns.iter().map(completion_message)).collect(),
        max_tokens: request.max_tokens,
        temperature: sampling.temperature,
    }
}

#[derive(Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    model: String,
    #[serde(default)]
    choices: Vec<Choice>,
    #[serde(default)]
    usage: CompletionUsage,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Deserialize, Default)]
struct CompletionUsage {
    #[serde(default)]
    prompt_tokens: u64,
    #[serde(default)]
    completion_tokens: u64,
}

fn parse_completion(body: &str) -> Result<ChatResponse, LlmError> {
    let reply: CompletionResponse = decode(body)?;
    let choice = reply
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| LlmError::Malformed("completion has no choices".into()))?;
    Ok(ChatResponse {
        text: choice.message.content.unwrap_or_default(),
        model: reply.model,
        truncated: choice.finish_reason.as_deref() == Some("length"),
        usage: TokenUsage { input: reply.usage.prompt_tokens, output: reply.usage.completion_tokens },
    })
}

// =============================================================================
// RESPONSES
// =============================================================================

#[derive(Serialize)]
struct ResponsesRequest<'a> {
    model: &'a str,
    instructions: &'a str,
    input: Vec<ResponsesInput<'a>>,
    max_output_tokens: u32,
    temperature: f32,
}

#[derive(Serialize)]
struct ResponsesInput<'a> {
    role: &'static str,
    content: ResponsesContent<'a>,
}

#[derive(Serialize)]
#[serde(untagged)]
enum ResponsesContent<'a> {
    Text(&'a str),
    Parts(Vec<ResponsesPart<'a>>),
}

#[derive(Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ResponsesPart<'a> {
    InputText { text: &'a str },
    InputImage { image_url: String },
}

fn responses_request<'a>(sampling: &'a Sampling, request: ChatRequest<'a>) -> ResponsesRequest<'a> {
    let input = request
        .turns
        .iter()
        .map(|turn| {
            let content = match &turn.image {
                None => ResponsesContent::Text(&turn.content),
                Some(image) => ResponsesContent::Parts(vec![
                    ResponsesPart::InputText { text: &turn.content },
                    ResponsesPart::InputImage { image_url: image.data_url() },
                ]),
            };
            ResponsesInput { role: turn.role.as_str(), content }
        })
        .collect();
    ResponsesRequest {
        model: &sampling.model,
        instructions: request.system,
        input,
        max_output_tokens: request.max_tokens,
        temperature: sampling.temperature,
    }
}

#[derive(Deserialize)]
struct ResponsesResponse {
    #[serde(default)]
    model: String,
    #[serde(default)]
    output: Vec<OutputItem>,
    /// Convenience field some gateways return instead of `output`.
    #[serde(default)]
    output_text: Option<String>,
    #[serde(default)]
    incomplete_details: Option<IncompleteDetails>,
    #[serde(default)]
    usage: ResponsesUsage,
}

#[derive(Deserialize)]
struct OutputItem {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    content: Vec<OutputPart>,
}

#[derive(Deserialize)]
struct OutputPart {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: String,
}

#[derive(Deserialize)]
struct IncompleteDetails {
    #[serde(default)]
    reason: Option<String>,
}

#[derive(Deserialize, Default)]
struct ResponsesUsage {
    #[serde(default)]
    input_tokens: u64,
    #[serde(default)]
    output_tokens: u64,
}

fn parse_responses(body: &str) -> Result<ChatResponse, LlmError> {
    let reply: ResponsesResponse = decode(body)?;
    let parts = reply
        .output
        .iter()
        .filter(|item| item.kind == "message")
        .flat_map(|item| &item.content)
        .filter(|part| part.kind == "output_text")
        .map(|part| part.text.as_str());
    let mut text = join_text(parts);
    if text.is_empty() {
        text = reply.output_text.unwrap_or_default();
    }
    Ok(ChatResponse {
        text,
        model: reply.model,
        truncated: reply
            .incomplete_details
            .and_then(|d| d.reason)
            .is_some_and(|reason| reason == "max_output_tokens"),
        usage: TokenUsage { input: reply.usage.input_tokens, output: reply.usage.output_tokens },
    })
}

#[cfg(test)]
#[path = "openai_test.rs"]
mod tests;
