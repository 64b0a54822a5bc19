use super::*;
use crate::llm::types::InlineImage;
use serde_json::json;

fn reply(content: serde_json::Value, stop_reason: &str) -> String {
    json!({
        "id": "msg_01",
        "type": "message",
        "role": "assistant",
        "content": content,
        "model": "claude-3-5-haiku-latest",
        "stop_reason": stop_reason,
        "usage": { "input_tokens": 120, "output_tokens": 80 }
    })
    .to_string()
}

#[test]
fn text_blocks_become_reply_text() {
    let body = reply(json!([{ "type": "text", "text": "김치볶음밥을 추천합니다" }]), "end_turn");
    let resp = parse_messages(&body).unwrap();
    assert_eq!(resp.text, "김치볶음밥을 추천합니다");
    assert_eq!(resp.model, "claude-3-5-haiku-latest");
    assert!(!resp.truncated);
    assert_eq!(resp.usage, TokenUsage { input: 120, output: 80 });
}

#[test]
fn non_text_blocks_are_ignored() {
    let body = reply(
        json!([
            { "type": "thinking", "thinking": "재료를 확인하자" },
            { "type": "text", "text": "1. 된장찌개" },
            { "type": "text", "text": "2. 계란말이" }
        ]),
        "end_turn",
    );
    assert_eq!(parse_messages(&body).unwrap().text, "1. 된장찌개\n2. 계란말이");
}

#[test]
fn max_tokens_stop_marks_truncation() {
    let body = reply(json!([{ "type": "text", "text": "[{\"name\":" }]), "max_tokens");
    assert!(parse_messages(&body).unwrap().truncated);
}

#[test]
fn missing_usage_counts_as_zero() {
    let body = json!({ "content": [], "model": "m" }).to_string();
    let resp = parse_messages(&body).unwrap();
    assert_eq!(resp.usage.total(), 0);
    assert!(resp.text.is_empty());
}

#[test]
fn garbage_body_is_malformed() {
    assert!(matches!(parse_messages("<html>"), Err(LlmError::Malformed(_))));
}

#[test]
fn request_body_carries_system_and_temperature() {
    let turns = [ChatTurn::user("양파 2개")];
    let body = MessagesRequest {
        model: "m",
        max_tokens: 300,
        temperature: 0.7,
        system: "요리사",
        messages: turns.iter().map(message).collect(),
    };
    let json = serde_json::to_value(&body).unwrap();
    assert_eq!(json["system"], "요리사");
    assert_eq!(json["max_tokens"], 300);
    assert_eq!(json["messages"][0], serde_json::json!({ "role": "user", "content": "양파 2개" }));
    assert!((json["temperature"].as_f64().unwrap() - 0.7).abs() < 1e-6);
}

#[test]
fn image_turn_sends_base64_block_before_text() {
    let image = InlineImage { mime_type: "image/jpeg".into(), base64: "/9j/".into() };
    let turn = ChatTurn::user_with_image("무슨 재료?", image);
    let json = serde_json::to_value(message(&turn)).unwrap();
    assert_eq!(
        json["content"],
        serde_json::json!([
            { "type": "image", "source": { "type": "base64", "media_type": "image/jpeg", "data": "/9j/" } },
            { "type": "text", "text": "무슨 재료?" }
        ])
    );
}
