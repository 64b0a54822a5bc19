use super::*;
use crate::llm::types::InlineImage;
use serde_json::json;

fn sampling() -> Sampling {
    Sampling { model: "gpt-4o-mini".into(), temperature: 0.7 }
}

// =============================================================================
// Chat completions
// =============================================================================

#[test]
fn completion_reply_is_parsed() {
    let body = json!({
        "model": "gpt-4o-mini-2024-07-18",
        "choices": [{ "index": 0, "message": { "role": "assistant", "content": "두부조림 어떠세요?" }, "finish_reason": "stop" }],
        "usage": { "prompt_tokens": 40, "completion_tokens": 12, "total_tokens": 52 }
    })
    .to_string();
    let resp = parse_completion(&body).unwrap();
    assert_eq!(resp.text, "두부조림 어떠세요?");
    assert_eq!(resp.model, "gpt-4o-mini-2024-07-18");
    assert!(!resp.truncated);
    assert_eq!(resp.usage.total(), 52);
}

#[test]
fn length_finish_marks_truncation() {
    let body = json!({ "choices": [{ "message": { "content": "[{" }, "finish_reason": "length" }] }).to_string();
    assert!(parse_completion(&body).unwrap().truncated);
}

#[test]
fn null_content_is_empty_text() {
    let body = json!({ "choices": [{ "message": { "content": null } }] }).to_string();
    assert_eq!(parse_completion(&body).unwrap().text, "");
}

#[test]
fn no_choices_is_malformed() {
    let body = json!({ "choices": [] }).to_string();
    assert!(matches!(parse_completion(&body), Err(LlmError::Malformed(_))));
}

#[test]
fn completion_request_leads_with_system_message() {
    let turns = [ChatTurn::user("우유 1개")];
    let sampling = sampling();
    let request = ChatRequest { system: "영양사", turns: &turns, max_tokens: 200 };
    let json = serde_json::to_value(completion_request(&sampling, request)).unwrap();
    assert_eq!(json["messages"][0], json!({ "role": "system", "content": "영양사" }));
    assert_eq!(json["messages"][1], json!({ "role": "user", "content": "우유 1개" }));
    assert_eq!(json["max_tokens"], 200);
    assert_eq!(json["model"], "gpt-4o-mini");
}

#[test]
fn blank_system_prompt_is_omitted() {
    let turns = [ChatTurn::user("hi")];
    let sampling = sampling();
    let request = ChatRequest { system: "  ", turns: &turns, max_tokens: 10 };
    let json = serde_json::to_value(completion_request(&sampling, request)).unwrap();
    assert_eq!(json["messages"].as_array().unwrap().len(), 1);
}

#[test]
fn image_turn_becomes_text_and_image_parts() {
    let image = InlineImage { mime_type: "image/jpeg".into(), base64: "/9j/4AAQ".into() };
    let turns = [ChatTurn::user_with_image("재료를 알려줘", image)];
    let sampling = sampling();
    let request = ChatRequest { system: "", turns: &turns, max_tokens: 500 };
    let json = serde_json::to_value(completion_request(&sampling, request)).unwrap();
    assert_eq!(
        json["messages"][0]["content"],
        json!([
            { "type": "text", "text": "재료를 알려줘" },
            { "type": "image_url", "image_url": { "url": "data:image/jpeg;base64,/9j/4AAQ" } }
        ])
    );
}

// =============================================================================
// Responses
// =============================================================================

#[test]
fn responses_output_text_parts_are_joined() {
    let body = json!({
        "model": "gpt-4o-mini",
        "output": [
            { "type": "reasoning", "content": [] },
            { "type": "message", "content": [
                { "type": "output_text", "text": "양파" },
                { "type": "refusal", "text": "no" },
                { "type": "output_text", "text": "감자" }
            ]}
        ],
        "usage": { "input_tokens": 9, "output_tokens": 3 }
    })
    .to_string();
    let resp = parse_responses(&body).unwrap();
    assert_eq!(resp.text, "양파\n감자");
    assert_eq!(resp.usage, TokenUsage { input: 9, output: 3 });
}

#[test]
fn responses_fall_back_to_output_text() {
    let body = json!({ "output_text": "간단 요약" }).to_string();
    assert_eq!(parse_responses(&body).unwrap().text, "간단 요약");
}

#[test]
fn responses_incomplete_marks_truncation() {
    let body = json!({ "output": [], "incomplete_details": { "reason": "max_output_tokens" } }).to_string();
    assert!(parse_responses(&body).unwrap().truncated);
}

#[test]
fn responses_request_maps_turns_to_input_parts() {
    let image = InlineImage { mime_type: "image/png".into(), base64: "AAAA".into() };
    let turns = [ChatTurn::user("안녕"), ChatTurn::user_with_image("이건?", image)];
    let sampling = sampling();
    let request = ChatRequest { system: "요리사", turns: &turns, max_tokens: 100 };
    let json = serde_json::to_value(responses_request(&sampling, request)).unwrap();
    assert_eq!(json["instructions"], "요리사");
    assert_eq!(json["input"][0], json!({ "role": "user", "content": "안녕" }));
    assert_eq!(json["input"][1]["content"][0], json!({ "type": "input_text", "text": "이건?" }));
    assert_eq!(json["input"][1]["content"][1], json!({ "type": "input_image", "image_url": "data:image/png;base64,AAAA" }));
}
