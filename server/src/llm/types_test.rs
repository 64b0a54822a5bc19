use super::*;
use crate::error::ErrorCode;

#[test]
fn error_codes_name_the_llm_layer() {
    let cases = [
        (LlmError::Config("bad".into()), "E_LLM_CONFIG"),
        (LlmError::MissingKey { var: "KEY".into() }, "E_LLM_MISSING_KEY"),
        (LlmError::Transport("timeout".into()), "E_LLM_TRANSPORT"),
        (LlmError::Upstream { status: 500, body: "oops".into() }, "E_LLM_UPSTREAM"),
        (LlmError::Malformed("json".into()), "E_LLM_MALFORMED"),
    ];
    for (err, code) in cases {
        assert_eq!(err.error_code(), code, "{err}");
    }
}

#[test]
fn throttling_timeouts_and_outages_are_retryable() {
    assert!(LlmError::Transport("conn refused".into()).retryable());
    for status in [408, 429, 500, 503] {
        assert!(LlmError::Upstream { status, body: String::new() }.retryable(), "status {status}");
    }
}

#[test]
fn caller_mistakes_are_not_retryable() {
    for status in [400, 401, 404] {
        assert!(!LlmError::Upstream { status, body: String::new() }.retryable(), "status {status}");
    }
    assert!(!LlmError::Malformed("x".into()).retryable());
    assert!(!LlmError::MissingKey { var: "K".into() }.retryable());
}

#[test]
fn image_turn_carries_data_url() {
    let image = InlineImage { mime_type: "image/png".into(), base64: "iVBORw0K".into() };
    let turn = ChatTurn::user_with_image("무엇이 보이나요?", image);
    assert_eq!(turn.role.as_str(), "user");
    assert_eq!(turn.image.unwrap().data_url(), "data:image/png;base64,iVBORw0K");
    assert_eq!(ChatTurn::user("hi").image, None);
}

#[test]
fn join_text_skips_empty_parts() {
    assert_eq!(join_text(["첫째", "", "둘째"]), "첫째\n둘째");
    assert_eq!(join_text([]), "");
}

#[test]
fn usage_total_saturates() {
    assert_eq!(TokenUsage { input: 7, output: 5 }.total(), 12);
    assert_eq!(TokenUsage { input: u64::MAX, output: 1 }.total(), u64::MAX);
}
