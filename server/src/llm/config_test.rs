use std::collections::HashMap;

use super::*;

fn config(pairs: &[(&str, &str)]) -> Result<LlmConfig, LlmError> {
    let env: HashMap<String, String> = pairs.iter().map(|(k, v)| ((*k).to_owned(), (*v).to_owned())).collect();
    LlmConfig::from_lookup(move |key| env.get(key).cloned())
}

const KEY: [(&str, &str); 2] = [("LLM_API_KEY_ENV", "OPENAI_API_KEY"), ("OPENAI_API_KEY", "sk-test")];

#[test]
fn defaults_match_the_recipe_assistant() {
    let cfg = config(&KEY).unwrap();
    assert_eq!(cfg.provider, Provider::OpenAi);
    assert_eq!(cfg.model, "gpt-4o-mini");
    assert!((cfg.temperature - DEFAULT_TEMPERATURE).abs() < f32::EPSILON);
    assert_eq!(cfg.openai_endpoint, OpenAiEndpoint::ChatCompletions);
    assert_eq!(cfg.openai_base_url, DEFAULT_OPENAI_BASE_URL);
    assert_eq!(cfg.timeouts, Timeouts::default());
    assert_eq!(cfg.api_key, "sk-test");
}

#[test]
fn overrides_are_trimmed_and_applied() {
    let mut pairs = KEY.to_vec();
    pairs.extend([
        ("LLM_OPENAI_MODE", " responses "),
        ("LLM_OPENAI_BASE_URL", "https://gateway.test/v1/"),
        ("LLM_TEMPERATURE", "0.2"),
        ("LLM_REQUEST_TIMEOUT_SECS", "42"),
        ("LLM_CONNECT_TIMEOUT_SECS", "7"),
    ]);
    let cfg = config(&pairs).unwrap();
    assert_eq!(cfg.openai_endpoint, OpenAiEndpoint::Responses);
    assert_eq!(cfg.openai_base_url, "https://gateway.test/v1");
    assert!((cfg.temperature - 0.2).abs() < f32::EPSILON);
    assert_eq!(cfg.timeouts, Timeouts { request_secs: 42, connect_secs: 7 });
}

#[test]
fn anthropic_gets_its_own_default_model() {
    let cfg = config(&[("LLM_PROVIDER", "anthropic"), ("LLM_API_KEY_ENV", "K"), ("K", "v")]).unwrap();
    assert_eq!(cfg.provider, Provider::Anthropic);
    assert!(cfg.model.starts_with("claude"));

    let cfg = config(&[("LLM_PROVIDER", "anthropic"), ("LLM_API_KEY_ENV", "K"), ("K", "v"), ("LLM_MODEL", "claude-x")])
        .unwrap();
    assert_eq!(cfg.model, "claude-x");
}

#[test]
fn missing_pointer_variable_is_reported() {
    let err = config(&[]).unwrap_err();
    assert!(matches!(err, LlmError::MissingKey { ref var } if var == "LLM_API_KEY_ENV"));
}

#[test]
fn blank_key_value_is_reported_by_name() {
    let err = config(&[("LLM_API_KEY_ENV", "ANTHROPIC_API_KEY"), ("ANTHROPIC_API_KEY", "  ")]).unwrap_err();
    assert!(matches!(err, LlmError::MissingKey { ref var } if var == "ANTHROPIC_API_KEY"));
}

#[test]
fn unknown_provider_and_mode_are_rejected() {
    let mut pairs = KEY.to_vec();
    pairs.push(("LLM_PROVIDER", "gemini"));
    assert!(config(&pairs).unwrap_err().to_string().contains("LLM_PROVIDER"));

    let mut pairs = KEY.to_vec();
    pairs.push(("LLM_OPENAI_MODE", "assistants"));
    assert!(config(&pairs).unwrap_err().to_string().contains("LLM_OPENAI_MODE"));
}

#[test]
fn out_of_range_temperature_is_rejected() {
    for raw in ["3", "-0.1", "warm"] {
        let mut pairs = KEY.to_vec();
        pairs.push(("LLM_TEMPERATURE", raw));
        assert!(matches!(config(&pairs), Err(LlmError::Config(_))), "{raw}");
    }
}

#[test]
fn unparsable_timeouts_fall_back() {
    let mut pairs = KEY.to_vec();
    pairs.push(("LLM_REQUEST_TIMEOUT_SECS", "soon"));
    assert_eq!(config(&pairs).unwrap().timeouts.request_secs, Timeouts::default().request_secs);
}
