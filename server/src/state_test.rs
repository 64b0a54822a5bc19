use super::*;
use crate::llm::types::{ChatRequest, ChatResponse, LlmError};

struct NullLlm;

#[async_trait::async_trait]
impl LlmChat for NullLlm {
    async fn chat(&self, _request: ChatRequest<'_>) -> Result<ChatResponse, LlmError> {
        Err(LlmError::Transport("offline".into()))
    }
}

#[tokio::test]
async fn ai_context_without_llm() {
    let state = test_helpers::test_app_state();
    let user_id = Uuid::new_v4();
    let ctx = state.ai_context(user_id);
    assert!(ctx.llm.is_none());
    assert_eq!(ctx.user_id, user_id);
    assert_eq!(ctx.max_tokens, state.config.ai_max_tokens);
}

#[tokio::test]
async fn ai_context_borrows_configured_llm() {
    let state = test_helpers::test_app_state_with_llm(Arc::new(NullLlm));
    assert!(state.ai_context(Uuid::new_v4()).llm.is_some());
}

#[tokio::test]
async fn clones_share_rate_limiter() {
    let state = test_helpers::test_app_state();
    let clone = state.clone();
    let user_id = Uuid::new_v4();
    for _ in 0..10 {
        state.rate_limiter.check_and_record(user_id).unwrap();
    }
    assert!(clone.rate_limiter.check_and_record(user_id).is_err());
}
