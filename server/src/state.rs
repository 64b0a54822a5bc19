//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor. It
//! holds the database pool, the optional LLM client, the AI rate limiter and
//! the startup configuration. Nothing user-scoped lives here: per-user data
//! is read through RLS-scoped transactions.

use std::sync::Arc;

use sqlx::PgPool;
use uuid::Uuid;

use crate::config::ServerConfig;
use crate::llm::LlmChat;
use crate::rate_limit::RateLimiter;
use crate::services::ai::AiContext;

/// Shared application state. Clone is required by Axum; every field is
/// cheap to clone.
#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    /// Optional LLM client. `None` if LLM env vars are not configured.
    pub llm: Option<Arc<dyn LlmChat>>,
    /// In-memory rate limiter for AI requests.
    pub rate_limiter: RateLimiter,
    pub config: Arc<ServerConfig>,
}

impl AppState {
    #[must_use]
    pub fn new(pool: PgPool, llm: Option<Arc<dyn LlmChat>>, config: ServerConfig) -> Self {
        let rate_limiter = RateLimiter::new(config.rate_limit);
        Self { pool, llm, rate_limiter, config: Arc::new(config) }
    }

    /// AI call context for one authenticated user.
    #[must_use]
    pub fn ai_context(&self, user_id: Uuid) -> AiContext<'_> {
        AiContext {
            llm: self.llm.as_deref(),
            limiter: &self.rate_limiter,
            user_id,
            max_tokens: self.config.ai_max_tokens,
        }
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================

#[cfg(test)]
#[path = "state_helpers_test.rs"]
pub mod test_helpers;

#[cfg(test)]
#[path = "state_test.rs"]
mod tests;
