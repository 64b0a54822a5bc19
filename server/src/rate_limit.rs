//! In-memory admission control for AI requests.
//!
//! DESIGN
//! ======
//! Every limit is a sliding [`Window`] of weighted events. A request is an
//! event of weight one; token usage and in-flight reservations carry their
//! token counts. Defaults:
//! - 10 AI requests per user per 60 s
//! - 30 LLM calls across all users per 60 s
//! - 50 000 tokens per user per hour
//!
//! Token reservations are taken before the LLM call and settled against the
//! real usage afterwards, so concurrent calls from one user cannot overspend.
//! State is process-local and resets on restart. Users whose windows have
//! all emptied are dropped from the ledger.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::{Duration, Instant};

use uuid::Uuid;

use crate::config::EnvReader;

const DEFAULT_PER_USER_LIMIT: u64 = 10;
const DEFAULT_PER_USER_WINDOW_SECS: u64 = 60;
const DEFAULT_GLOBAL_LIMIT: u64 = 30;
const DEFAULT_GLOBAL_WINDOW_SECS: u64 = 60;
const DEFAULT_TOKEN_BUDGET: u64 = 50_000;
const DEFAULT_TOKEN_WINDOW_SECS: u64 = 3600;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitConfig {
    pub per_user_limit: u64,
    pub per_user_window: Duration,
    pub global_limit: u64,
    pub global_window: Duration,
    pub token_budget: u64,
    pub token_window: Duration,
}

impl RateLimitConfig {
    /// Read the `RATE_LIMIT_*` variables, keeping defaults for anything unset.
    pub fn from_reader<F>(env: &EnvReader<F>) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            per_user_limit: env.parse_or("RATE_LIMIT_PER_USER", DEFAULT_PER_USER_LIMIT),
            per_user_window: env.secs_or("RATE_LIMIT_PER_USER_WINDOW_SECS", DEFAULT_PER_USER_WINDOW_SECS),
            global_limit: env.parse_or("RATE_LIMIT_GLOBAL", DEFAULT_GLOBAL_LIMIT),
            global_window: env.secs_or("RATE_LIMIT_GLOBAL_WINDOW_SECS", DEFAULT_GLOBAL_WINDOW_SECS),
            token_budget: env.parse_or("RATE_LIMIT_TOKEN_BUDGET", DEFAULT_TOKEN_BUDGET),
            token_window: env.secs_or("RATE_LIMIT_TOKEN_WINDOW_SECS", DEFAULT_TOKEN_WINDOW_SECS),
        }
    }
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            per_user_limit: DEFAULT_PER_USER_LIMIT,
            per_user_window: Duration::from_secs(DEFAULT_PER_USER_WINDOW_SECS),
            global_limit: DEFAULT_GLOBAL_LIMIT,
            global_window: Duration::from_secs(DEFAULT_GLOBAL_WINDOW_SECS),
            token_budget: DEFAULT_TOKEN_BUDGET,
            token_window: Duration::from_secs(DEFAULT_TOKEN_WINDOW_SECS),
        }
    }
}

// =============================================================================
// ERROR TYPE
// =============================================================================

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum RateLimitError {
    #[error("too many AI requests: at most {limit} per {window_secs}s")]
    User { limit: u64, window_secs: u64 },
    #[error("AI service is busy: at most {limit} calls per {window_secs}s")]
    Global { limit: u64, window_secs: u64 },
    #[error("AI token budget used up: {budget} tokens per {window_secs}s")]
    Tokens { budget: u64, window_secs: u64 },
}

impl crate::error::ErrorCode for RateLimitError {
    fn error_code(&self) -> &'static str {
        "E_RATE_LIMITED"
    }

    fn retryable(&self) -> bool {
        true
    }
}

// =============================================================================
// WINDOW
// =============================================================================

/// Weighted events younger than `span`.
#[derive(Debug)]
struct Window {
    span: Duration,
    events: VecDeque<(Instant, u64)>,
}

impl Window {
    fn new(span: Duration) -> Self {
        Self { span, events: VecDeque::new() }
    }

    fn expire(&mut self, now: Instant) {
        while self
            .events
            .front()
            .is_some_and(|&(at, _)| now.saturating_duration_since(at) > self.span)
        {
            self.events.pop_front();
        }
    }

    fn total(&mut self, now: Instant) -> u64 {
        self.expire(now);
        self.events.iter().map(|&(_, weight)| weight).sum()
    }

    fn is_empty(&mut self, now: Instant) -> bool {
        self.expire(now);
        self.events.is_empty()
    }

    fn push(&mut self, now: Instant, weight: u64) {
        self.events.push_back((now, weight));
    }

    /// Remove `amount` of weight, oldest first.
    fn drain(&mut self, mut amount: u64) {
        while amount > 0 {
            let Some((_, weight)) = self.events.front_mut() else {
                return;
            };
            if *weight > amount {
                *weight -= amount;
                return;
            }
            amount -= *weight;
            self.events.pop_front();
        }
    }
}

/// One user's windows.
#[derive(Debug)]
struct UserWindows {
    requests: Window,
    spent: Window,
    held: Window,
}

impl UserWindows {
    fn new(config: &RateLimitConfig) -> Self {
        Self {
            requests: Window::new(config.per_user_window),
            spent: Window::new(config.token_window),
            held: Window::new(config.token_window),
        }
    }

    fn is_idle(&mut self, now: Instant) -> bool {
        self.requests.is_empty(now) && self.spent.is_empty(now) && self.held.is_empty(now)
    }
}

#[derive(Debug)]
struct Ledger {
    calls: Window,
    users: HashMap<Uuid, UserWindows>,
}

// =============================================================================
// RATE LIMITER
// =============================================================================

/// Shared limiter; clones observe the same counters.
#[derive(Clone)]
pub struct RateLimiter {
    ledger: Arc<Mutex<Ledger>>,
    config: RateLimitConfig,
}

impl RateLimiter {
    #[must_use]
    pub fn new(config: RateLimitConfig) -> Self {
        let ledger = Ledger { calls: Window::new(config.global_window), users: HashMap::new() };
        Self { ledger: Arc::new(Mutex::new(ledger)), config }
    }

    /// Run `f` on `user_id`'s windows, then drop every idle user.
    fn with_user<T>(
        &self,
        user_id: Uuid,
        now: Instant,
        f: impl FnOnce(&mut Window, &mut UserWindows) -> T,
    ) -> T {
        let mut ledger = self.ledger.lock().unwrap_or_else(PoisonError::into_inner);
        let Ledger { calls, users } = &mut *ledger;
        let user = users
            .entry(user_id)
            .or_insert_with(|| UserWindows::new(&self.config));
        let out = f(calls, user);
        users.retain(|_, windows| !windows.is_idle(now));
        out
    }

    #[cfg(test)]
    fn tracked_users(&self) -> usize {
        self.ledger.lock().unwrap_or_else(PoisonError::into_inner).users.len()
    }

    /// Admit one AI request for `user_id`, counting it against both request
    /// limits. A rejected request is not counted.
    pub fn check_and_record(&self, user_id: Uuid) -> Result<(), RateLimitError> {
        self.admit_at(user_id, Instant::now())
    }

    fn admit_at(&self, user_id: Uuid, now: Instant) -> Result<(), RateLimitError> {
        let cfg = self.config;
        self.with_user(user_id, now, |calls, user| {
            if calls.total(now) >= cfg.global_limit {
                return Err(RateLimitError::Global { limit: cfg.global_limit, window_secs: cfg.global_window.as_secs() });
            }
            if user.requests.total(now) >= cfg.per_user_limit {
                return Err(RateLimitError::User {
                    limit: cfg.per_user_limit,
                    window_secs: cfg.per_user_window.as_secs(),
                });
            }
            calls.push(now, 1);
            user.requests.push(now, 1);
            Ok(())
        })
    }

    /// Hold `amount` tokens of the user's budget for an upcoming call.
    ///
    /// Holding zero tokens only checks that some budget is left.
    pub fn reserve_tokens(&self, user_id: Uuid, amount: u64) -> Result<(), RateLimitError> {
        self.reserve_at(user_id, amount, Instant::now())
    }

    fn reserve_at(&self, user_id: Uuid, amount: u64, now: Instant) -> Result<(), RateLimitError> {
        let cfg = self.config;
        let exhausted = RateLimitError::Tokens { budget: cfg.token_budget, window_secs: cfg.token_window.as_secs() };
        self.with_user(user_id, now, |_, user| {
            let committed = user.spent.total(now).saturating_add(user.held.total(now));
            if committed >= cfg.token_budget || committed.saturating_add(amount) > cfg.token_budget {
                return Err(exhausted);
            }
            if amount > 0 {
                user.held.push(now, amount);
            }
            Ok(())
        })
    }

    /// Replace a `reserved` hold with the `used` token count.
    pub fn record_tokens(&self, user_id: Uuid, used: u64, reserved: u64) {
        self.settle_at(user_id, used, reserved, Instant::now());
    }

    fn settle_at(&self, user_id: Uuid, used: u64, reserved: u64, now: Instant) {
        self.with_user(user_id, now, |_, user| {
            user.held.expire(now);
            user.held.drain(reserved);
            user.spent.expire(now);
            user.spent.push(now, used);
        });
    }

    /// Drop a `reserved` hold after a failed call.
    pub fn release_tokens(&self, user_id: Uuid, reserved: u64) {
        self.with_user(user_id, Instant::now(), |_, user| user.held.drain(reserved));
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new(RateLimitConfig::default())
    }
}

#[cfg(test)]
#[path = "rate_limit_test.rs"]
mod tests;
