//! Bearer sessions for the pantry API.
//!
//! ARCHITECTURE
//! ============
//! Login and registration call [`SessionStore::issue`], which stores the
//! SHA-256 digest of a fresh [`SessionToken`] in `sessions` with an expiry.
//! The token itself is only ever held by the client. Requests present the token
//! as `Authorization: Bearer` or as the `session_token` cookie and resolve it
//! through [`SessionStore::resolve`]. Tokens that are not 64 lowercase hex
//! characters are rejected without a database round trip.

use std::fmt;
use std::time::Duration;

use rand::Rng;
use sha2::{Digest, Sha256};
use sqlx::PgPool;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};
use uuid::Uuid;

const TOKEN_BYTES: usize = 32;

/// Lowercase hex encoding used for tokens and their digests.
pub(crate) fn hex(bytes: &[u8]) -> String {
    const DIGITS: &[u8; 16] = b"0123456789abcdef";
    bytes
        .iter()
        .flat_map(|b| [DIGITS[usize::from(b >> 4)], DIGITS[usize::from(b & 0x0f)]])
        .map(char::from)
        .collect()
}

// =============================================================================
// TOKEN
// =============================================================================

/// Opaque session credential: 32 random bytes rendered as 64 hex chars.
#[derive(Clone, PartialEq, Eq)]
pub struct SessionToken(String);

impl SessionToken {
    /// Draw a new token from the thread-local CSPRNG.
    #[must_use]
    pub fn generate() -> Self {
        let bytes: [u8; TOKEN_BYTES] = rand::rng().random();
        Self(hex(&bytes))
    }

    /// Accept `raw` only if it has the shape [`generate`](Self::generate) produces.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let well_formed = raw.len() == TOKEN_BYTES * 2
            && raw.bytes().all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b));
        well_formed.then(|| Self(raw.to_owned()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }

    /// Key of this token's row in `sessions`.
    #[must_use]
    pub fn digest(&self) -> String {
        hex(&Sha256::digest(self.0.as_bytes()))
    }
}

// Keep credentials out of logs.
impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SessionToken({}…)", &self.0[..8])
    }
}

/// Account bound to a live session.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct SessionUser {
    pub id: Uuid,
    pub email: String,
}

// =============================================================================
// STORE
// =============================================================================

/// `sessions` table access. Borrowed per call; the pool is the shared handle.
#[derive(Clone, Copy)]
pub struct SessionStore<'a> {
    pool: &'a PgPool,
}

impl<'a> SessionStore<'a> {
    #[must_use]
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Open a session for `user_id` that expires after `ttl_hours`.
    pub async fn issue(&self, user_id: Uuid, ttl_hours: i64) -> Result<SessionToken, sqlx::Error> {
        let token = SessionToken::generate();
        let ttl = i32::try_from(ttl_hours.max(1)).unwrap_or(i32::MAX);
        sqlx::query(
            "INSERT INTO sessions (token, user_id, expires_at) \
             VALUES ($1, $2, now() + make_interval(hours => $3))",
        )
        .bind(token.digest())
        .bind(user_id)
        .bind(ttl)
        .execute(self.pool)
        .await?;
        debug!(%user_id, ttl_hours = ttl, "session issued");
        Ok(token)
    }

    /// Look up the unexpired session for `raw`. Malformed tokens resolve to `None`.
    pub async fn resolve(&self, raw: &str) -> Result<Option<SessionUser>, sqlx::Error> {
        let Some(token) = SessionToken::parse(raw) else {
            return Ok(None);
        };
        sqlx::query_as::<_, SessionUser>(
            "SELECT u.id, u.email FROM sessions s JOIN users u ON u.id = s.user_id \
             WHERE s.token = $1 AND s.expires_at > now()",
        )
        .bind(token.digest())
        .fetch_optional(self.pool)
        .await
    }

    /// End the session for `raw`. Returns whether a row was removed.
    pub async fn revoke(&self, raw: &str) -> Result<bool, sqlx::Error> {
        let Some(token) = SessionToken::parse(raw) else {
            return Ok(false);
        };
        let done = sqlx::query("DELETE FROM sessions WHERE token = $1")
            .bind(token.digest())
            .execute(self.pool)
            .await?;
        Ok(done.rows_affected() > 0)
    }

    /// Remove every expired session. Returns the number removed.
    pub async fn purge_expired(&self) -> Result<u64, sqlx::Error> {
        let done = sqlx::query("DELETE FROM sessions WHERE expires_at <= now()")
            .execute(self.pool)
            .await?;
        Ok(done.rows_affected())
    }
}

/// Background sweep of expired sessions, one pass per `every`.
pub fn spawn_purge_task(pool: PgPool, every: Duration) -> JoinHandle<()> {
    info!(interval_secs = every.as_secs(), "session purge scheduled");
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(every);
        loop {
            ticker.tick().await;
            match SessionStore::new(&pool).purge_expired().await {
                Ok(0) => {}
                Ok(removed) => info!(removed, "expired sessions purged"),
                Err(e) => warn!(error = %e, "session purge failed"),
            }
        }
    })
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;
