//! Email/password registration and login.
//!
//! DESIGN
//! ======
//! Credentials live in `users` (no row-level security); the display profile
//! lives in the RLS-protected `profiles` table and is written inside a
//! transaction acting as the new user. Passwords are stored as Argon2id PHC
//! strings (`$argon2id$v=19$...`), which carry their own salt and cost
//! parameters; `password_salt` keeps a copy of the salt.

use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use rand::Rng;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use models::{AuthResponse, LoginRequest, RegisterRequest, UserProfile};

use super::session::{SessionStore, SessionUser};
use crate::db;

pub const MIN_PASSWORD_LEN: usize = 6;
const SALT_BYTES: usize = 16;

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("{0}")]
    Invalid(String),
    #[error("email is already registered")]
    EmailTaken,
    #[error("invalid email or password")]
    InvalidCredentials,
    #[error("password hashing failed: {0}")]
    Hashing(argon2::password_hash::Error),
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl crate::error::ErrorCode for AuthError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Invalid(_) => "E_INVALID_INPUT",
            Self::EmailTaken => "E_EMAIL_TAKEN",
            Self::InvalidCredentials => "E_INVALID_CREDENTIALS",
            Self::Hashing(_) => "E_INTERNAL",
            Self::Database(_) => "E_DATABASE",
        }
    }
}

// =============================================================================
// VALIDATION
// =============================================================================

/// Trim and lowercase an email, requiring exactly one `@` with both sides
/// non-empty.
pub fn normalize_email(email: &str) -> Result<String, AuthError> {
    let normalized = email.trim().to_ascii_lowercase();
    let mut parts = normalized.split('@');
    let valid = matches!(
        (parts.next(), parts.next(), parts.next()),
        (Some(local), Some(domain), None) if !local.is_empty() && !domain.is_empty()
    );
    if !valid {
        return Err(AuthError::Invalid("invalid email address".into()));
    }
    Ok(normalized)
}

fn check_password(password: &str) -> Result<(), AuthError> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(AuthError::Invalid(format!("password must be at least {MIN_PASSWORD_LEN} characters")));
    }
    Ok(())
}

/// Display name, defaulting to the email's local part when left blank.
fn display_name(name: &str, email: &str) -> String {
    let trimmed = name.trim();
    if !trimmed.is_empty() {
        return trimmed.to_owned();
    }
    email
        .split('@')
        .next()
        .filter(|v| !v.is_empty())
        .unwrap_or("user")
        .to_owned()
}

// =============================================================================
// PASSWORD HASHING
// =============================================================================

/// Fresh random salt in the PHC base64 alphabet.
pub fn generate_salt() -> Result<SaltString, AuthError> {
    let bytes: [u8; SALT_BYTES] = rand::rng().random();
    SaltString::encode_b64(&bytes).map_err(AuthError::Hashing)
}

/// Argon2id (default parameters) PHC string for `password`.
pub fn hash_password(salt: &SaltString, password: &str) -> Result<String, AuthError> {
    Argon2::default()
        .hash_password(password.as_bytes(), salt)
        .map(|hash| hash.to_string())
        .map_err(AuthError::Hashing)
}

/// Check `password` against a stored PHC string. Unparsable hashes never
/// verify.
#[must_use]
pub fn verify_password(password: &str, stored_hash: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(stored_hash) else {
        return false;
    };
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}

// =============================================================================
// FLOWS
// =============================================================================

/// Create credentials and profile, then open a session.
pub async fn register(pool: &PgPool, req: &RegisterRequest, ttl_hours: i64) -> Result<AuthResponse, AuthError> {
    let email = normalize_email(&req.email)?;
    check_password(&req.password)?;
    let name = display_name(&req.name, &email);
    let salt = generate_salt()?;
    let hash = hash_password(&salt, &req.password)?;

    let mut tx = pool.begin().await?;
    let row = sqlx::query(
        r"INSERT INTO users (email, password_salt, password_hash)
          VALUES ($1, $2, $3)
          ON CONFLICT (email) DO NOTHING
          RETURNING id",
    )
    .bind(&email)
    .bind(salt.as_str())
    .bind(&hash)
    .fetch_optional(&mut *tx)
    .await?;
    let Some(row) = row else {
        return Err(AuthError::EmailTaken);
    };
    let user_id: Uuid = row.get("id");

    db::act_as(&mut tx, user_id).await?;
    sqlx::query("INSERT INTO profiles (id, name, email) VALUES ($1, $2, $3)")
        .bind(user_id)
        .bind(&name)
        .bind(&email)
        .execute(&mut *tx)
        .await?;
    tx.commit().await?;

    let token = SessionStore::new(pool).issue(user_id, ttl_hours).await?.into_string();
    tracing::info!(%user_id, "user registered");
    Ok(AuthResponse { token, user: UserProfile { id: user_id, email, name } })
}

/// Verify credentials and open a session.
pub async fn login(pool: &PgPool, req: &LoginRequest, ttl_hours: i64) -> Result<AuthResponse, AuthError> {
    let email = normalize_email(&req.email).map_err(|_| AuthError::InvalidCredentials)?;
    let row = sqlx::query("SELECT id, password_hash FROM users WHERE email = $1")
        .bind(&email)
        .fetch_optional(pool)
        .await?
        .ok_or(AuthError::InvalidCredentials)?;

    let hash: String = row.get("password_hash");
    if !verify_password(&req.password, &hash) {
        return Err(AuthError::InvalidCredentials);
    }

    let user = SessionUser { id: row.get("id"), email };
    let profile = load_profile(pool, &user).await?;
    let token = SessionStore::new(pool).issue(user.id, ttl_hours).await?.into_string();
    tracing::info!(user_id = %user.id, "user logged in");
    Ok(AuthResponse { token, user: profile })
}

/// Read the caller's profile row, falling back to the email's local part
/// when no profile exists.
pub async fn load_profile(pool: &PgPool, user: &SessionUser) -> Result<UserProfile, AuthError> {
    let mut tx = db::begin_for_user(pool, user.id).await?;
    let name: Option<String> = sqlx::query_scalar("SELECT name FROM profiles WHERE id = $1")
        .bind(user.id)
        .fetch_optional(&mut *tx)
        .await?;
    tx.commit().await?;
    Ok(UserProfile {
        id: user.id,
        email: user.email.clone(),
        name: name.unwrap_or_else(|| display_name("", &user.email)),
    })
}

#[cfg(test)]
#[path = "auth_test.rs"]
mod tests;
