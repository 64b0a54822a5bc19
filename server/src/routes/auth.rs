//! Auth routes: email/password registration, login, session management.

use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRef, State};
use axum::http::header::AUTHORIZATION;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Json};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use models::{AuthResponse, LoginRequest, RegisterRequest, UserProfile};
use time::Duration;

use crate::error::ApiError;
use crate::services::{auth as auth_svc, session};
use crate::state::AppState;

pub(crate) const COOKIE_NAME: &str = "session_token";

// =============================================================================
// AUTH EXTRACTOR
// =============================================================================

/// Authenticated user extracted from the bearer token or session cookie.
/// Use as a handler parameter to require authentication.
pub struct AuthUser {
    pub user: session::SessionUser,
    pub token: String,
}

impl<S> axum::extract::FromRequestParts<S> for AuthUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut axum::http::request::Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Some(token) = session_token(&parts.headers) else {
            return Err(ApiError::unauthorized());
        };

        let app_state = AppState::from_ref(state);
        let user = session::SessionStore::new(&app_state.pool)
            .resolve(&token)
            .await
            .map_err(|e| ApiError::internal(&e))?
            .ok_or_else(ApiError::unauthorized)?;

        Ok(Self { user, token })
    }
}

/// Token from `Authorization: Bearer …`, falling back to the session cookie.
pub(crate) fn session_token(headers: &HeaderMap) -> Option<String> {
    let bearer = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty());
    if let Some(token) = bearer {
        return Some(token.to_owned());
    }

    let jar = CookieJar::from_headers(headers);
    jar.get(COOKIE_NAME)
        .map(Cookie::value)
        .filter(|t| !t.is_empty())
        .map(str::to_owned)
}

fn session_cookie(token: String, secure: bool, max_age: Duration) -> Cookie<'static> {
    Cookie::build((COOKIE_NAME, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .max_age(max_age)
        .build()
}

// =============================================================================
// HANDLERS
// =============================================================================

/// `POST /api/auth/register` — create an account and start a session.
pub async fn register(
    State(state): State<AppState>,
    jar: CookieJar,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(req) = payload?;
    let ttl = state.config.session_ttl_hours;
    let response = auth_svc::register(&state.pool, &req, ttl).await?;
    tracing::info!(user_id = %response.user.id, "user registered");

    let cookie = session_cookie(response.token.clone(), state.config.cookie_secure, Duration::hours(ttl));
    Ok((StatusCode::CREATED, jar.add(cookie), Json(response)))
}

/// `POST /api/auth/login` — verify credentials and start a session.
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<(CookieJar, Json<AuthResponse>), ApiError> {
    let Json(req) = payload?;
    let ttl = state.config.session_ttl_hours;
    let response = auth_svc::login(&state.pool, &req, ttl).await?;

    let cookie = session_cookie(response.token.clone(), state.config.cookie_secure, Duration::hours(ttl));
    Ok((jar.add(cookie), Json(response)))
}

/// `GET /api/auth/me` — return the caller's profile.
pub async fn me(State(state): State<AppState>, auth: AuthUser) -> Result<Json<UserProfile>, ApiError> {
    Ok(Json(auth_svc::load_profile(&state.pool, &auth.user).await?))
}

/// `POST /api/auth/logout` — delete session, clear cookie.
pub async fn logout(State(state): State<AppState>, jar: CookieJar, auth: AuthUser) -> impl IntoResponse {
    if let Err(e) = session::SessionStore::new(&state.pool).revoke(&auth.token).await {
        tracing::warn!(error = %e, "session delete failed");
    }

    let cookie = session_cookie(String::new(), state.config.cookie_secure, Duration::ZERO);
    (jar.add(cookie), StatusCode::NO_CONTENT)
}

#[cfg(test)]
#[path = "auth_test.rs"]
mod tests;
