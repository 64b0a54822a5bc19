use super::*;
use axum::extract::FromRequestParts;
use axum::http::{HeaderValue, Request};
use axum::http::header::COOKIE;
use crate::state::test_helpers;

fn headers(pairs: &[(axum::http::HeaderName, &str)]) -> HeaderMap {
    let mut map = HeaderMap::new();
    for (name, value) in pairs {
        map.insert(name.clone(), HeaderValue::from_str(value).unwrap());
    }
    map
}

// =============================================================================
// session_token
// =============================================================================

#[test]
fn session_token_from_bearer_header() {
    let map = headers(&[(AUTHORIZATION, "Bearer abc123")]);
    assert_eq!(session_token(&map).as_deref(), Some("abc123"));
}

#[test]
fn session_token_from_cookie() {
    let map = headers(&[(COOKIE, "theme=dark; session_token=fromcookie")]);
    assert_eq!(session_token(&map).as_deref(), Some("fromcookie"));
}

#[test]
fn bearer_wins_over_cookie() {
    let map = headers(&[(AUTHORIZATION, "Bearer header"), (COOKIE, "session_token=cookie")]);
    assert_eq!(session_token(&map).as_deref(), Some("header"));
}

#[test]
fn blank_or_foreign_schemes_are_ignored() {
    assert_eq!(session_token(&headers(&[(AUTHORIZATION, "Bearer   ")])), None);
    assert_eq!(session_token(&headers(&[(AUTHORIZATION, "Basic dXNlcjpwYXNz")])), None);
    assert_eq!(session_token(&headers(&[(COOKIE, "session_token=")])), None);
    assert_eq!(session_token(&HeaderMap::new()), None);
}

// =============================================================================
// session_cookie
// =============================================================================

#[test]
fn session_cookie_attributes() {
    let cookie = session_cookie("tok".into(), true, Duration::hours(2));
    assert_eq!(cookie.name(), COOKIE_NAME);
    assert_eq!(cookie.value(), "tok");
    assert_eq!(cookie.path(), Some("/"));
    assert_eq!(cookie.http_only(), Some(true));
    assert_eq!(cookie.secure(), Some(true));
    assert_eq!(cookie.same_site(), Some(SameSite::Lax));
    assert_eq!(cookie.max_age(), Some(Duration::hours(2)));
}

#[test]
fn clearing_cookie_expires_immediately() {
    let cookie = session_cookie(String::new(), false, Duration::ZERO);
    assert_eq!(cookie.value(), "");
    assert_eq!(cookie.max_age(), Some(Duration::ZERO));
    assert_eq!(cookie.secure(), Some(false));
}

// =============================================================================
// AuthUser extractor
// =============================================================================

#[tokio::test]
async fn missing_token_is_unauthorized_without_db() {
    let state = test_helpers::test_app_state();
    let (mut parts, ()) = Request::builder().uri("/api/auth/me").body(()).unwrap().into_parts();
    let Err(err) = AuthUser::from_request_parts(&mut parts, &state).await else {
        panic!("expected rejection");
    };
    assert_eq!(err.status, StatusCode::UNAUTHORIZED);
    assert_eq!(err.code, "E_UNAUTHENTICATED");
}

#[cfg(feature = "live-db-tests")]
mod live {
    use super::*;

    #[tokio::test]
    async fn unknown_token_is_unauthorized() {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL");
        let pool = crate::db::init_pool(&url, crate::config::PoolSettings::default()).await.unwrap();
        let state = AppState::new(pool, None, crate::config::ServerConfig::default());
        let (mut parts, ()) = Request::builder()
            .header(AUTHORIZATION, format!("Bearer {}", session::SessionToken::generate().as_str()))
            .body(())
            .unwrap()
            .into_parts();
        let Err(err) = AuthUser::from_request_parts(&mut parts, &state).await else {
            panic!("expected rejection");
        };
        assert_eq!(err.status, StatusCode::UNAUTHORIZED);
    }
}
