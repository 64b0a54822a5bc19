use super::*;
use axum::Router;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, post};

/// Serve `router` on an ephemeral port and return its base URL.
async fn serve(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

fn profile() -> serde_json::Value {
    serde_json::json!({
        "id": "00000000-0000-0000-0000-000000000001",
        "email": "cook@example.com",
        "name": "요리사"
    })
}

#[test]
fn new_rejects_non_http_urls() {
    for raw in ["", "localhost:3000", "ftp://host", "http://"] {
        assert!(matches!(ApiClient::new(raw), Err(ClientError::InvalidBaseUrl(_))), "{raw}");
    }
}

#[test]
fn new_trims_trailing_slash() {
    let client = ApiClient::new(" http://127.0.0.1:3000/ ").unwrap();
    assert_eq!(client.base_url(), "http://127.0.0.1:3000");
    assert_eq!(client.url("/api/recipes"), "http://127.0.0.1:3000/api/recipes");
}

#[test]
fn blank_token_counts_as_signed_out() {
    let mut client = ApiClient::new("http://localhost").unwrap().with_token("  ");
    assert_eq!(client.token(), None);
    client.set_token(Some(" abc ".into()));
    assert_eq!(client.token(), Some("abc"));
    client.set_token(None);
    assert_eq!(client.token(), None);
}

#[test]
fn request_attaches_bearer_header_when_signed_in() {
    let client = ApiClient::new("http://localhost").unwrap().with_token("tok");
    let request = client.request(Method::GET, "/api/auth/me").build().unwrap();
    assert_eq!(request.headers()["authorization"], "Bearer tok");

    let anonymous = ApiClient::new("http://localhost").unwrap();
    let request = anonymous.request(Method::GET, "/healthz").build().unwrap();
    assert!(request.headers().get("authorization").is_none());
}

#[tokio::test]
async fn authed_calls_fail_fast_without_token() {
    let client = ApiClient::new("http://127.0.0.1:1").unwrap();
    assert!(matches!(client.me().await, Err(ClientError::MissingToken)));
    assert!(matches!(client.shopping_list().await, Err(ClientError::MissingToken)));
}

#[test]
fn status_error_decodes_error_body() {
    let err = status_error(429, r#"{"error":"slow down","code":"E_RATE_LIMITED","retryable":true}"#);
    match err {
        ClientError::Status { status, code, message } => {
            assert_eq!(status, 429);
            assert_eq!(code, "E_RATE_LIMITED");
            assert_eq!(message, "slow down");
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn status_error_keeps_plain_text_bodies() {
    let err = status_error(502, "bad gateway\n");
    assert!(matches!(err, ClientError::Status { status: 502, ref code, ref message } if code.is_empty() && message == "bad gateway"));
}

#[tokio::test]
async fn me_sends_bearer_and_decodes_profile() {
    let router = Router::new().route(
        "/api/auth/me",
        get(|headers: HeaderMap| async move {
            if headers.get("authorization").and_then(|v| v.to_str().ok()) == Some("Bearer tok") {
                (StatusCode::OK, axum::Json(profile()))
            } else {
                (StatusCode::UNAUTHORIZED, axum::Json(serde_json::json!({"error":"no","code":"E_UNAUTHENTICATED"})))
            }
        }),
    );
    let base = serve(router).await;

    let client = ApiClient::new(&base).unwrap().with_token("tok");
    let user = client.me().await.unwrap();
    assert_eq!(user.email, "cook@example.com");

    let wrong = ApiClient::new(&base).unwrap().with_token("other");
    let err = wrong.me().await.unwrap_err();
    assert!(err.is_unauthorized());
}

#[tokio::test]
async fn rate_limited_ai_call_maps_to_status_error() {
    let router = Router::new().route(
        "/api/ai/recipes",
        post(|| async {
            (
                StatusCode::TOO_MANY_REQUESTS,
                axum::Json(serde_json::json!({"error":"limit","code":"E_RATE_LIMITED","retryable":true})),
            )
        }),
    );
    let base = serve(router).await;
    let client = ApiClient::new(base).unwrap().with_token("tok");
    let err = client.recommend_recipes(&RecommendRequest::default()).await.unwrap_err();
    assert_eq!(err.key(), crate::i18n::MessageKey::ErrRateLimited);
}

#[tokio::test]
async fn login_decodes_token_and_user() {
    let router = Router::new().route(
        "/api/auth/login",
        post(|axum::Json(body): axum::Json<serde_json::Value>| async move {
            assert_eq!(body["email"], "cook@example.com");
            axum::Json(serde_json::json!({ "token": "fresh", "user": profile() }))
        }),
    );
    let base = serve(router).await;
    let client = ApiClient::new(base).unwrap();
    let auth = client
        .login(&LoginRequest { email: "cook@example.com".into(), password: "pw".into() })
        .await
        .unwrap();
    assert_eq!(auth.token, "fresh");
    assert_eq!(auth.user.name, "요리사");
}

#[tokio::test]
async fn unreachable_server_is_transport_error() {
    let client = ApiClient::new("http://127.0.0.1:1").unwrap();
    assert!(matches!(client.health().await, Err(ClientError::Transport(_))));
}

#[tokio::test]
async fn recognize_posts_photo_and_decodes_ingredients() {
    let router = Router::new().route(
        "/api/ai/recognize",
        post(|headers: HeaderMap, axum::Json(body): axum::Json<serde_json::Value>| async move {
            assert_eq!(headers["authorization"], "Bearer tok");
            assert_eq!(body["mime_type"], "image/png");
            assert_eq!(body["image_base64"], "iVBORw==");
            axum::Json(serde_json::json!({
                "ingredients": [{ "name": "양파", "quantity": 2, "unit": "개", "estimated_expiry_days": 14 }],
                "confidence": 8,
                "model": "vision-test"
            }))
        }),
    );
    let base = serve(router).await;
    let client = ApiClient::new(base).unwrap().with_token("tok");
    let req = RecognizeRequest { image_base64: "iVBORw==".into(), mime_type: "image/png".into() };
    let found = client.recognize_ingredients(&req).await.unwrap();
    assert_eq!(found.ingredients.len(), 1);
    assert_eq!(found.ingredients[0].name, "양파");
    assert_eq!(found.ingredients[0].estimated_expiry_days, Some(14));
    assert!((found.confidence - 8.0).abs() < f64::EPSILON);
    assert_eq!(found.model, "vision-test");
}
