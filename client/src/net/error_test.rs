use super::*;

fn status(status: u16, code: &str, message: &str) -> ClientError {
    ClientError::Status { status, code: code.into(), message: message.into() }
}

#[test]
fn transport_failures_read_as_network_errors() {
    let err = ClientError::Transport("connection refused".into());
    assert_eq!(err.message(Locale::En), "Cannot reach the server. Please try again shortly.");
}

#[test]
fn server_code_beats_status() {
    assert_eq!(status(401, "E_INVALID_CREDENTIALS", "").key(), MessageKey::ErrInvalidCredentials);
    assert_eq!(status(401, "E_UNAUTHENTICATED", "").key(), MessageKey::ErrUnauthorized);
    assert_eq!(status(503, "E_LLM_NOT_CONFIGURED", "").key(), MessageKey::ErrAiUnavailable);
}

#[test]
fn unknown_codes_fall_back_to_status() {
    assert_eq!(status(502, "E_API_RESPONSE", "").key(), MessageKey::ErrAiFailed);
    assert_eq!(status(429, "", "").key(), MessageKey::ErrRateLimited);
    assert_eq!(status(500, "E_INTERNAL", "").key(), MessageKey::ErrServer);
    assert_eq!(status(418, "", "").key(), MessageKey::ErrServer);
}

#[test]
fn validation_message_includes_detail() {
    let err = status(400, "E_INVALID_INPUT", "name is required");
    assert_eq!(err.message(Locale::Ko), "입력값을 확인해 주세요. (name is required)");
}

#[test]
fn other_messages_hide_server_detail() {
    let err = status(500, "E_INTERNAL", "internal server error");
    assert_eq!(err.message(Locale::Ko), "서버 오류가 발생했습니다.");
}

#[test]
fn unauthorized_detection() {
    assert!(ClientError::MissingToken.is_unauthorized());
    assert!(status(401, "E_UNAUTHENTICATED", "").is_unauthorized());
    assert!(!status(404, "E_NOT_FOUND", "").is_unauthorized());
}
