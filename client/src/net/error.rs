//! Client error type.
//!
//! ERROR HANDLING
//! ==============
//! Every failure (transport, non-2xx status, undecodable body) collapses
//! into [`ClientError`]. Callers show [`ClientError::message`] and move on;
//! there is no retry or recovery.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

use models::ErrorBody;

use crate::i18n::{Locale, MessageKey};

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("invalid base URL: {0}")]
    InvalidBaseUrl(String),
    #[error("missing session token")]
    MissingToken,
    #[error("request failed: {0}")]
    Transport(String),
    #[error("HTTP {status} {code}: {message}")]
    Status { status: u16, code: String, message: String },
    #[error("response decode failed: {0}")]
    Decode(String),
}

#[cfg(not(target_arch = "wasm32"))]
impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() { Self::Decode(err.to_string()) } else { Self::Transport(err.to_string()) }
    }
}

impl ClientError {
    /// Message key for this failure. Stable server codes win over the bare
    /// HTTP status.
    pub fn key(&self) -> MessageKey {
        match self {
            Self::InvalidBaseUrl(_) | Self::Transport(_) => MessageKey::ErrNetwork,
            Self::MissingToken => MessageKey::ErrNotSignedIn,
            Self::Decode(_) => MessageKey::ErrDecode,
            Self::Status { status, code, .. } => match code.as_str() {
                "E_INVALID_CREDENTIALS" => MessageKey::ErrInvalidCredentials,
                "E_EMAIL_TAKEN" => MessageKey::ErrEmailTaken,
                "E_UNAUTHENTICATED" => MessageKey::ErrUnauthorized,
                "E_RATE_LIMITED" => MessageKey::ErrRateLimited,
                "E_LLM_NOT_CONFIGURED" => MessageKey::ErrAiUnavailable,
                "E_NOT_FOUND" => MessageKey::ErrNotFound,
                "E_INVALID_INPUT" => MessageKey::ErrInvalidInput,
                _ => status_key(*status),
            },
        }
    }

    /// Localized one-line message for display. Validation failures append
    /// the server's detail so the user can see which field was wrong.
    pub fn message(&self, locale: Locale) -> String {
        let key = self.key();
        let base = locale.text(key);
        match self {
            Self::Status { message, .. } if key == MessageKey::ErrInvalidInput && !message.is_empty() => {
                format!("{base} ({message})")
            }
            _ => base.to_owned(),
        }
    }

    /// Whether the failure means the stored session is no longer usable.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::MissingToken | Self::Status { status: 401, .. })
    }
}

fn status_key(status: u16) -> MessageKey {
    match status {
        400 | 422 => MessageKey::ErrInvalidInput,
        401 | 403 => MessageKey::ErrUnauthorized,
        404 => MessageKey::ErrNotFound,
        409 => MessageKey::ErrEmailTaken,
        429 => MessageKey::ErrRateLimited,
        502 | 504 => MessageKey::ErrAiFailed,
        503 => MessageKey::ErrAiUnavailable,
        _ => MessageKey::ErrServer,
    }
}

/// Error for a non-2xx response. JSON error bodies keep their stable code;
/// anything else is carried as plain text.
pub(crate) fn status_error(status: u16, body: &str) -> ClientError {
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(body) => ClientError::Status { status, code: body.code, message: body.error },
        Err(_) => ClientError::Status { status, code: String::new(), message: body.trim().to_owned() },
    }
}
