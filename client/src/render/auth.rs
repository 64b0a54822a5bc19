//! Sign-in result and profile lines.

use models::{AuthResponse, UserProfile};

use crate::i18n::{Locale, MessageKey};

/// Notice shown after login or registration.
pub fn render_auth_result(response: &AuthResponse, registered: bool, locale: Locale) -> String {
    let key = if registered { MessageKey::RegisterSuccess } else { MessageKey::LoginSuccess };
    format!("{}\n{}", locale.text(key), render_profile(&response.user, locale))
}

/// `Signed in as: 민지 <minji@example.com>`
pub fn render_profile(user: &UserProfile, locale: Locale) -> String {
    let label = locale.text(MessageKey::LabelSignedInAs);
    if user.name.trim().is_empty() {
        format!("{label}: {}", user.email)
    } else {
        format!("{label}: {} <{}>", user.name, user.email)
    }
}
