//! Session token and locale persisted in `localStorage`.
//!
//! TRADE-OFFS
//! ==========
//! Persistence is best-effort browser-only behavior; SSR paths read
//! nothing and write nothing so server rendering stays deterministic.

#[cfg(test)]
#[path = "storage_test.rs"]
mod storage_test;

use crate::i18n::Locale;

#[cfg(feature = "hydrate")]
const TOKEN_KEY: &str = "pantry_session_token";
#[cfg(feature = "hydrate")]
const LOCALE_KEY: &str = "pantry_locale";

#[cfg(feature = "hydrate")]
fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|w| w.local_storage().ok().flatten())
}

#[cfg(feature = "hydrate")]
fn read(key: &str) -> Option<String> {
    local_storage()?.get_item(key).ok().flatten()
}

#[cfg(feature = "hydrate")]
fn write(key: &str, value: Option<&str>) {
    let Some(storage) = local_storage() else {
        return;
    };
    let _ = match value {
        Some(value) => storage.set_item(key, value),
        None => storage.remove_item(key),
    };
}

/// Token saved by the last sign-in, if any.
pub fn load_token() -> Option<String> {
    #[cfg(feature = "hydrate")]
    {
        read(TOKEN_KEY).filter(|t| !t.trim().is_empty())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        None
    }
}

/// Save `token`, or forget the stored one when `None`.
pub fn save_token(token: Option<&str>) {
    #[cfg(feature = "hydrate")]
    {
        write(TOKEN_KEY, token);
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = token;
    }
}

/// Stored locale, falling back to the browser language, then Korean.
pub fn load_locale() -> Locale {
    #[cfg(feature = "hydrate")]
    {
        read(LOCALE_KEY)
            .or_else(|| web_sys::window().and_then(|w| w.navigator().language()))
            .and_then(|raw| raw.parse().ok())
            .unwrap_or_default()
    }
    #[cfg(not(feature = "hydrate"))]
    {
        Locale::default()
    }
}

pub fn save_locale(locale: Locale) {
    #[cfg(feature = "hydrate")]
    {
        write(LOCALE_KEY, Some(locale.tag()));
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = locale;
    }
}
