use super::*;

#[test]
fn default_locale_is_korean() {
    assert_eq!(Locale::default(), Locale::Ko);
}

#[test]
fn locale_parses_bare_and_tagged_names() {
    for raw in ["ko", "KO", "ko-KR", "ko_KR.UTF-8", " kr "] {
        assert_eq!(raw.parse::<Locale>().unwrap(), Locale::Ko, "{raw}");
    }
    for raw in ["en", "en-US", "EN_gb"] {
        assert_eq!(raw.parse::<Locale>().unwrap(), Locale::En, "{raw}");
    }
}

#[test]
fn locale_rejects_unknown_language() {
    let err = "fr-FR".parse::<Locale>().unwrap_err();
    assert_eq!(err, UnknownLocale("fr-FR".into()));
    assert!("".parse::<Locale>().is_err());
}

#[test]
fn every_key_has_text_in_both_locales() {
    let keys = [
        MessageKey::ErrNetwork,
        MessageKey::ErrRateLimited,
        MessageKey::FormDateInvalid,
        MessageKey::TitleDashboard,
        MessageKey::StatusExpiringSoon,
        MessageKey::EmptyList,
        MessageKey::ActionRecognize,
        MessageKey::SwitchToRegister,
        MessageKey::RecognizedNothing,
    ];
    for key in keys {
        assert!(!Locale::Ko.text(key).is_empty());
        assert!(!Locale::En.text(key).is_empty());
        assert_ne!(Locale::Ko.text(key), Locale::En.text(key));
    }
}

#[test]
fn tags_parse_back_and_toggle_swaps() {
    for locale in [Locale::Ko, Locale::En] {
        assert_eq!(locale.tag().parse::<Locale>().unwrap(), locale);
        assert_ne!(locale.toggled(), locale);
        assert_eq!(locale.toggled().toggled(), locale);
    }
}
