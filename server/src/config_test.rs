use super::*;

fn reader(pairs: &[(&str, &str)]) -> EnvReader<Box<dyn Fn(&str) -> Option<String>>> {
    EnvReader::from_pairs(pairs)
}

// =============================================================================
// EnvReader
// =============================================================================

#[test]
fn text_trims_and_drops_blank_values() {
    let env = reader(&[("A", "  value "), ("B", "   ")]);
    assert_eq!(env.text("A").as_deref(), Some("value"));
    assert_eq!(env.text("B"), None);
    assert_eq!(env.text("C"), None);
}

#[test]
fn flag_accepts_common_spellings() {
    for raw in ["1", "true", "YES", " On "] {
        assert_eq!(reader(&[("F", raw)]).flag("F"), Some(true), "{raw}");
    }
    for raw in ["0", "False", "no", "off"] {
        assert_eq!(reader(&[("F", raw)]).flag("F"), Some(false), "{raw}");
    }
    assert_eq!(reader(&[("F", "maybe")]).flag("F"), None);
}

#[test]
fn parse_or_falls_back_on_garbage() {
    let env = reader(&[("N", " 42 "), ("BAD", "lots")]);
    assert_eq!(env.parse_or::<u32>("N", 7), 42);
    assert_eq!(env.parse_or::<u32>("BAD", 7), 7);
    assert_eq!(env.secs_or("MISSING", 60), Duration::from_secs(60));
}

#[test]
fn process_reader_sees_real_environment() {
    let key = "__PANTRY_CONFIG_PROCESS_READER__";
    unsafe { std::env::set_var(key, "x") };
    assert_eq!(EnvReader::process().text(key).as_deref(), Some("x"));
    unsafe { std::env::remove_var(key) };
}

// =============================================================================
// ServerConfig
// =============================================================================

#[test]
fn database_url_is_required() {
    let err = ServerConfig::from_reader(&reader(&[("PORT", "8080")])).unwrap_err();
    assert!(matches!(err, ConfigError::Missing("DATABASE_URL")));
    assert_eq!(err.to_string(), "missing required env var DATABASE_URL");
}

#[test]
fn malformed_port_fails_startup() {
    let err = ServerConfig::from_reader(&reader(&[("DATABASE_URL", "postgres://x"), ("PORT", "http")])).unwrap_err();
    assert_eq!(err.to_string(), "invalid value for PORT: \"http\"");
}

#[test]
fn minimal_environment_uses_defaults() {
    let config = ServerConfig::from_reader(&reader(&[("DATABASE_URL", "postgres://x")])).unwrap();
    assert_eq!(config.port, 3000);
    assert_eq!(config.session_ttl_hours, 720);
    assert_eq!(config.ai_max_tokens, 1500);
    assert!(!config.cookie_secure);
    assert!(config.cors_allow_origin.is_none());
    assert_eq!(config.pool, PoolSettings::default());
    assert_eq!(config.rate_limit, RateLimitConfig::default());
}

#[test]
fn overrides_are_applied() {
    let config = ServerConfig::from_reader(&reader(&[
        ("DATABASE_URL", "postgres://x"),
        ("PORT", "8080"),
        ("SESSION_TTL_HOURS", "0"),
        ("COOKIE_SECURE", "on"),
        ("CORS_ALLOW_ORIGIN", "https://pantry.example"),
        ("DB_MAX_CONNECTIONS", "12"),
        ("RATE_LIMIT_PER_USER", "3"),
    ]))
    .unwrap();
    assert_eq!(config.port, 8080);
    assert_eq!(config.session_ttl_hours, 1);
    assert!(config.cookie_secure);
    assert_eq!(config.cors_allow_origin.as_deref(), Some("https://pantry.example"));
    assert_eq!(config.pool.max_connections, 12);
    assert_eq!(config.rate_limit.per_user_limit, 3);
}

#[test]
fn wildcard_cors_means_any_origin() {
    let config =
        ServerConfig::from_reader(&reader(&[("DATABASE_URL", "postgres://x"), ("CORS_ALLOW_ORIGIN", "*")])).unwrap();
    assert!(config.cors_allow_origin.is_none());
}
