use super::*;

// =============================================================================
// normalize_email
// =============================================================================

#[test]
fn normalize_email_trims_and_lowercases() {
    assert_eq!(normalize_email("  Cook@Example.COM ").unwrap(), "cook@example.com");
}

#[test]
fn normalize_email_rejects_malformed() {
    for bad in ["", "   ", "no-at-sign", "@example.com", "cook@", "a@b@c"] {
        assert!(matches!(normalize_email(bad), Err(AuthError::Invalid(_))), "{bad:?} should be rejected");
    }
}

// =============================================================================
// password rules
// =============================================================================

#[test]
fn short_password_rejected() {
    let err = check_password("12345").unwrap_err();
    assert_eq!(err.to_string(), "password must be at least 6 characters");
    assert!(check_password("123456").is_ok());
}

#[test]
fn password_length_counts_characters_not_bytes() {
    // Six Hangul syllables are 18 bytes but six characters.
    assert!(check_password("비밀번호좋다").is_ok());
    assert!(check_password("비밀번호").is_err());
}

// =============================================================================
// hashing
// =============================================================================

#[test]
fn hash_is_argon2id_phc_string() {
    let salt = generate_salt().unwrap();
    let hash = hash_password(&salt, "secret").unwrap();
    assert!(hash.starts_with("$argon2id$v=19$"), "{hash}");
    assert!(hash.contains(salt.as_str()));
}

#[test]
fn hash_depends_on_salt() {
    let a = hash_password(&generate_salt().unwrap(), "secret").unwrap();
    let b = hash_password(&generate_salt().unwrap(), "secret").unwrap();
    assert_ne!(a, b);
}

#[test]
fn verify_accepts_correct_password() {
    let salt = generate_salt().unwrap();
    let hash = hash_password(&salt, "correct horse").unwrap();
    assert!(verify_password("correct horse", &hash));
}

#[test]
fn verify_rejects_wrong_password_and_damaged_hash() {
    let salt = generate_salt().unwrap();
    let hash = hash_password(&salt, "correct horse").unwrap();
    assert!(!verify_password("wrong horse", &hash));
    assert!(!verify_password("correct horse", &hash[..hash.len() - 4]));
    assert!(!verify_password("correct horse", ""));
}

#[test]
fn legacy_hex_digests_never_verify() {
    assert!(!verify_password("secret", &"ab".repeat(32)));
}

#[test]
fn salts_are_random() {
    let a = generate_salt().unwrap();
    assert!(a.as_str().len() >= 16);
    assert_ne!(a, generate_salt().unwrap());
}

// =============================================================================
// display_name
// =============================================================================

#[test]
fn display_name_prefers_given_name() {
    assert_eq!(display_name(" 김민지 ", "minji@example.com"), "김민지");
}

#[test]
fn display_name_falls_back_to_local_part() {
    assert_eq!(display_name("  ", "minji@example.com"), "minji");
}

// =============================================================================
// error codes
// =============================================================================

#[test]
fn auth_error_codes() {
    use crate::error::ErrorCode;
    assert_eq!(AuthError::EmailTaken.error_code(), "E_EMAIL_TAKEN");
    assert_eq!(AuthError::InvalidCredentials.error_code(), "E_INVALID_CREDENTIALS");
    assert_eq!(AuthError::Invalid("x".into()).error_code(), "E_INVALID_INPUT");
}

// =============================================================================
// live database
// =============================================================================

#[cfg(feature = "live-db-tests")]
mod live {
    use super::*;

    #[tokio::test]
    async fn register_then_login_and_duplicate() {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required for live-db-tests");
        let pool = crate::db::init_pool(&url, crate::config::PoolSettings::default()).await.expect("pool");
        let email = format!("cook-{}@example.test", Uuid::new_v4());

        let req = RegisterRequest { email: email.clone(), name: "요리사".into(), password: "secret1".into() };
        let registered = register(&pool, &req, 1).await.unwrap();
        assert_eq!(registered.user.name, "요리사");

        assert!(matches!(register(&pool, &req, 1).await, Err(AuthError::EmailTaken)));

        let login_req = LoginRequest { email: email.to_uppercase(), password: "secret1".into() };
        let logged_in = login(&pool, &login_req, 1).await.unwrap();
        assert_eq!(logged_in.user.id, registered.user.id);
        assert_eq!(logged_in.user.name, "요리사");

        let bad = LoginRequest { email, password: "wrong-pw".into() };
        assert!(matches!(login(&pool, &bad, 1).await, Err(AuthError::InvalidCredentials)));
    }
}
