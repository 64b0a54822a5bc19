use super::*;

#[cfg(not(feature = "hydrate"))]
#[test]
fn server_render_sees_no_stored_session() {
    save_token(Some("abc"));
    assert_eq!(load_token(), None);
    save_locale(Locale::En);
    assert_eq!(load_locale(), Locale::Ko);
}
