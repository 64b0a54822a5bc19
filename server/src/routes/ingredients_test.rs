use super::*;

#[test]
fn window_defaults_to_three_days() {
    assert_eq!(WindowQuery::default().window().unwrap(), 3);
}

#[test]
fn window_accepts_zero_and_upper_bound() {
    assert_eq!(WindowQuery { days: Some(0) }.window().unwrap(), 0);
    assert_eq!(WindowQuery { days: Some(MAX_WINDOW_DAYS) }.window().unwrap(), MAX_WINDOW_DAYS);
}

#[test]
fn window_rejects_out_of_range() {
    let err = WindowQuery { days: Some(-1) }.window().unwrap_err();
    assert_eq!(err.status, StatusCode::BAD_REQUEST);
    assert!(WindowQuery { days: Some(MAX_WINDOW_DAYS + 1) }.window().is_err());
}

#[test]
fn window_query_parses_from_query_string() {
    let uri: axum::http::Uri = "/api/ingredients/expiring?days=7".parse().unwrap();
    let Query(query) = Query::<WindowQuery>::try_from_uri(&uri).unwrap();
    assert_eq!(query.days, Some(7));
}

#[test]
fn filter_parses_from_query_string() {
    let uri: axum::http::Uri = "/api/ingredients?category=%EC%B1%84%EC%86%8C".parse().unwrap();
    let Query(filter) = Query::<IngredientFilter>::try_from_uri(&uri).unwrap();
    assert_eq!(filter.category.as_deref(), Some("채소"));
    assert!(filter.location.is_none());
}
