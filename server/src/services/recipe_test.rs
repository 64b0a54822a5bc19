use super::*;

#[test]
fn validate_new_requires_name() {
    let err = validate_new(NewRecipe::default()).unwrap_err();
    assert!(matches!(err, StoreError::Invalid(ref msg) if msg == "name is required"));
}

#[test]
fn validate_new_rejects_non_positive_cooking_time() {
    let input = NewRecipe { name: "라면".into(), cooking_time: Some(0), ..NewRecipe::default() };
    assert!(validate_new(input).is_err());
}

#[test]
fn validate_new_trims_text() {
    let input = NewRecipe {
        name: " 된장찌개 ".into(),
        category: " 한식 ".into(),
        cooking_time: Some(25),
        ..NewRecipe::default()
    };
    let valid = validate_new(input).unwrap();
    assert_eq!(valid.name, "된장찌개");
    assert_eq!(valid.category, "한식");
    assert_eq!(valid.cooking_time, Some(25));
}

#[test]
fn ingredient_names_split_and_clean() {
    let names = ingredient_names("김치 200g, 두부(1모)\n- 대파,  , 김치 200g");
    assert_eq!(names, vec!["김치 200g", "두부", "대파"]);
}

#[test]
fn ingredient_names_of_blank_list_is_empty() {
    assert!(ingredient_names("  ,\n ").is_empty());
}

#[test]
fn missing_ingredients_ignores_amounts_and_case() {
    let needed = vec!["김치 200g".to_owned(), "두부".to_owned(), "Egg 2".to_owned(), "대파".to_owned()];
    let held = vec![" 김치".to_owned(), "EGG".to_owned()];
    assert_eq!(missing_ingredients(&needed, &held), vec!["두부", "대파"]);
}

#[test]
fn missing_ingredients_does_not_match_on_substrings() {
    let needed = vec!["물".to_owned(), "대파".to_owned()];
    let held = vec!["물엿".to_owned(), "파".to_owned()];
    assert_eq!(missing_ingredients(&needed, &held), vec!["물", "대파"]);
}

#[test]
fn normalized_name_strips_trailing_amounts() {
    assert_eq!(normalized_name("  Olive Oil 2 tbsp "), "olive oil");
    assert_eq!(normalized_name("김치200g"), "김치");
    assert_eq!(normalized_name("돼지고기 1.5 kg"), "돼지고기");
    assert_eq!(normalized_name("계란 2 개"), "계란");
    assert_eq!(normalized_name("7up"), "7up");
}

#[test]
fn missing_ingredients_ignores_blank_held_names() {
    let needed = vec!["소금".to_owned()];
    let held = vec!["  ".to_owned()];
    assert_eq!(missing_ingredients(&needed, &held), vec!["소금"]);
}
