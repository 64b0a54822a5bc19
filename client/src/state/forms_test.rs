use super::*;
use time::macros::date;
use uuid::Uuid;

fn form(name: &str, quantity: &str, expiry: &str) -> IngredientForm {
    IngredientForm {
        name: name.into(),
        quantity: quantity.into(),
        unit: " 개 ".into(),
        expiry_date: expiry.into(),
        location: "냉장고".into(),
        ..IngredientForm::default()
    }
}

#[test]
fn valid_form_converts_and_trims() {
    let req = form(" 양파 ", "2.5", "2024-06-12").to_request().unwrap();
    assert_eq!(req.name, "양파");
    assert!((req.quantity - 2.5).abs() < f64::EPSILON);
    assert_eq!(req.unit, "개");
    assert_eq!(req.expiry_date, Some(date!(2024 - 06 - 12)));
    assert_eq!(req.purchase_date, None);
    assert_eq!(req.location, "냉장고");
}

#[test]
fn blank_quantity_defaults_to_one() {
    let req = form("두부", "  ", "").to_request().unwrap();
    assert!((req.quantity - 1.0).abs() < f64::EPSILON);
    assert_eq!(req.expiry_date, None);
}

#[test]
fn empty_name_is_rejected() {
    assert_eq!(form("   ", "1", "").to_request(), Err(MessageKey::FormNameRequired));
}

#[test]
fn bad_quantities_are_rejected() {
    for quantity in ["-1", "abc", "NaN", "inf"] {
        assert_eq!(form("우유", quantity, "").to_request(), Err(MessageKey::FormQuantityInvalid), "{quantity}");
    }
    assert!(form("우유", "0", "").to_request().is_ok());
}

#[test]
fn malformed_dates_are_rejected() {
    for expiry in ["2024/06/12", "2024-13-01", "2024-02-30", "tomorrow"] {
        assert_eq!(form("우유", "1", expiry).to_request(), Err(MessageKey::FormDateInvalid), "{expiry}");
    }
}

#[test]
fn form_prefills_from_ingredient() {
    let ingredient = Ingredient {
        id: Uuid::new_v4(),
        name: "계란".into(),
        quantity: 10.0,
        unit: "개".into(),
        purchase_date: None,
        expiry_date: Some(date!(2024 - 07 - 01)),
        location: "냉장고".into(),
        category: "유제품".into(),
    };
    let form = IngredientForm::from_ingredient(&ingredient);
    assert_eq!(form.quantity, "10");
    assert_eq!(form.expiry_date, "2024-07-01");
    assert_eq!(form.purchase_date, "");
    let req = form.to_request().unwrap();
    assert_eq!(req.expiry_date, ingredient.expiry_date);
}

#[test]
fn preference_form_splits_lists() {
    let form = PreferenceForm { preferences_text: "매운맛, 한식,,".into(), allergies_text: " 땅콩 , 우유, 땅콩".into() };
    let req = form.to_request();
    assert_eq!(req.preferences, vec!["매운맛", "한식"]);
    assert_eq!(req.allergies, vec!["땅콩", "우유"]);
}

#[test]
fn credentials_are_required() {
    let login = LoginForm { email: " ".into(), password: "pw".into() };
    assert_eq!(login.to_request(), Err(MessageKey::FormEmailRequired));
    let login = LoginForm { email: "a@b.c".into(), password: String::new() };
    assert_eq!(login.to_request(), Err(MessageKey::FormPasswordRequired));
    let register = RegisterForm { email: " a@b.c ".into(), name: " 민지 ".into(), password: "pw".into() };
    let req = register.to_request().unwrap();
    assert_eq!(req.email, "a@b.c");
    assert_eq!(req.name, "민지");
}

#[test]
fn edit_form_becomes_full_patch() {
    let patch = form("두부", "2", "").to_patch().unwrap();
    assert_eq!(patch.name.as_deref(), Some("두부"));
    assert_eq!(patch.quantity, Some(2.0));
    assert_eq!(patch.expiry_date, None);
    assert!(!patch.is_empty());
    assert_eq!(form("", "2", "").to_patch(), Err(MessageKey::FormNameRequired));
}

#[test]
fn meal_plan_days_default_and_bounds() {
    let mut ask = AskForm::default();
    assert_eq!(ask.meal_plan_request().unwrap().days, MealPlanRequest::default().days);
    ask.days = " 7 ".into();
    ask.goals = " 저탄수 ".into();
    ask.preferences.allergies_text = "새우".into();
    let req = ask.meal_plan_request().unwrap();
    assert_eq!(req.days, 7);
    assert_eq!(req.goals, "저탄수");
    assert_eq!(req.allergies, vec!["새우"]);
    for bad in ["0", "8", "three"] {
        ask.days = bad.into();
        assert_eq!(ask.meal_plan_request(), Err(MessageKey::FormDaysInvalid), "{bad}");
    }
}

#[test]
fn ask_form_lists_meals_and_items() {
    let ask = AskForm { meals_text: "아침: 토스트, 점심: 비빔밥".into(), items_text: " ".into(), ..AskForm::default() };
    assert_eq!(ask.nutrition_request().meals, vec!["아침: 토스트", "점심: 비빔밥"]);
    assert!(ask.price_request().items.is_empty());
}

#[test]
fn shopping_form_leaves_blank_quantity_open() {
    let item = ShoppingForm { item_name: " 우유 ".into(), quantity: String::new(), unit: "L".into() };
    let req = item.to_request().unwrap();
    assert_eq!(req.item_name, "우유");
    assert_eq!(req.quantity, None);
    let bad = ShoppingForm { item_name: "우유".into(), quantity: "-1".into(), unit: String::new() };
    assert_eq!(bad.to_request(), Err(MessageKey::FormQuantityInvalid));
    assert_eq!(ShoppingForm::default().to_request(), Err(MessageKey::FormNameRequired));
}
