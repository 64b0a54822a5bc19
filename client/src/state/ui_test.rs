use super::*;
use models::{AuthResponse, UserProfile};
use uuid::Uuid;

fn signed_in() -> AuthState {
    let mut auth = AuthState::default();
    auth.sign_in(AuthResponse {
        token: "tok".into(),
        user: UserProfile { id: Uuid::new_v4(), email: "a@b.c".into(), name: "민지".into() },
    });
    auth
}

// =============================================================
// View dispatch
// =============================================================

#[test]
fn signed_out_always_lands_on_login() {
    let auth = AuthState::default();
    for panel in Panel::ALL {
        let mut ui = UiState::default();
        ui.open(panel);
        assert_eq!(ui.view(&auth), View::Login, "{panel}");
    }
}

#[test]
fn signed_out_can_reach_registration() {
    let ui = UiState { screen: Screen::Register, ..UiState::default() };
    assert_eq!(ui.view(&AuthState::default()), View::Register);
}

#[test]
fn signed_in_renders_exactly_the_selected_panel() {
    let auth = signed_in();
    let mut ui = UiState::default();
    for panel in Panel::ALL {
        ui.open(panel);
        assert_eq!(ui.view(&auth), View::Panel(panel));
    }
}

#[test]
fn open_clears_previous_notice() {
    let mut ui = UiState::default();
    ui.notify(MessageKey::Saved);
    ui.open(Panel::Shopping);
    assert_eq!(ui.message, None);
    assert_eq!(ui.screen, Screen::Main);
}

// =============================================================
// Panel parsing
// =============================================================

#[test]
fn panel_parses_slugs_and_titles() {
    assert_eq!("meal-plan".parse::<Panel>().unwrap(), Panel::MealPlan);
    assert_eq!("Meal plan".parse::<Panel>().unwrap(), Panel::MealPlan);
    assert_eq!("식단 계획".parse::<Panel>().unwrap(), Panel::MealPlan);
    assert_eq!("장보기 목록".parse::<Panel>().unwrap(), Panel::Shopping);
    assert_eq!("SHOPPING_LIST".parse::<Panel>().unwrap(), Panel::Shopping);
    assert_eq!("대시보드".parse::<Panel>().unwrap(), Panel::Dashboard);
}

#[test]
fn panel_round_trips_through_display() {
    for panel in Panel::ALL {
        assert_eq!(panel.to_string().parse::<Panel>().unwrap(), panel);
    }
}

#[test]
fn unknown_panel_is_rejected() {
    assert_eq!("settings".parse::<Panel>(), Err(UnknownPanel("settings".into())));
}

// =============================================================
// Notices
// =============================================================

#[test]
fn notices_follow_locale() {
    let mut ui = UiState::new(Locale::En);
    ui.notify(MessageKey::IngredientAdded);
    assert_eq!(ui.message.as_ref().unwrap().text, "Ingredient added.");
    assert_eq!(ui.message.as_ref().unwrap().kind, NoticeKind::Info);
}

#[test]
fn unauthorized_error_returns_to_login() {
    let mut auth = signed_in();
    let mut ui = UiState::default();
    ui.open(Panel::Ingredients);
    assert_eq!(ui.view(&auth), View::Panel(Panel::Ingredients));

    let err = ClientError::Status { status: 401, code: "E_UNAUTHENTICATED".into(), message: String::new() };
    ui.notify_error(&mut auth, &err);
    assert_eq!(ui.view(&auth), View::Login);
    assert!(!auth.is_authenticated());
    assert_eq!(auth.user, None);
    let notice = ui.message.unwrap();
    assert_eq!(notice.kind, NoticeKind::Error);
    assert_eq!(notice.text, "로그인이 필요합니다.");
}

#[test]
fn other_errors_keep_the_session() {
    let mut auth = signed_in();
    let mut ui = UiState::default();
    ui.open(Panel::Recommend);
    let err = ClientError::Status { status: 429, code: "E_RATE_LIMITED".into(), message: String::new() };
    ui.notify_error(&mut auth, &err);
    assert_eq!(ui.view(&auth), View::Panel(Panel::Recommend));
    assert!(auth.is_authenticated());
}
