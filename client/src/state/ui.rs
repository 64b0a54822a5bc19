//! Screen and panel selection plus the one-line status notice.
//!
//! DESIGN
//! ======
//! Plain structs, no reactive runtime. The web app keeps one [`UiState`]
//! in an `RwSignal` and the CLI builds one per command; both ask
//! [`UiState::view`] what to draw; exactly one panel is shown at
//! a time and a signed-out user never sees a main-screen panel.

#[cfg(test)]
#[path = "ui_test.rs"]
mod ui_test;

use std::fmt;
use std::str::FromStr;

use super::auth::AuthState;
use crate::i18n::{Locale, MessageKey};
use crate::net::ClientError;

/// Top-level screen.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Screen {
    #[default]
    Login,
    Register,
    Main,
}

/// Main-screen panel.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Panel {
    #[default]
    Dashboard,
    Ingredients,
    Recommend,
    MealPlan,
    Nutrition,
    Price,
    Shopping,
}

impl Panel {
    pub const ALL: [Self; 7] = [
        Self::Dashboard,
        Self::Ingredients,
        Self::Recommend,
        Self::MealPlan,
        Self::Nutrition,
        Self::Price,
        Self::Shopping,
    ];

    pub fn title_key(self) -> MessageKey {
        match self {
            Self::Dashboard => MessageKey::TitleDashboard,
            Self::Ingredients => MessageKey::TitleIngredients,
            Self::Recommend => MessageKey::TitleRecommend,
            Self::MealPlan => MessageKey::TitleMealPlan,
            Self::Nutrition => MessageKey::TitleNutrition,
            Self::Price => MessageKey::TitlePrice,
            Self::Shopping => MessageKey::TitleShopping,
        }
    }

    fn slug(self) -> &'static str {
        match self {
            Self::Dashboard => "dashboard",
            Self::Ingredients => "ingredients",
            Self::Recommend => "recommend",
            Self::MealPlan => "meal-plan",
            Self::Nutrition => "nutrition",
            Self::Price => "price",
            Self::Shopping => "shopping",
        }
    }
}

impl fmt::Display for Panel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown panel: {0}")]
pub struct UnknownPanel(pub String);

impl FromStr for Panel {
    type Err = UnknownPanel;

    /// Accepts the slug, the English title, or the Korean title.
    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let wanted = raw.trim();
        let normalized = wanted.to_ascii_lowercase().replace(['_', ' '], "-");
        Self::ALL
            .into_iter()
            .find(|panel| {
                normalized == panel.slug()
                    || wanted == Locale::Ko.text(panel.title_key())
                    || normalized == Locale::En.text(panel.title_key()).to_ascii_lowercase().replace(' ', "-")
            })
            .or(match normalized.as_str() {
                "home" | "홈" => Some(Self::Dashboard),
                "recipes" | "recommendations" => Some(Self::Recommend),
                "mealplan" | "meals" => Some(Self::MealPlan),
                "prices" | "pricing" => Some(Self::Price),
                "shopping-list" => Some(Self::Shopping),
                _ => None,
            })
            .ok_or_else(|| UnknownPanel(raw.to_owned()))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Error,
}

/// Status line shown under the current view.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
}

/// What the front-end should draw right now.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum View {
    Login,
    Register,
    Panel(Panel),
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UiState {
    pub screen: Screen,
    pub panel: Panel,
    pub locale: Locale,
    pub message: Option<Notice>,
}

impl UiState {
    pub fn new(locale: Locale) -> Self {
        Self { locale, ..Self::default() }
    }

    /// Resolve the view for the current flags. Signed-out users get the
    /// login screen (or registration, when they asked for it) regardless of
    /// the panel flag; signed-in users always get exactly one panel.
    pub fn view(&self, auth: &AuthState) -> View {
        if !auth.is_authenticated() {
            return match self.screen {
                Screen::Register => View::Register,
                Screen::Login | Screen::Main => View::Login,
            };
        }
        View::Panel(self.panel)
    }

    pub fn open(&mut self, panel: Panel) {
        self.screen = Screen::Main;
        self.panel = panel;
        self.message = None;
    }

    pub fn notify(&mut self, key: MessageKey) {
        self.message = Some(Notice { kind: NoticeKind::Info, text: self.locale.text(key).to_owned() });
    }

    /// Show `err` as a localized error line. An expired session also drops
    /// the held token, so [`Self::view`] lands on the login screen.
    pub fn notify_error(&mut self, auth: &mut AuthState, err: &ClientError) {
        if err.is_unauthorized() {
            auth.sign_out();
            self.screen = Screen::Login;
        }
        self.message = Some(Notice { kind: NoticeKind::Error, text: err.message(self.locale) });
    }

    pub fn notify_invalid(&mut self, key: MessageKey) {
        self.message = Some(Notice { kind: NoticeKind::Error, text: self.locale.text(key).to_owned() });
    }

    pub fn clear_message(&mut self) {
        self.message = None;
    }
}
