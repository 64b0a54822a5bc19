//! Localized UI strings.
//!
//! Korean is the default locale, matching the application's audience.
//! Every user-facing string goes through [`Locale::text`] so renderers and
//! the CLI never hard-code a language.

#[cfg(test)]
#[path = "i18n_test.rs"]
mod i18n_test;

use std::str::FromStr;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Locale {
    #[default]
    Ko,
    En,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown locale: {0}")]
pub struct UnknownLocale(pub String);

impl FromStr for Locale {
    type Err = UnknownLocale;

    /// Accepts a bare language (`ko`, `EN`) or a tagged one (`ko-KR`, `en_US`).
    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let lang = raw
            .trim()
            .split(['-', '_', '.'])
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();
        match lang.as_str() {
            "ko" | "kr" | "kor" => Ok(Self::Ko),
            "en" | "eng" => Ok(Self::En),
            _ => Err(UnknownLocale(raw.to_owned())),
        }
    }
}

/// Identifier of one user-facing string.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MessageKey {
    // Errors
    ErrNetwork,
    ErrUnauthorized,
    ErrInvalidCredentials,
    ErrInvalidInput,
    ErrNotFound,
    ErrEmailTaken,
    ErrRateLimited,
    ErrAiUnavailable,
    ErrAiFailed,
    ErrServer,
    ErrDecode,
    ErrNotSignedIn,
    // Form validation
    FormNameRequired,
    FormQuantityInvalid,
    FormDateInvalid,
    FormEmailRequired,
    FormPasswordRequired,
    FormDaysInvalid,
    // Notices
    LoginSuccess,
    RegisterSuccess,
    LogoutSuccess,
    IngredientAdded,
    IngredientUpdated,
    IngredientDeleted,
    Saved,
    Deleted,
    // Screens and panels
    TitleLogin,
    TitleRegister,
    TitleDashboard,
    TitleIngredients,
    TitleRecommend,
    TitleMealPlan,
    TitleNutrition,
    TitlePrice,
    TitleShopping,
    TitleRecipes,
    TitleMealPlans,
    // Labels
    StatusExpired,
    StatusExpiringSoon,
    StatusFresh,
    StatusNoExpiry,
    LabelTotal,
    LabelCategories,
    LabelLocations,
    LabelName,
    LabelQuantity,
    LabelExpiry,
    LabelLocation,
    LabelCategory,
    LabelMinutes,
    LabelModel,
    LabelSuggestedRecipes,
    LabelPurchased,
    LabelOpen,
    LabelSignedInAs,
    LabelEmail,
    LabelPassword,
    LabelUnit,
    LabelPurchaseDate,
    LabelPreferences,
    LabelAllergies,
    LabelGoals,
    LabelDays,
    LabelMeals,
    LabelItems,
    LabelPhoto,
    LabelConfidence,
    LabelFreshness,
    LabelNotes,
    // Actions
    ActionLogin,
    ActionRegister,
    ActionLogout,
    ActionAdd,
    ActionSave,
    ActionCancel,
    ActionEdit,
    ActionDelete,
    ActionAsk,
    ActionRecognize,
    ActionAddAll,
    SwitchToRegister,
    SwitchToLogin,
    Loading,
    EmptyList,
    RecognizedNothing,
}

impl Locale {
    /// Language tag, as accepted by [`FromStr`].
    pub fn tag(self) -> &'static str {
        match self {
            Self::Ko => "ko",
            Self::En => "en",
        }
    }

    /// The other supported locale.
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Ko => Self::En,
            Self::En => Self::Ko,
        }
    }

    /// Text for `key` in this locale.
    #[allow(clippy::too_many_lines)]
    pub fn text(self, key: MessageKey) -> &'static str {
        use MessageKey as K;
        match self {
            Self::Ko => match key {
                K::ErrNetwork => "서버에 연결할 수 없습니다. 잠시 후 다시 시도해 주세요.",
                K::ErrUnauthorized => "로그인이 필요합니다.",
                K::ErrInvalidCredentials => "이메일 또는 비밀번호가 올바르지 않습니다.",
                K::ErrInvalidInput => "입력값을 확인해 주세요.",
                K::ErrNotFound => "항목을 찾을 수 없습니다.",
                K::ErrEmailTaken => "이미 가입된 이메일입니다.",
                K::ErrRateLimited => "요청이 너무 많습니다. 잠시 후 다시 시도해 주세요.",
                K::ErrAiUnavailable => "AI 기능이 설정되지 않았습니다.",
                K::ErrAiFailed => "AI 응답을 받지 못했습니다. 다시 시도해 주세요.",
                K::ErrServer => "서버 오류가 발생했습니다.",
                K::ErrDecode => "서버 응답을 해석할 수 없습니다.",
                K::ErrNotSignedIn => "세션 토큰이 없습니다. 먼저 로그인해 주세요.",
                K::FormNameRequired => "재료 이름을 입력해 주세요.",
                K::FormQuantityInvalid => "수량은 0 이상의 숫자여야 합니다.",
                K::FormDateInvalid => "날짜는 YYYY-MM-DD 형식이어야 합니다.",
                K::FormEmailRequired => "이메일을 입력해 주세요.",
                K::FormPasswordRequired => "비밀번호를 입력해 주세요.",
                K::FormDaysInvalid => "일수는 1에서 7 사이여야 합니다.",
                K::LoginSuccess => "로그인되었습니다.",
                K::RegisterSuccess => "회원가입이 완료되었습니다.",
                K::LogoutSuccess => "로그아웃되었습니다.",
                K::IngredientAdded => "재료가 추가되었습니다.",
                K::IngredientUpdated => "재료가 수정되었습니다.",
                K::IngredientDeleted => "재료가 삭제되었습니다.",
                K::Saved => "저장되었습니다.",
                K::Deleted => "삭제되었습니다.",
                K::TitleLogin => "로그인",
                K::TitleRegister => "회원가입",
                K::TitleDashboard => "대시보드",
                K::TitleIngredients => "재료 관리",
                K::TitleRecommend => "레시피 추천",
                K::TitleMealPlan => "식단 계획",
                K::TitleNutrition => "영양 분석",
                K::TitlePrice => "가격 정보",
                K::TitleShopping => "장보기 목록",
                K::TitleRecipes => "저장된 레시피",
                K::TitleMealPlans => "예정된 식단",
                K::StatusExpired => "유통기한 지남",
                K::StatusExpiringSoon => "곧 만료",
                K::StatusFresh => "신선",
                K::StatusNoExpiry => "기한 없음",
                K::LabelTotal => "전체",
                K::LabelCategories => "카테고리",
                K::LabelLocations => "보관 위치",
                K::LabelName => "이름",
                K::LabelQuantity => "수량",
                K::LabelExpiry => "유통기한",
                K::LabelLocation => "위치",
                K::LabelCategory => "분류",
                K::LabelMinutes => "분",
                K::LabelModel => "모델",
                K::LabelSuggestedRecipes => "추천 레시피",
                K::LabelPurchased => "구매 완료",
                K::LabelOpen => "구매 예정",
                K::LabelSignedInAs => "로그인 사용자",
                K::LabelEmail => "이메일",
                K::LabelPassword => "비밀번호",
                K::LabelUnit => "단위",
                K::LabelPurchaseDate => "구매일",
                K::LabelPreferences => "선호 음식 (쉼표로 구분)",
                K::LabelAllergies => "알레르기 (쉼표로 구분)",
                K::LabelGoals => "목표",
                K::LabelDays => "일수",
                K::LabelMeals => "식사 (쉼표로 구분)",
                K::LabelItems => "품목 (쉼표로 구분)",
                K::LabelPhoto => "재료 사진",
                K::LabelConfidence => "신뢰도",
                K::LabelFreshness => "신선도",
                K::LabelNotes => "메모",
                K::ActionLogin => "로그인",
                K::ActionRegister => "가입하기",
                K::ActionLogout => "로그아웃",
                K::ActionAdd => "추가",
                K::ActionSave => "저장",
                K::ActionCancel => "취소",
                K::ActionEdit => "수정",
                K::ActionDelete => "삭제",
                K::ActionAsk => "AI에게 물어보기",
                K::ActionRecognize => "사진으로 재료 인식",
                K::ActionAddAll => "모두 재료에 추가",
                K::SwitchToRegister => "계정이 없으신가요? 회원가입",
                K::SwitchToLogin => "이미 계정이 있으신가요? 로그인",
                K::Loading => "불러오는 중...",
                K::EmptyList => "항목이 없습니다.",
                K::RecognizedNothing => "사진에서 재료를 찾지 못했습니다.",
            },
            Self::En => match key {
                K::ErrNetwork => "Cannot reach the server. Please try again shortly.",
                K::ErrUnauthorized => "Please sign in first.",
                K::ErrInvalidCredentials => "Incorrect email or password.",
                K::ErrInvalidInput => "Please check your input.",
                K::ErrNotFound => "Item not found.",
                K::ErrEmailTaken => "This email is already registered.",
                K::ErrRateLimited => "Too many requests. Please wait a moment.",
                K::ErrAiUnavailable => "AI features are not configured.",
                K::ErrAiFailed => "The AI service did not answer. Please try again.",
                K::ErrServer => "A server error occurred.",
                K::ErrDecode => "Could not read the server response.",
                K::ErrNotSignedIn => "No session token. Please log in first.",
                K::FormNameRequired => "Please enter an ingredient name.",
                K::FormQuantityInvalid => "Quantity must be a number of 0 or more.",
                K::FormDateInvalid => "Dates must look like YYYY-MM-DD.",
                K::FormEmailRequired => "Please enter your email.",
                K::FormPasswordRequired => "Please enter your password.",
                K::FormDaysInvalid => "Days must be between 1 and 7.",
                K::LoginSuccess => "Signed in.",
                K::RegisterSuccess => "Account created.",
                K::LogoutSuccess => "Signed out.",
                K::IngredientAdded => "Ingredient added.",
                K::IngredientUpdated => "Ingredient updated.",
                K::IngredientDeleted => "Ingredient deleted.",
                K::Saved => "Saved.",
                K::Deleted => "Deleted.",
                K::TitleLogin => "Sign in",
                K::TitleRegister => "Create account",
                K::TitleDashboard => "Dashboard",
                K::TitleIngredients => "Ingredients",
                K::TitleRecommend => "Recipe ideas",
                K::TitleMealPlan => "Meal plan",
                K::TitleNutrition => "Nutrition",
                K::TitlePrice => "Prices",
                K::TitleShopping => "Shopping list",
                K::TitleRecipes => "Saved recipes",
                K::TitleMealPlans => "Planned meals",
                K::StatusExpired => "Expired",
                K::StatusExpiringSoon => "Expiring soon",
                K::StatusFresh => "Fresh",
                K::StatusNoExpiry => "No expiry",
                K::LabelTotal => "Total",
                K::LabelCategories => "Categories",
                K::LabelLocations => "Locations",
                K::LabelName => "Name",
                K::LabelQuantity => "Qty",
                K::LabelExpiry => "Expires",
                K::LabelLocation => "Location",
                K::LabelCategory => "Category",
                K::LabelMinutes => "min",
                K::LabelModel => "Model",
                K::LabelSuggestedRecipes => "Suggested recipes",
                K::LabelPurchased => "Purchased",
                K::LabelOpen => "To buy",
                K::LabelSignedInAs => "Signed in as",
                K::LabelEmail => "Email",
                K::LabelPassword => "Password",
                K::LabelUnit => "Unit",
                K::LabelPurchaseDate => "Purchased on",
                K::LabelPreferences => "Preferences (comma separated)",
                K::LabelAllergies => "Allergies (comma separated)",
                K::LabelGoals => "Goals",
                K::LabelDays => "Days",
                K::LabelMeals => "Meals (comma separated)",
                K::LabelItems => "Items (comma separated)",
                K::LabelPhoto => "Ingredient photo",
                K::LabelConfidence => "Confidence",
                K::LabelFreshness => "Freshness",
                K::LabelNotes => "Notes",
                K::ActionLogin => "Sign in",
                K::ActionRegister => "Create account",
                K::ActionLogout => "Sign out",
                K::ActionAdd => "Add",
                K::ActionSave => "Save",
                K::ActionCancel => "Cancel",
                K::ActionEdit => "Edit",
                K::ActionDelete => "Delete",
                K::ActionAsk => "Ask the AI",
                K::ActionRecognize => "Recognize from photo",
                K::ActionAddAll => "Add all to pantry",
                K::SwitchToRegister => "No account yet? Create one",
                K::SwitchToLogin => "Already registered? Sign in",
                K::Loading => "Loading...",
                K::EmptyList => "Nothing here yet.",
                K::RecognizedNothing => "No ingredients were found in the photo.",
            },
        }
    }
}
