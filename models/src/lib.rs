//! Shared wire records for the pantry API.
//!
//! This crate owns the JSON representation used by both `server` and
//! `client`. Records are pass-through: the server validates input and the
//! database enforces ownership, so nothing here carries invariants beyond
//! what serde checks while decoding.

pub mod ai;
pub mod auth;
pub mod date;
pub mod expiry;
pub mod ingredient;
pub mod recipe;
pub mod shopping;

pub use ai::{
    AiReply, CookingTipRequest, MealPlanRequest, NutritionRequest, PriceRequest, RecognizeRequest,
    RecognizedIngredient, RecognizedIngredients, RecommendRequest, SubstituteRequest, SuggestedRecipe,
};
pub use auth::{AuthResponse, LoginRequest, RegisterRequest, UserProfile};
pub use expiry::{DEFAULT_SOON_DAYS, ExpiryStatus};
pub use ingredient::{DashboardStats, Ingredient, IngredientPatch, NewIngredient};
pub use recipe::{MealPlan, NewMealPlan, NewRecipe, Recipe};
pub use shopping::{NewShoppingItem, ShoppingItem, ShoppingItemPatch};

use serde::{Deserialize, Serialize};

/// JSON body returned by the API for every non-2xx response.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Human-readable message.
    pub error: String,
    /// Stable machine-readable code, e.g. `E_NOT_FOUND`.
    pub code: String,
    /// Whether repeating the same request may succeed.
    #[serde(default)]
    pub retryable: bool,
}
