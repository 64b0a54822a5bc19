//! AI endpoints.
//!
//! Each handler reads whatever the prompt needs from the caller's rows,
//! commits that read, and only then calls the model so no transaction is
//! held open across an LLM round trip.

use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::response::Json;
use models::{
    AiReply, CookingTipRequest, Ingredient, MealPlan, MealPlanRequest, NutritionRequest, PriceRequest,
    RecognizeRequest, RecognizedIngredients, RecommendRequest, SubstituteRequest,
};
use time::Duration;
use uuid::Uuid;

use super::auth::AuthUser;
use crate::db;
use crate::error::ApiError;
use crate::services::ai::{self as ai_svc, AiError};
use crate::services::ingredient::{self as ingredient_svc, IngredientFilter};
use crate::services::meal_plan as meal_plan_svc;
use crate::services::store::StoreError;
use crate::state::AppState;

/// Days of planned meals analysed when a nutrition request lists none.
const NUTRITION_LOOKAHEAD_DAYS: i64 = 7;
/// Request body ceiling for `/api/ai/recognize`: the largest photo once
/// base64-encoded, plus room for the JSON around it.
pub const RECOGNIZE_BODY_LIMIT: usize = ai_svc::MAX_IMAGE_BYTES / 3 * 4 + 64 * 1024;

/// `POST /api/ai/recipes`
pub async fn recipes(
    State(state): State<AppState>,
    auth: AuthUser,
    payload: Result<Json<RecommendRequest>, JsonRejection>,
) -> Result<Json<AiReply>, ApiError> {
    let Json(req) = payload?;
    let ingredients = load_ingredients(&state, auth.user.id).await?;
    let reply = ai_svc::recommend_recipes(state.ai_context(auth.user.id), &ingredients, &req).await?;
    Ok(Json(reply))
}

/// `POST /api/ai/meal-plan`
pub async fn meal_plan(
    State(state): State<AppState>,
    auth: AuthUser,
    payload: Result<Json<MealPlanRequest>, JsonRejection>,
) -> Result<Json<AiReply>, ApiError> {
    let Json(req) = payload?;
    let ingredients = load_ingredients(&state, auth.user.id).await?;
    let reply = ai_svc::plan_meals(state.ai_context(auth.user.id), &ingredients, &req).await?;
    Ok(Json(reply))
}

/// `POST /api/ai/nutrition` — an empty `meals` list analyses the coming
/// week of planned meals.
pub async fn nutrition(
    State(state): State<AppState>,
    auth: AuthUser,
    payload: Result<Json<NutritionRequest>, JsonRejection>,
) -> Result<Json<AiReply>, ApiError> {
    let Json(mut req) = payload?;
    if req.meals.iter().all(|m| m.trim().is_empty()) {
        let plans = load_upcoming_meals(&state, auth.user.id).await?;
        req.meals = plans.iter().filter_map(meal_line).collect();
    }
    let reply = ai_svc::analyze_nutrition(state.ai_context(auth.user.id), &req).await?;
    Ok(Json(reply))
}

/// `POST /api/ai/price`
pub async fn price(
    State(state): State<AppState>,
    auth: AuthUser,
    payload: Result<Json<PriceRequest>, JsonRejection>,
) -> Result<Json<AiReply>, ApiError> {
    let Json(req) = payload?;
    let ingredients = if req.items.iter().all(|i| i.trim().is_empty()) {
        load_ingredients(&state, auth.user.id).await?
    } else {
        Vec::new()
    };
    let reply = ai_svc::estimate_prices(state.ai_context(auth.user.id), &req.items, &ingredients).await?;
    Ok(Json(reply))
}

/// `POST /api/ai/substitutes`
pub async fn substitutes(
    State(state): State<AppState>,
    auth: AuthUser,
    payload: Result<Json<SubstituteRequest>, JsonRejection>,
) -> Result<Json<AiReply>, ApiError> {
    let Json(req) = payload?;
    let reply = ai_svc::suggest_substitutes(state.ai_context(auth.user.id), &req).await?;
    Ok(Json(reply))
}

/// `POST /api/ai/cooking-tip`
pub async fn cooking_tip(
    State(state): State<AppState>,
    auth: AuthUser,
    payload: Result<Json<CookingTipRequest>, JsonRejection>,
) -> Result<Json<AiReply>, ApiError> {
    let Json(req) = payload?;
    let reply = ai_svc::cooking_tip(state.ai_context(auth.user.id), &req).await?;
    Ok(Json(reply))
}

/// `POST /api/ai/recognize` — ingredients seen in a base64-encoded photo.
/// Nothing is stored; the caller reviews the list and adds what it wants.
pub async fn recognize(
    State(state): State<AppState>,
    auth: AuthUser,
    payload: Result<Json<RecognizeRequest>, JsonRejection>,
) -> Result<Json<RecognizedIngredients>, ApiError> {
    let Json(req) = payload?;
    let recognized = ai_svc::recognize_ingredients(state.ai_context(auth.user.id), &req).await?;
    Ok(Json(recognized))
}

// =============================================================================
// HELPERS
// =============================================================================

async fn load_ingredients(state: &AppState, user_id: Uuid) -> Result<Vec<Ingredient>, AiError> {
    let mut tx = db::begin_for_user(&state.pool, user_id)
        .await
        .map_err(StoreError::from)?;
    let items = ingredient_svc::list(&mut tx, &IngredientFilter::default()).await?;
    tx.commit().await.map_err(StoreError::from)?;
    Ok(items)
}

async fn load_upcoming_meals(state: &AppState, user_id: Uuid) -> Result<Vec<MealPlan>, AiError> {
    let today = models::date::today();
    let until = today.saturating_add(Duration::days(NUTRITION_LOOKAHEAD_DAYS - 1));
    let mut tx = db::begin_for_user(&state.pool, user_id)
        .await
        .map_err(StoreError::from)?;
    let plans = meal_plan_svc::list(&mut tx, Some(today), Some(until)).await?;
    tx.commit().await.map_err(StoreError::from)?;
    Ok(plans)
}

/// `"lunch: 김치찌개"`, falling back to the notes when no recipe is linked.
pub(crate) fn meal_line(plan: &MealPlan) -> Option<String> {
    let dish = plan
        .recipe_name
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .or_else(|| Some(plan.notes.trim()).filter(|n| !n.is_empty()))?;
    Some(format!("{}: {dish}", plan.meal_type))
}
