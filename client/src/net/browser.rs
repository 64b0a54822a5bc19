//! Pantry API calls from the browser.
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net`, with the session
//! token sent as `Authorization: Bearer`.
//! Server-side (SSR): every call fails with [`ClientError::Transport`]
//! since these endpoints are only called from the browser.
//!
//! ERROR HANDLING
//! ==============
//! Failures come back as the same [`ClientError`] the native client
//! produces, so the UI localizes them through one path.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "browser_test.rs"]
mod browser_test;

use models::{
    AiReply, AuthResponse, DashboardStats, Ingredient, IngredientPatch, LoginRequest, MealPlan, MealPlanRequest,
    NewIngredient, NewShoppingItem, NutritionRequest, PriceRequest, RecognizeRequest, RecognizedIngredients,
    RecommendRequest, RegisterRequest, ShoppingItem, ShoppingItemPatch, UserProfile,
};
use serde::Serialize;
use serde::de::DeserializeOwned;
use uuid::Uuid;

use super::error::ClientError;
#[cfg(feature = "hydrate")]
use super::error::status_error;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Verb {
    Get,
    Post,
    Patch,
    Delete,
}

/// `Authorization` header value for `token`.
fn bearer(token: &str) -> Result<String, ClientError> {
    let token = token.trim();
    if token.is_empty() {
        return Err(ClientError::MissingToken);
    }
    Ok(format!("Bearer {token}"))
}

fn ingredient_path(id: Uuid) -> String {
    format!("/api/ingredients/{id}")
}

fn shopping_item_path(id: Uuid) -> String {
    format!("/api/shopping-list/{id}")
}

fn dashboard_path(soon_days: Option<i64>) -> String {
    match soon_days {
        Some(days) => format!("/api/dashboard?days={days}"),
        None => "/api/dashboard".to_owned(),
    }
}

#[cfg(feature = "hydrate")]
fn builder(verb: Verb, path: &str, auth: Option<&str>) -> gloo_net::http::RequestBuilder {
    use gloo_net::http::Request;
    let builder = match verb {
        Verb::Get => Request::get(path),
        Verb::Post => Request::post(path),
        Verb::Patch => Request::patch(path),
        Verb::Delete => Request::delete(path),
    };
    match auth {
        Some(value) => builder.header("Authorization", value),
        None => builder,
    }
}

#[cfg(feature = "hydrate")]
async fn checked(resp: gloo_net::http::Response) -> Result<gloo_net::http::Response, ClientError> {
    if resp.ok() {
        return Ok(resp);
    }
    let body = resp.text().await.unwrap_or_default();
    Err(status_error(resp.status(), &body))
}

#[cfg(not(feature = "hydrate"))]
fn server_side() -> ClientError {
    ClientError::Transport("not available on server".to_owned())
}

/// One request with an optional JSON body, decoding a JSON response.
async fn call<B, T>(verb: Verb, path: &str, auth: Option<String>, body: Option<&B>) -> Result<T, ClientError>
where
    B: Serialize + ?Sized,
    T: DeserializeOwned,
{
    #[cfg(feature = "hydrate")]
    {
        let builder = builder(verb, path, auth.as_deref());
        let sent = match body {
            Some(body) => builder.json(body).map_err(|e| ClientError::Transport(e.to_string()))?.send().await,
            None => builder.send().await,
        };
        let resp = checked(sent.map_err(|e| ClientError::Transport(e.to_string()))?).await?;
        resp.json::<T>().await.map_err(|e| ClientError::Decode(e.to_string()))
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (verb, path, auth, body);
        Err(server_side())
    }
}

/// One request whose response body is ignored.
async fn call_empty(verb: Verb, path: &str, auth: String) -> Result<(), ClientError> {
    #[cfg(feature = "hydrate")]
    {
        let resp = builder(verb, path, Some(&auth))
            .send()
            .await
            .map_err(|e| ClientError::Transport(e.to_string()))?;
        checked(resp).await.map(|_| ())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (verb, path, auth);
        Err(server_side())
    }
}

async fn get<T: DeserializeOwned>(path: &str, token: &str) -> Result<T, ClientError> {
    call::<(), T>(Verb::Get, path, Some(bearer(token)?), None).await
}

async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(path: &str, token: &str, body: &B) -> Result<T, ClientError> {
    call(Verb::Post, path, Some(bearer(token)?), Some(body)).await
}

// =============================================================================
// AUTH
// =============================================================================

/// `POST /api/auth/login`
pub async fn login(req: &LoginRequest) -> Result<AuthResponse, ClientError> {
    call(Verb::Post, "/api/auth/login", None, Some(req)).await
}

/// `POST /api/auth/register`
pub async fn register(req: &RegisterRequest) -> Result<AuthResponse, ClientError> {
    call(Verb::Post, "/api/auth/register", None, Some(req)).await
}

/// `POST /api/auth/logout`
pub async fn logout(token: &str) -> Result<(), ClientError> {
    call_empty(Verb::Post, "/api/auth/logout", bearer(token)?).await
}

/// `GET /api/auth/me`
pub async fn me(token: &str) -> Result<UserProfile, ClientError> {
    get("/api/auth/me", token).await
}

// =============================================================================
// PANTRY
// =============================================================================

/// `GET /api/dashboard`
pub async fn dashboard(token: &str, soon_days: Option<i64>) -> Result<DashboardStats, ClientError> {
    get(&dashboard_path(soon_days), token).await
}

/// `GET /api/ingredients`
pub async fn list_ingredients(token: &str) -> Result<Vec<Ingredient>, ClientError> {
    get("/api/ingredients", token).await
}

/// `POST /api/ingredients`
pub async fn create_ingredient(token: &str, input: &NewIngredient) -> Result<Ingredient, ClientError> {
    post("/api/ingredients", token, input).await
}

/// `PATCH /api/ingredients/{id}`
pub async fn update_ingredient(token: &str, id: Uuid, patch: &IngredientPatch) -> Result<Ingredient, ClientError> {
    call(Verb::Patch, &ingredient_path(id), Some(bearer(token)?), Some(patch)).await
}

/// `DELETE /api/ingredients/{id}`
pub async fn delete_ingredient(token: &str, id: Uuid) -> Result<(), ClientError> {
    call_empty(Verb::Delete, &ingredient_path(id), bearer(token)?).await
}

/// `GET /api/meal-plans`
pub async fn list_meal_plans(token: &str) -> Result<Vec<MealPlan>, ClientError> {
    get("/api/meal-plans", token).await
}

/// `GET /api/shopping-list`
pub async fn shopping_list(token: &str) -> Result<Vec<ShoppingItem>, ClientError> {
    get("/api/shopping-list", token).await
}

/// `POST /api/shopping-list`
pub async fn add_shopping_item(token: &str, input: &NewShoppingItem) -> Result<ShoppingItem, ClientError> {
    post("/api/shopping-list", token, input).await
}

/// `PATCH /api/shopping-list/{id}`
pub async fn set_purchased(token: &str, id: Uuid, is_purchased: bool) -> Result<ShoppingItem, ClientError> {
    let patch = ShoppingItemPatch { is_purchased };
    call(Verb::Patch, &shopping_item_path(id), Some(bearer(token)?), Some(&patch)).await
}

/// `DELETE /api/shopping-list/{id}`
pub async fn delete_shopping_item(token: &str, id: Uuid) -> Result<(), ClientError> {
    call_empty(Verb::Delete, &shopping_item_path(id), bearer(token)?).await
}

// =============================================================================
// AI
// =============================================================================

/// `POST /api/ai/recipes`
pub async fn recommend_recipes(token: &str, req: &RecommendRequest) -> Result<AiReply, ClientError> {
    post("/api/ai/recipes", token, req).await
}

/// `POST /api/ai/meal-plan`
pub async fn plan_meals(token: &str, req: &MealPlanRequest) -> Result<AiReply, ClientError> {
    post("/api/ai/meal-plan", token, req).await
}

/// `POST /api/ai/nutrition`
pub async fn analyze_nutrition(token: &str, req: &NutritionRequest) -> Result<AiReply, ClientError> {
    post("/api/ai/nutrition", token, req).await
}

/// `POST /api/ai/price`
pub async fn estimate_prices(token: &str, req: &PriceRequest) -> Result<AiReply, ClientError> {
    post("/api/ai/price", token, req).await
}

/// `POST /api/ai/recognize`
pub async fn recognize_ingredients(token: &str, req: &RecognizeRequest) -> Result<RecognizedIngredients, ClientError> {
    post("/api/ai/recognize", token, req).await
}
