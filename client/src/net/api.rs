//! REST API client for the pantry server.
//!
//! DESIGN
//! ======
//! One method per endpoint. Each method issues exactly one request, attaches
//! `Authorization: Bearer <token>` when a token is held, and decodes the JSON
//! body. Non-2xx responses are decoded as [`models::ErrorBody`] when possible
//! so callers can map the stable error code to a localized message.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use models::{
    AiReply, AuthResponse, CookingTipRequest, DashboardStats, Ingredient, IngredientPatch, LoginRequest,
    MealPlan, MealPlanRequest, NewIngredient, NewMealPlan, NewRecipe, NewShoppingItem, NutritionRequest, PriceRequest,
    RecognizeRequest, RecognizedIngredients, Recipe, RecommendRequest, RegisterRequest, ShoppingItem,
    ShoppingItemPatch, SubstituteRequest, UserProfile,
};
use reqwest::{Method, RequestBuilder, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;
use time::Date;
use uuid::Uuid;

use super::error::{ClientError, status_error};

/// Optional filters for [`ApiClient::list_ingredients`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct IngredientQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

#[derive(Clone, Debug)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    /// Client for `base_url` (e.g. `http://127.0.0.1:3000`), without a session.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidBaseUrl`] unless the URL is `http(s)://…`.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        let base_url = base_url.into().trim().trim_end_matches('/').to_owned();
        let has_host = base_url
            .strip_prefix("http://")
            .or_else(|| base_url.strip_prefix("https://"))
            .is_some_and(|rest| !rest.is_empty());
        if !has_host {
            return Err(ClientError::InvalidBaseUrl(base_url));
        }
        Ok(Self { http: reqwest::Client::new(), base_url, token: None })
    }

    /// Same client carrying a session token.
    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.set_token(Some(token.into()));
        self
    }

    /// Replace or clear the session token. Blank tokens count as none.
    pub fn set_token(&mut self, token: Option<String>) {
        self.token = token.map(|t| t.trim().to_owned()).filter(|t| !t.is_empty());
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Request builder with the bearer header attached when a token is set.
    pub(crate) fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self.http.request(method, self.url(path));
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Like [`Self::request`] but fails fast without a token.
    fn authed(&self, method: Method, path: &str) -> Result<RequestBuilder, ClientError> {
        if self.token.is_none() {
            return Err(ClientError::MissingToken);
        }
        Ok(self.request(method, path))
    }

    async fn send_json<T: DeserializeOwned>(builder: RequestBuilder) -> Result<T, ClientError> {
        let response = check_status(builder.send().await?).await?;
        response.json::<T>().await.map_err(|e| ClientError::Decode(e.to_string()))
    }

    async fn send_empty(builder: RequestBuilder) -> Result<(), ClientError> {
        check_status(builder.send().await?).await?;
        Ok(())
    }

    // =========================================================================
    // HEALTH + AUTH
    // =========================================================================

    /// `GET /healthz`
    pub async fn health(&self) -> Result<(), ClientError> {
        Self::send_empty(self.request(Method::GET, "/healthz")).await
    }

    /// `POST /api/auth/register`. The returned token is not stored; call
    /// [`Self::set_token`] to use it.
    pub async fn register(&self, req: &RegisterRequest) -> Result<AuthResponse, ClientError> {
        Self::send_json(self.request(Method::POST, "/api/auth/register").json(req)).await
    }

    /// `POST /api/auth/login`
    pub async fn login(&self, req: &LoginRequest) -> Result<AuthResponse, ClientError> {
        Self::send_json(self.request(Method::POST, "/api/auth/login").json(req)).await
    }

    /// `POST /api/auth/logout`
    pub async fn logout(&self) -> Result<(), ClientError> {
        Self::send_empty(self.authed(Method::POST, "/api/auth/logout")?).await
    }

    /// `GET /api/auth/me`
    pub async fn me(&self) -> Result<UserProfile, ClientError> {
        Self::send_json(self.authed(Method::GET, "/api/auth/me")?).await
    }

    // =========================================================================
    // INGREDIENTS + DASHBOARD
    // =========================================================================

    /// `GET /api/dashboard`
    pub async fn dashboard(&self, soon_days: Option<i64>) -> Result<DashboardStats, ClientError> {
        let mut builder = self.authed(Method::GET, "/api/dashboard")?;
        if let Some(days) = soon_days {
            builder = builder.query(&[("days", days)]);
        }
        Self::send_json(builder).await
    }

    /// `GET /api/ingredients`
    pub async fn list_ingredients(&self, query: &IngredientQuery) -> Result<Vec<Ingredient>, ClientError> {
        Self::send_json(self.authed(Method::GET, "/api/ingredients")?.query(query)).await
    }

    /// `GET /api/ingredients/expiring`
    pub async fn expiring_ingredients(&self, days: Option<i64>) -> Result<Vec<Ingredient>, ClientError> {
        let mut builder = self.authed(Method::GET, "/api/ingredients/expiring")?;
        if let Some(days) = days {
            builder = builder.query(&[("days", days)]);
        }
        Self::send_json(builder).await
    }

    /// `GET /api/ingredients/{id}`
    pub async fn get_ingredient(&self, id: Uuid) -> Result<Ingredient, ClientError> {
        Self::send_json(self.authed(Method::GET, &format!("/api/ingredients/{id}"))?).await
    }

    /// `POST /api/ingredients`
    pub async fn create_ingredient(&self, input: &NewIngredient) -> Result<Ingredient, ClientError> {
        Self::send_json(self.authed(Method::POST, "/api/ingredients")?.json(input)).await
    }

    /// `PATCH /api/ingredients/{id}`
    pub async fn update_ingredient(&self, id: Uuid, patch: &IngredientPatch) -> Result<Ingredient, ClientError> {
        Self::send_json(self.authed(Method::PATCH, &format!("/api/ingredients/{id}"))?.json(patch)).await
    }

    /// `DELETE /api/ingredients/{id}`
    pub async fn delete_ingredient(&self, id: Uuid) -> Result<(), ClientError> {
        Self::send_empty(self.authed(Method::DELETE, &format!("/api/ingredients/{id}"))?).await
    }

    // =========================================================================
    // RECIPES + MEAL PLANS
    // =========================================================================

    /// `GET /api/recipes`
    pub async fn list_recipes(&self, category: Option<&str>) -> Result<Vec<Recipe>, ClientError> {
        let mut builder = self.authed(Method::GET, "/api/recipes")?;
        if let Some(category) = category {
            builder = builder.query(&[("category", category)]);
        }
        Self::send_json(builder).await
    }

    /// `GET /api/recipes/{id}`
    pub async fn get_recipe(&self, id: Uuid) -> Result<Recipe, ClientError> {
        Self::send_json(self.authed(Method::GET, &format!("/api/recipes/{id}"))?).await
    }

    /// `POST /api/recipes`
    pub async fn create_recipe(&self, input: &NewRecipe) -> Result<Recipe, ClientError> {
        Self::send_json(self.authed(Method::POST, "/api/recipes")?.json(input)).await
    }

    /// `DELETE /api/recipes/{id}`
    pub async fn delete_recipe(&self, id: Uuid) -> Result<(), ClientError> {
        Self::send_empty(self.authed(Method::DELETE, &format!("/api/recipes/{id}"))?).await
    }

    /// `GET /api/meal-plans`
    pub async fn list_meal_plans(&self, from: Option<Date>, to: Option<Date>) -> Result<Vec<MealPlan>, ClientError> {
        let mut builder = self.authed(Method::GET, "/api/meal-plans")?;
        if let Some(from) = from {
            builder = builder.query(&[("from", models::date::format_date(from))]);
        }
        if let Some(to) = to {
            builder = builder.query(&[("to", models::date::format_date(to))]);
        }
        Self::send_json(builder).await
    }

    /// `POST /api/meal-plans`
    pub async fn create_meal_plan(&self, input: &NewMealPlan) -> Result<MealPlan, ClientError> {
        Self::send_json(self.authed(Method::POST, "/api/meal-plans")?.json(input)).await
    }

    /// `DELETE /api/meal-plans/{id}`
    pub async fn delete_meal_plan(&self, id: Uuid) -> Result<(), ClientError> {
        Self::send_empty(self.authed(Method::DELETE, &format!("/api/meal-plans/{id}"))?).await
    }

    // =========================================================================
    // SHOPPING LIST
    // =========================================================================

    /// `GET /api/shopping-list`
    pub async fn shopping_list(&self) -> Result<Vec<ShoppingItem>, ClientError> {
        Self::send_json(self.authed(Method::GET, "/api/shopping-list")?).await
    }

    /// `POST /api/shopping-list`
    pub async fn add_shopping_item(&self, input: &NewShoppingItem) -> Result<ShoppingItem, ClientError> {
        Self::send_json(self.authed(Method::POST, "/api/shopping-list")?.json(input)).await
    }

    /// `PATCH /api/shopping-list/{id}`
    pub async fn set_purchased(&self, id: Uuid, is_purchased: bool) -> Result<ShoppingItem, ClientError> {
        let patch = ShoppingItemPatch { is_purchased };
        Self::send_json(self.authed(Method::PATCH, &format!("/api/shopping-list/{id}"))?.json(&patch)).await
    }

    /// `DELETE /api/shopping-list/{id}`
    pub async fn delete_shopping_item(&self, id: Uuid) -> Result<(), ClientError> {
        Self::send_empty(self.authed(Method::DELETE, &format!("/api/shopping-list/{id}"))?).await
    }

    /// `POST /api/shopping-list/from-recipe/{recipe_id}` — returns the items added.
    pub async fn add_missing_from_recipe(&self, recipe_id: Uuid) -> Result<Vec<ShoppingItem>, ClientError> {
        let path = format!("/api/shopping-list/from-recipe/{recipe_id}");
        Self::send_json(self.authed(Method::POST, &path)?).await
    }

    // =========================================================================
    // AI
    // =========================================================================

    /// `POST /api/ai/recipes`
    pub async fn recommend_recipes(&self, req: &RecommendRequest) -> Result<AiReply, ClientError> {
        Self::send_json(self.authed(Method::POST, "/api/ai/recipes")?.json(req)).await
    }

    /// `POST /api/ai/meal-plan`
    pub async fn plan_meals(&self, req: &MealPlanRequest) -> Result<AiReply, ClientError> {
        Self::send_json(self.authed(Method::POST, "/api/ai/meal-plan")?.json(req)).await
    }

    /// `POST /api/ai/nutrition`
    pub async fn analyze_nutrition(&self, req: &NutritionRequest) -> Result<AiReply, ClientError> {
        Self::send_json(self.authed(Method::POST, "/api/ai/nutrition")?.json(req)).await
    }

    /// `POST /api/ai/price`
    pub async fn estimate_prices(&self, req: &PriceRequest) -> Result<AiReply, ClientError> {
        Self::send_json(self.authed(Method::POST, "/api/ai/price")?.json(req)).await
    }

    /// `POST /api/ai/substitutes`
    pub async fn suggest_substitutes(&self, req: &SubstituteRequest) -> Result<AiReply, ClientError> {
        Self::send_json(self.authed(Method::POST, "/api/ai/substitutes")?.json(req)).await
    }

    /// `POST /api/ai/cooking-tip`
    pub async fn cooking_tip(&self, req: &CookingTipRequest) -> Result<AiReply, ClientError> {
        Self::send_json(self.authed(Method::POST, "/api/ai/cooking-tip")?.json(req)).await
    }

    /// `POST /api/ai/recognize` — ingredients read from a photo.
    pub async fn recognize_ingredients(&self, req: &RecognizeRequest) -> Result<RecognizedIngredients, ClientError> {
        Self::send_json(self.authed(Method::POST, "/api/ai/recognize")?.json(req)).await
    }
}

/// Pass 2xx responses through; turn anything else into [`ClientError::Status`].
async fn check_status(response: Response) -> Result<Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let text = response.text().await.unwrap_or_default();
    Err(status_error(status.as_u16(), &text))
}
