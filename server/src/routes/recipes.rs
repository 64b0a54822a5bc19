//! Saved recipes.

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::Json;
use models::{NewRecipe, Recipe};
use serde::Deserialize;
use uuid::Uuid;

use super::auth::AuthUser;
use super::{commit, user_tx};
use crate::error::ApiError;
use crate::services::recipe as recipe_svc;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct RecipeQuery {
    pub category: Option<String>,
}

/// `GET /api/recipes?category=…`
pub async fn list(
    State(state): State<AppState>,
    auth: AuthUser,
    query: Result<Query<RecipeQuery>, QueryRejection>,
) -> Result<Json<Vec<Recipe>>, ApiError> {
    let Query(query) = query?;
    let category = query.category.as_deref().map(str::trim).filter(|c| !c.is_empty());
    let mut tx = user_tx(&state, auth.user.id).await?;
    let recipes = recipe_svc::list(&mut tx, category).await?;
    commit(tx).await?;
    Ok(Json(recipes))
}

/// `POST /api/recipes`
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    payload: Result<Json<NewRecipe>, JsonRejection>,
) -> Result<(StatusCode, Json<Recipe>), ApiError> {
    let Json(input) = payload?;
    let mut tx = user_tx(&state, auth.user.id).await?;
    let recipe = recipe_svc::create(&mut tx, input).await?;
    commit(tx).await?;
    Ok((StatusCode::CREATED, Json(recipe)))
}

/// `GET /api/recipes/{id}`
pub async fn get_one(
    State(state): State<AppState>,
    auth: AuthUser,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<Recipe>, ApiError> {
    let Path(id) = id?;
    let mut tx = user_tx(&state, auth.user.id).await?;
    let recipe = recipe_svc::get(&mut tx, id).await?;
    commit(tx).await?;
    Ok(Json(recipe))
}

/// `DELETE /api/recipes/{id}`
pub async fn delete(
    State(state): State<AppState>,
    auth: AuthUser,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<StatusCode, ApiError> {
    let Path(id) = id?;
    let mut tx = user_tx(&state, auth.user.id).await?;
    recipe_svc::delete(&mut tx, id).await?;
    commit(tx).await?;
    Ok(StatusCode::NO_CONTENT)
}
