//! Ingredient CRUD, the expiring-soon query and the dashboard aggregate.

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::Json;
use models::{DEFAULT_SOON_DAYS, DashboardStats, Ingredient, IngredientPatch, NewIngredient};
use serde::Deserialize;
use uuid::Uuid;

use super::auth::AuthUser;
use super::{commit, user_tx};
use crate::error::ApiError;
use crate::services::ingredient::IngredientFilter;
use crate::services::{dashboard as dashboard_svc, ingredient as ingredient_svc};
use crate::state::AppState;

/// Longest window accepted by `days` / `soon_days`.
const MAX_WINDOW_DAYS: i64 = 365;

#[derive(Debug, Default, Deserialize)]
pub struct WindowQuery {
    pub days: Option<i64>,
}

impl WindowQuery {
    /// Requested window, defaulting to three days.
    pub(crate) fn window(&self) -> Result<i64, ApiError> {
        let days = self.days.unwrap_or(DEFAULT_SOON_DAYS);
        if (0..=MAX_WINDOW_DAYS).contains(&days) {
            Ok(days)
        } else {
            Err(ApiError::bad_request(format!("days must be between 0 and {MAX_WINDOW_DAYS}")))
        }
    }
}

/// `GET /api/ingredients`
pub async fn list(
    State(state): State<AppState>,
    auth: AuthUser,
    query: Result<Query<IngredientFilter>, QueryRejection>,
) -> Result<Json<Vec<Ingredient>>, ApiError> {
    let Query(filter) = query?;
    let mut tx = user_tx(&state, auth.user.id).await?;
    let items = ingredient_svc::list(&mut tx, &filter).await?;
    commit(tx).await?;
    Ok(Json(items))
}

/// `POST /api/ingredients`
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    payload: Result<Json<NewIngredient>, JsonRejection>,
) -> Result<(StatusCode, Json<Ingredient>), ApiError> {
    let Json(input) = payload?;
    let mut tx = user_tx(&state, auth.user.id).await?;
    let created = ingredient_svc::create(&mut tx, input).await?;
    commit(tx).await?;
    tracing::info!(user_id = %auth.user.id, ingredient_id = %created.id, "ingredient created");
    Ok((StatusCode::CREATED, Json(created)))
}

/// `GET /api/ingredients/expiring?days=N` — expired items included.
pub async fn expiring(
    State(state): State<AppState>,
    auth: AuthUser,
    query: Result<Query<WindowQuery>, QueryRejection>,
) -> Result<Json<Vec<Ingredient>>, ApiError> {
    let Query(query) = query?;
    let days = query.window()?;
    let mut tx = user_tx(&state, auth.user.id).await?;
    let items = ingredient_svc::expiring(&mut tx, models::date::today(), days).await?;
    commit(tx).await?;
    Ok(Json(items))
}

/// `GET /api/ingredients/{id}`
pub async fn get_one(
    State(state): State<AppState>,
    auth: AuthUser,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<Ingredient>, ApiError> {
    let Path(id) = id?;
    let mut tx = user_tx(&state, auth.user.id).await?;
    let item = ingredient_svc::get(&mut tx, id).await?;
    commit(tx).await?;
    Ok(Json(item))
}

/// `PATCH /api/ingredients/{id}`
pub async fn update(
    State(state): State<AppState>,
    auth: AuthUser,
    id: Result<Path<Uuid>, PathRejection>,
    payload: Result<Json<IngredientPatch>, JsonRejection>,
) -> Result<Json<Ingredient>, ApiError> {
    let Path(id) = id?;
    let Json(patch) = payload?;
    let mut tx = user_tx(&state, auth.user.id).await?;
    let item = ingredient_svc::update(&mut tx, id, patch).await?;
    commit(tx).await?;
    Ok(Json(item))
}

/// `DELETE /api/ingredients/{id}`
pub async fn delete(
    State(state): State<AppState>,
    auth: AuthUser,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<StatusCode, ApiError> {
    let Path(id) = id?;
    let mut tx = user_tx(&state, auth.user.id).await?;
    ingredient_svc::delete(&mut tx, id).await?;
    commit(tx).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// `GET /api/dashboard?days=N`
pub async fn dashboard(
    State(state): State<AppState>,
    auth: AuthUser,
    query: Result<Query<WindowQuery>, QueryRejection>,
) -> Result<Json<DashboardStats>, ApiError> {
    let Query(query) = query?;
    let days = query.window()?;
    let mut tx = user_tx(&state, auth.user.id).await?;
    let stats = dashboard_svc::stats(&mut tx, models::date::today(), days).await?;
    commit(tx).await?;
    Ok(Json(stats))
}

#[cfg(test)]
#[path = "ingredients_test.rs"]
mod tests;
