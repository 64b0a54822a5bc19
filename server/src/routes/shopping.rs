//! Shopping list, including "add what this recipe is missing".

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;
use models::{NewShoppingItem, ShoppingItem, ShoppingItemPatch};
use uuid::Uuid;

use super::auth::AuthUser;
use super::{commit, user_tx};
use crate::error::ApiError;
use crate::services::shopping::{self as shopping_svc, Added};
use crate::state::AppState;

/// `GET /api/shopping-list` — open items first.
pub async fn list(State(state): State<AppState>, auth: AuthUser) -> Result<Json<Vec<ShoppingItem>>, ApiError> {
    let mut tx = user_tx(&state, auth.user.id).await?;
    let items = shopping_svc::list(&mut tx).await?;
    commit(tx).await?;
    Ok(Json(items))
}

/// `POST /api/shopping-list` — `201` for a new entry, `200` when the item
/// was folded into an open entry with the same name and unit.
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    payload: Result<Json<NewShoppingItem>, JsonRejection>,
) -> Result<(StatusCode, Json<ShoppingItem>), ApiError> {
    let Json(input) = payload?;
    let mut tx = user_tx(&state, auth.user.id).await?;
    let added = shopping_svc::create(&mut tx, input).await?;
    commit(tx).await?;
    let status = match added {
        Added::Inserted(_) => StatusCode::CREATED,
        Added::Merged(_) => StatusCode::OK,
    };
    Ok((status, Json(added.into_item())))
}

/// `PATCH /api/shopping-list/{id}` — set the purchased flag.
pub async fn update(
    State(state): State<AppState>,
    auth: AuthUser,
    id: Result<Path<Uuid>, PathRejection>,
    payload: Result<Json<ShoppingItemPatch>, JsonRejection>,
) -> Result<Json<ShoppingItem>, ApiError> {
    let Path(id) = id?;
    let Json(patch) = payload?;
    let mut tx = user_tx(&state, auth.user.id).await?;
    let item = shopping_svc::set_purchased(&mut tx, id, patch.is_purchased).await?;
    commit(tx).await?;
    Ok(Json(item))
}

/// `DELETE /api/shopping-list/{id}`
pub async fn delete(
    State(state): State<AppState>,
    auth: AuthUser,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<StatusCode, ApiError> {
    let Path(id) = id?;
    let mut tx = user_tx(&state, auth.user.id).await?;
    shopping_svc::delete(&mut tx, id).await?;
    commit(tx).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// `POST /api/shopping-list/from-recipe/{recipe_id}` — returns only the
/// items that were added.
pub async fn from_recipe(
    State(state): State<AppState>,
    auth: AuthUser,
    recipe_id: Result<Path<Uuid>, PathRejection>,
) -> Result<(StatusCode, Json<Vec<ShoppingItem>>), ApiError> {
    let Path(recipe_id) = recipe_id?;
    let mut tx = user_tx(&state, auth.user.id).await?;
    let added = shopping_svc::add_from_recipe(&mut tx, recipe_id).await?;
    commit(tx).await?;
    Ok((StatusCode::CREATED, Json(added)))
}
