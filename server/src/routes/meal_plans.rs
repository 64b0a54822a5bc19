//! Planned meals over a date range.

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::Json;
use models::{MealPlan, NewMealPlan};
use serde::Deserialize;
use time::Date;
use uuid::Uuid;

use super::auth::AuthUser;
use super::{commit, user_tx};
use crate::error::ApiError;
use crate::services::meal_plan as meal_plan_svc;
use crate::state::AppState;

/// Inclusive `from` / `to` bounds, `YYYY-MM-DD`.
#[derive(Debug, Default, Deserialize)]
pub struct RangeQuery {
    #[serde(with = "models::date::option", default)]
    pub from: Option<Date>,
    #[serde(with = "models::date::option", default)]
    pub to: Option<Date>,
}

/// `GET /api/meal-plans?from=…&to=…`
pub async fn list(
    State(state): State<AppState>,
    auth: AuthUser,
    query: Result<Query<RangeQuery>, QueryRejection>,
) -> Result<Json<Vec<MealPlan>>, ApiError> {
    let Query(range) = query?;
    let mut tx = user_tx(&state, auth.user.id).await?;
    let plans = meal_plan_svc::list(&mut tx, range.from, range.to).await?;
    commit(tx).await?;
    Ok(Json(plans))
}

/// `POST /api/meal-plans`
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    payload: Result<Json<NewMealPlan>, JsonRejection>,
) -> Result<(StatusCode, Json<MealPlan>), ApiError> {
    let Json(input) = payload?;
    let mut tx = user_tx(&state, auth.user.id).await?;
    let plan = meal_plan_svc::create(&mut tx, input).await?;
    commit(tx).await?;
    Ok((StatusCode::CREATED, Json(plan)))
}

/// `DELETE /api/meal-plans/{id}`
pub async fn delete(
    State(state): State<AppState>,
    auth: AuthUser,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<StatusCode, ApiError> {
    let Path(id) = id?;
    let mut tx = user_tx(&state, auth.user.id).await?;
    meal_plan_svc::delete(&mut tx, id).await?;
    commit(tx).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    #[test]
    fn range_query_parses_dates() {
        let uri: axum::http::Uri = "/api/meal-plans?from=2024-06-01&to=2024-06-07".parse().unwrap();
        let Query(range) = Query::<RangeQuery>::try_from_uri(&uri).unwrap();
        assert_eq!(range.from, Some(date!(2024 - 06 - 01)));
        assert_eq!(range.to, Some(date!(2024 - 06 - 07)));
    }

    #[test]
    fn range_query_bounds_are_optional() {
        let uri: axum::http::Uri = "/api/meal-plans?from=".parse().unwrap();
        let Query(range) = Query::<RangeQuery>::try_from_uri(&uri).unwrap();
        assert!(range.from.is_none());
        assert!(range.to.is_none());
    }

    #[test]
    fn range_query_rejects_bad_dates() {
        let uri: axum::http::Uri = "/api/meal-plans?from=06/01/2024".parse().unwrap();
        assert!(Query::<RangeQuery>::try_from_uri(&uri).is_err());
    }
}
