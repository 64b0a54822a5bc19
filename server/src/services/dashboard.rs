//! Dashboard aggregate over the caller's ingredients.

use sqlx::PgConnection;
use time::Date;

use models::DashboardStats;

use super::ingredient::{self, IngredientFilter};
use super::store::StoreError;

/// Count the caller's ingredients by freshness, category and location.
pub async fn stats(conn: &mut PgConnection, today: Date, soon_days: i64) -> Result<DashboardStats, StoreError> {
    let ingredients = ingredient::list(conn, &IngredientFilter::default()).await?;
    Ok(DashboardStats::from_ingredients(&ingredients, today, soon_days))
}
