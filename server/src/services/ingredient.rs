//! Ingredient CRUD and expiry queries.
//!
//! Every function runs on a connection already bound to the caller by
//! [`crate::db::begin_for_user`]; row-level security scopes reads and writes
//! to that caller, so no query here filters on `user_id` itself.

use sqlx::postgres::PgRow;
use sqlx::{PgConnection, Row};
use time::{Date, Duration};
use uuid::Uuid;

use models::{Ingredient, IngredientPatch, NewIngredient};

use super::store::{StoreError, check_quantity, expect_affected, required_text, text_or_empty};

pub const DEFAULT_LOCATION: &str = "냉장고";
pub const DEFAULT_CATEGORY: &str = "기타";

const COLUMNS: &str = "id, name, quantity, unit, purchase_date, expiry_date, location, category";

/// Optional equality filters for [`list`].
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Deserialize)]
pub struct IngredientFilter {
    pub category: Option<String>,
    pub location: Option<String>,
}

impl IngredientFilter {
    fn normalized(value: Option<&String>) -> Option<&str> {
        value.map(|v| v.trim()).filter(|v| !v.is_empty())
    }
}

fn row_to_ingredient(row: &PgRow) -> Ingredient {
    Ingredient {
        id: row.get("id"),
        name: row.get("name"),
        quantity: row.get("quantity"),
        unit: text_or_empty(row, "unit"),
        purchase_date: row.get("purchase_date"),
        expiry_date: row.get("expiry_date"),
        location: text_or_empty(row, "location"),
        category: text_or_empty(row, "category"),
    }
}

// =============================================================================
// VALIDATION
// =============================================================================

/// Trim text fields, require a name, and fill blank location/category.
pub fn validate_new(input: NewIngredient) -> Result<NewIngredient, StoreError> {
    let name = required_text("name", &input.name)?;
    let quantity = check_quantity(input.quantity)?;
    let location = input.location.trim();
    let category = input.category.trim();
    Ok(NewIngredient {
        name,
        quantity,
        unit: input.unit.trim().to_owned(),
        purchase_date: input.purchase_date,
        expiry_date: input.expiry_date,
        location: if location.is_empty() { DEFAULT_LOCATION.to_owned() } else { location.to_owned() },
        category: if category.is_empty() { DEFAULT_CATEGORY.to_owned() } else { category.to_owned() },
    })
}

/// Reject empty patches and invalid replacement values.
pub fn validate_patch(mut patch: IngredientPatch) -> Result<IngredientPatch, StoreError> {
    if patch.is_empty() {
        return Err(StoreError::Invalid("nothing to update".into()));
    }
    if let Some(name) = patch.name.as_deref() {
        patch.name = Some(required_text("name", name)?);
    }
    if let Some(quantity) = patch.quantity {
        check_quantity(quantity)?;
    }
    patch.unit = patch.unit.map(|v| v.trim().to_owned());
    patch.location = patch.location.map(|v| v.trim().to_owned());
    patch.category = patch.category.map(|v| v.trim().to_owned());
    Ok(patch)
}

// =============================================================================
// QUERIES
// =============================================================================

/// Caller's ingredients, soonest expiry first (undated last), then by name.
pub async fn list(conn: &mut PgConnection, filter: &IngredientFilter) -> Result<Vec<Ingredient>, StoreError> {
    let sql = format!(
        "SELECT {COLUMNS} FROM ingredients
         WHERE ($1::text IS NULL OR category = $1)
           AND ($2::text IS NULL OR location = $2)
         ORDER BY expiry_date ASC NULLS LAST, name ASC"
    );
    let rows = sqlx::query(&sql)
        .bind(IngredientFilter::normalized(filter.category.as_ref()))
        .bind(IngredientFilter::normalized(filter.location.as_ref()))
        .fetch_all(conn)
        .await?;
    Ok(rows.iter().map(row_to_ingredient).collect())
}

pub async fn get(conn: &mut PgConnection, id: Uuid) -> Result<Ingredient, StoreError> {
    let sql = format!("SELECT {COLUMNS} FROM ingredients WHERE id = $1");
    let row = sqlx::query(&sql)
        .bind(id)
        .fetch_optional(conn)
        .await?
        .ok_or(StoreError::NotFound)?;
    Ok(row_to_ingredient(&row))
}

pub async fn create(conn: &mut PgConnection, input: NewIngredient) -> Result<Ingredient, StoreError> {
    let input = validate_new(input)?;
    let sql = format!(
        "INSERT INTO ingredients
             (user_id, name, quantity, unit, purchase_date, expiry_date, location, category)
         VALUES (app_user_id(), $1, $2, $3, $4, $5, $6, $7)
         RETURNING {COLUMNS}"
    );
    let row = sqlx::query(&sql)
        .bind(&input.name)
        .bind(input.quantity)
        .bind(&input.unit)
        .bind(input.purchase_date)
        .bind(input.expiry_date)
        .bind(&input.location)
        .bind(&input.category)
        .fetch_one(conn)
        .await?;
    Ok(row_to_ingredient(&row))
}

/// Apply the fields present in `patch`; absent fields keep their value.
pub async fn update(conn: &mut PgConnection, id: Uuid, patch: IngredientPatch) -> Result<Ingredient, StoreError> {
    let patch = validate_patch(patch)?;
    let sql = format!(
        "UPDATE ingredients SET
             name = COALESCE($2, name),
             quantity = COALESCE($3, quantity),
             unit = COALESCE($4, unit),
             purchase_date = COALESCE($5, purchase_date),
             expiry_date = COALESCE($6, expiry_date),
             location = COALESCE($7, location),
             category = COALESCE($8, category)
         WHERE id = $1
         RETURNING {COLUMNS}"
    );
    let row = sqlx::query(&sql)
        .bind(id)
        .bind(patch.name)
        .bind(patch.quantity)
        .bind(patch.unit)
        .bind(patch.purchase_date)
        .bind(patch.expiry_date)
        .bind(patch.location)
        .bind(patch.category)
        .fetch_optional(conn)
        .await?
        .ok_or(StoreError::NotFound)?;
    Ok(row_to_ingredient(&row))
}

pub async fn delete(conn: &mut PgConnection, id: Uuid) -> Result<(), StoreError> {
    let result = sqlx::query("DELETE FROM ingredients WHERE id = $1")
        .bind(id)
        .execute(conn)
        .await?;
    expect_affected(result.rows_affected())
}

/// Last day that still counts as "expiring" for a `days`-wide window.
#[must_use]
pub fn expiring_cutoff(today: Date, days: i64) -> Date {
    today
        .checked_add(Duration::days(days.max(0)))
        .unwrap_or(Date::MAX)
}

/// Ingredients expiring on or before `today + days`, already-expired ones
/// included, soonest first.
pub async fn expiring(conn: &mut PgConnection, today: Date, days: i64) -> Result<Vec<Ingredient>, StoreError> {
    let sql = format!(
        "SELECT {COLUMNS} FROM ingredients
         WHERE expiry_date IS NOT NULL AND expiry_date <= $1
         ORDER BY expiry_date ASC, name ASC"
    );
    let rows = sqlx::query(&sql)
        .bind(expiring_cutoff(today, days))
        .fetch_all(conn)
        .await?;
    Ok(rows.iter().map(row_to_ingredient).collect())
}

#[cfg(test)]
#[path = "ingredient_test.rs"]
mod tests;
