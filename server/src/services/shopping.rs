//! Shopping list entries.
//!
//! Adding an item whose name and unit match an open entry folds the new
//! quantity into that entry instead of listing the item twice.

use sqlx::postgres::PgRow;
use sqlx::{PgConnection, Row};
use uuid::Uuid;

use models::{NewShoppingItem, ShoppingItem};

use super::ingredient::{self, IngredientFilter};
use super::recipe;
use super::store::{StoreError, check_quantity, expect_affected, required_text, text_or_empty};

const COLUMNS: &str = "id, item_name, quantity, unit, is_purchased";

fn row_to_item(row: &PgRow) -> ShoppingItem {
    ShoppingItem {
        id: row.get("id"),
        item_name: row.get("item_name"),
        quantity: row.get("quantity"),
        unit: text_or_empty(row, "unit"),
        is_purchased: row.get("is_purchased"),
    }
}

pub fn validate_new(input: NewShoppingItem) -> Result<NewShoppingItem, StoreError> {
    let item_name = required_text("item_name", &input.item_name)?;
    let quantity = input.quantity.map(check_quantity).transpose()?;
    Ok(NewShoppingItem { item_name, quantity, unit: input.unit.trim().to_owned() })
}

/// Open items first, then purchased ones; oldest first within each group.
pub async fn list(conn: &mut PgConnection) -> Result<Vec<ShoppingItem>, StoreError> {
    let sql = format!("SELECT {COLUMNS} FROM shopping_list ORDER BY is_purchased ASC, created_at ASC");
    let rows = sqlx::query(&sql).fetch_all(conn).await?;
    Ok(rows.iter().map(row_to_item).collect())
}

/// Outcome of [`create`].
#[derive(Debug, Clone, PartialEq)]
pub enum Added {
    Inserted(ShoppingItem),
    /// Folded into an open entry with the same name and unit.
    Merged(ShoppingItem),
}

impl Added {
    #[must_use]
    pub fn into_item(self) -> ShoppingItem {
        match self {
            Self::Inserted(item) | Self::Merged(item) => item,
        }
    }
}

/// Quantity of an entry after adding `added` to it. A missing quantity
/// means "some"; it never erases a known amount.
#[must_use]
pub fn merged_quantity(existing: Option<f64>, added: Option<f64>) -> Option<f64> {
    match (existing, added) {
        (Some(a), Some(b)) => Some(a + b),
        (known, None) | (None, known) => known,
    }
}

/// Add `input`, merging it into an open entry with the same name and unit
/// (both compared case-insensitively).
pub async fn create(conn: &mut PgConnection, input: NewShoppingItem) -> Result<Added, StoreError> {
    let input = validate_new(input)?;

    let open_sql = format!(
        "SELECT {COLUMNS} FROM shopping_list
         WHERE NOT is_purchased AND lower(btrim(item_name)) = lower($1) AND lower(btrim(unit)) = lower($2)
         ORDER BY created_at ASC
         LIMIT 1
         FOR UPDATE"
    );
    let open = sqlx::query(&open_sql)
        .bind(&input.item_name)
        .bind(&input.unit)
        .fetch_optional(&mut *conn)
        .await?;
    if let Some(row) = open {
        let existing = row_to_item(&row);
        let quantity = merged_quantity(existing.quantity, input.quantity)
            .map(check_quantity)
            .transpose()?;
        let sql = format!("UPDATE shopping_list SET quantity = $2 WHERE id = $1 RETURNING {COLUMNS}");
        let row = sqlx::query(&sql)
            .bind(existing.id)
            .bind(quantity)
            .fetch_one(conn)
            .await?;
        tracing::debug!(id = %existing.id, "shopping item merged");
        return Ok(Added::Merged(row_to_item(&row)));
    }

    let sql = format!(
        "INSERT INTO shopping_list (user_id, item_name, quantity, unit)
         VALUES (app_user_id(), $1, $2, $3)
         RETURNING {COLUMNS}"
    );
    let row = sqlx::query(&sql)
        .bind(&input.item_name)
        .bind(input.quantity)
        .bind(&input.unit)
        .fetch_one(conn)
        .await?;
    Ok(Added::Inserted(row_to_item(&row)))
}

pub async fn set_purchased(conn: &mut PgConnection, id: Uuid, is_purchased: bool) -> Result<ShoppingItem, StoreError> {
    let sql = format!("UPDATE shopping_list SET is_purchased = $2 WHERE id = $1 RETURNING {COLUMNS}");
    let row = sqlx::query(&sql)
        .bind(id)
        .bind(is_purchased)
        .fetch_optional(conn)
        .await?
        .ok_or(StoreError::NotFound)?;
    Ok(row_to_item(&row))
}

pub async fn delete(conn: &mut PgConnection, id: Uuid) -> Result<(), StoreError> {
    let result = sqlx::query("DELETE FROM shopping_list WHERE id = $1")
        .bind(id)
        .execute(conn)
        .await?;
    expect_affected(result.rows_affected())
}

/// Add each ingredient of a saved recipe that the caller neither holds nor
/// already has on the open shopping list. Returns the inserted items.
pub async fn add_from_recipe(conn: &mut PgConnection, recipe_id: Uuid) -> Result<Vec<ShoppingItem>, StoreError> {
    let recipe = recipe::get(&mut *conn, recipe_id).await?;
    let needed = recipe::ingredient_names(&recipe.ingredients_list);

    let mut covered: Vec<String> = ingredient::list(&mut *conn, &IngredientFilter::default())
        .await?
        .into_iter()
        .map(|i| i.name)
        .collect();
    covered.extend(
        list(&mut *conn)
            .await?
            .into_iter()
            .filter(|item| !item.is_purchased)
            .map(|item| item.item_name),
    );

    let mut added = Vec::new();
    for name in recipe::missing_ingredients(&needed, &covered) {
        let item = NewShoppingItem { item_name: name, quantity: None, unit: String::new() };
        added.push(create(&mut *conn, item).await?.into_item());
    }
    tracing::info!(%recipe_id, added = added.len(), "shopping list filled from recipe");
    Ok(added)
}

#[cfg(test)]
#[path = "shopping_test.rs"]
mod tests;
