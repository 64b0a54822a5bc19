//! Planned meals, joined with the linked recipe's name.

use sqlx::postgres::PgRow;
use sqlx::{PgConnection, Row};
use time::Date;
use uuid::Uuid;

use models::recipe::MEAL_TYPES;
use models::{MealPlan, NewMealPlan};

use super::store::{StoreError, expect_affected, text_or_empty};

fn row_to_meal_plan(row: &PgRow) -> MealPlan {
    MealPlan {
        id: row.get("id"),
        recipe_id: row.get("recipe_id"),
        recipe_name: row.get("recipe_name"),
        plan_date: row.get("plan_date"),
        meal_type: row.get("meal_type"),
        notes: text_or_empty(row, "notes"),
    }
}

/// Lowercase and check the meal slot.
pub fn normalize_meal_type(raw: &str) -> Result<String, StoreError> {
    let meal_type = raw.trim().to_ascii_lowercase();
    if MEAL_TYPES.contains(&meal_type.as_str()) {
        Ok(meal_type)
    } else {
        Err(StoreError::Invalid(format!("meal_type must be one of {}", MEAL_TYPES.join(", "))))
    }
}

/// Reject a reversed range.
pub fn check_range(from: Option<Date>, to: Option<Date>) -> Result<(), StoreError> {
    match (from, to) {
        (Some(from), Some(to)) if from > to => Err(StoreError::Invalid("from must not be after to".into())),
        _ => Ok(()),
    }
}

/// Meals between `from` and `to` inclusive (either bound optional), by date.
pub async fn list(conn: &mut PgConnection, from: Option<Date>, to: Option<Date>) -> Result<Vec<MealPlan>, StoreError> {
    check_range(from, to)?;
    let rows = sqlx::query(
        r"SELECT mp.id, mp.recipe_id, r.name AS recipe_name, mp.plan_date, mp.meal_type, mp.notes
          FROM meal_plans mp
          LEFT JOIN recipes r ON r.id = mp.recipe_id
          WHERE ($1::date IS NULL OR mp.plan_date >= $1)
            AND ($2::date IS NULL OR mp.plan_date <= $2)
          ORDER BY mp.plan_date ASC,
                   array_position(ARRAY['breakfast','lunch','dinner','snack'], mp.meal_type) ASC",
    )
    .bind(from)
    .bind(to)
    .fetch_all(conn)
    .await?;
    Ok(rows.iter().map(row_to_meal_plan).collect())
}

/// Add a meal. A linked recipe must be visible to the caller.
pub async fn create(conn: &mut PgConnection, input: NewMealPlan) -> Result<MealPlan, StoreError> {
    let meal_type = normalize_meal_type(&input.meal_type)?;
    let recipe_name: Option<String> = match input.recipe_id {
        Some(recipe_id) => Some(
            sqlx::query_scalar("SELECT name FROM recipes WHERE id = $1")
                .bind(recipe_id)
                .fetch_optional(&mut *conn)
                .await?
                .ok_or_else(|| StoreError::Invalid("recipe_id does not name a saved recipe".into()))?,
        ),
        None => None,
    };

    let row = sqlx::query(
        r"INSERT INTO meal_plans (user_id, recipe_id, plan_date, meal_type, notes)
          VALUES (app_user_id(), $1, $2, $3, $4)
          RETURNING id, recipe_id, plan_date, meal_type, notes",
    )
    .bind(input.recipe_id)
    .bind(input.plan_date)
    .bind(&meal_type)
    .bind(input.notes.trim())
    .fetch_one(conn)
    .await?;

    Ok(MealPlan {
        id: row.get("id"),
        recipe_id: row.get("recipe_id"),
        recipe_name,
        plan_date: row.get("plan_date"),
        meal_type: row.get("meal_type"),
        notes: text_or_empty(&row, "notes"),
    })
}

pub async fn delete(conn: &mut PgConnection, id: Uuid) -> Result<(), StoreError> {
    let result = sqlx::query("DELETE FROM meal_plans WHERE id = $1")
        .bind(id)
        .execute(conn)
        .await?;
    expect_affected(result.rows_affected())
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    #[test]
    fn meal_type_is_case_insensitive() {
        assert_eq!(normalize_meal_type(" Dinner ").unwrap(), "dinner");
    }

    #[test]
    fn unknown_meal_type_rejected() {
        let err = normalize_meal_type("brunch").unwrap_err();
        assert_eq!(err.to_string(), "meal_type must be one of breakfast, lunch, dinner, snack");
    }

    #[test]
    fn reversed_range_rejected() {
        assert!(check_range(Some(date!(2024 - 06 - 10)), Some(date!(2024 - 06 - 09))).is_err());
        assert!(check_range(Some(date!(2024 - 06 - 10)), Some(date!(2024 - 06 - 10))).is_ok());
        assert!(check_range(None, Some(date!(2024 - 06 - 10))).is_ok());
    }
}
