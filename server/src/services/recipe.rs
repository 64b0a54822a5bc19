//! Saved recipes.
//!
//! Recipes arrive either typed by the user or converted from an AI
//! suggestion. The free-text ingredient list is also the source for
//! "add missing ingredients to the shopping list".

use std::collections::HashSet;

use sqlx::postgres::PgRow;
use sqlx::{PgConnection, Row};
use uuid::Uuid;

use models::{NewRecipe, Recipe};

use super::store::{StoreError, expect_affected, required_text, text_or_empty};

const COLUMNS: &str =
    "id, name, description, ingredients_list, instructions, cooking_time, difficulty, category, nutrition_info";

fn row_to_recipe(row: &PgRow) -> Recipe {
    Recipe {
        id: row.get("id"),
        name: row.get("name"),
        description: text_or_empty(row, "description"),
        ingredients_list: text_or_empty(row, "ingredients_list"),
        instructions: text_or_empty(row, "instructions"),
        cooking_time: row.get("cooking_time"),
        difficulty: text_or_empty(row, "difficulty"),
        category: text_or_empty(row, "category"),
        nutrition_info: text_or_empty(row, "nutrition_info"),
    }
}

pub fn validate_new(input: NewRecipe) -> Result<NewRecipe, StoreError> {
    let name = required_text("name", &input.name)?;
    if input.cooking_time.is_some_and(|minutes| minutes <= 0) {
        return Err(StoreError::Invalid("cooking_time must be a positive number of minutes".into()));
    }
    Ok(NewRecipe {
        name,
        description: input.description.trim().to_owned(),
        ingredients_list: input.ingredients_list.trim().to_owned(),
        instructions: input.instructions.trim().to_owned(),
        cooking_time: input.cooking_time,
        difficulty: input.difficulty.trim().to_owned(),
        category: input.category.trim().to_owned(),
        nutrition_info: input.nutrition_info.trim().to_owned(),
    })
}

/// Ingredient names from a free-text list such as `"김치 200g, 두부(1모)\n대파"`.
///
/// Items split on commas and newlines; a parenthesised note is dropped.
#[must_use]
pub fn ingredient_names(list: &str) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for item in list.split([',', '\n']) {
        let name = item.split('(').next().unwrap_or_default().trim();
        let name = name.trim_start_matches(['-', '*', '•']).trim();
        if name.is_empty() || names.iter().any(|n| n.eq_ignore_ascii_case(name)) {
            continue;
        }
        names.push(name.to_owned());
    }
    names
}

/// Comparison key for an ingredient name: trimmed, lowercased, and without
/// a trailing amount such as `"200g"`, `"1.5 kg"` or `"2 개"`.
#[must_use]
pub fn normalized_name(raw: &str) -> String {
    let lowered = raw.trim().to_lowercase();
    let words: Vec<&str> = lowered.split_whitespace().collect();
    let end = words
        .iter()
        .skip(1)
        .position(|w| starts_with_amount(w))
        .map_or(words.len(), |i| i + 1);
    let name = words[..end].join(" ");
    match name.find(|c: char| c.is_ascii_digit()) {
        Some(at) if at > 0 && name[at..].chars().all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '/')) => {
            name[..at].trim_end().to_owned()
        }
        _ => name,
    }
}

fn starts_with_amount(word: &str) -> bool {
    word.chars()
        .next()
        .is_some_and(|c| c.is_ascii_digit() || matches!(c, '½' | '¼' | '¾'))
}

/// Items of `needed` that no held ingredient matches. Names match when
/// their [`normalized_name`] keys are equal, so `"물"` is not covered by
/// `"물엿"`.
#[must_use]
pub fn missing_ingredients(needed: &[String], held: &[String]) -> Vec<String> {
    let held: HashSet<String> = held
        .iter()
        .map(|h| normalized_name(h))
        .filter(|h| !h.is_empty())
        .collect();
    needed
        .iter()
        .filter(|item| !held.contains(&normalized_name(item)))
        .cloned()
        .collect()
}

pub async fn list(conn: &mut PgConnection, category: Option<&str>) -> Result<Vec<Recipe>, StoreError> {
    let sql = format!(
        "SELECT {COLUMNS} FROM recipes
         WHERE ($1::text IS NULL OR category = $1)
         ORDER BY created_at DESC"
    );
    let rows = sqlx::query(&sql)
        .bind(category.map(str::trim).filter(|c| !c.is_empty()))
        .fetch_all(conn)
        .await?;
    Ok(rows.iter().map(row_to_recipe).collect())
}

pub async fn get(conn: &mut PgConnection, id: Uuid) -> Result<Recipe, StoreError> {
    let sql = format!("SELECT {COLUMNS} FROM recipes WHERE id = $1");
    let row = sqlx::query(&sql)
        .bind(id)
        .fetch_optional(conn)
        .await?
        .ok_or(StoreError::NotFound)?;
    Ok(row_to_recipe(&row))
}

pub async fn create(conn: &mut PgConnection, input: NewRecipe) -> Result<Recipe, StoreError> {
    let input = validate_new(input)?;
    let sql = format!(
        "INSERT INTO recipes
             (user_id, name, description, ingredients_list, instructions,
              cooking_time, difficulty, category, nutrition_info)
         VALUES (app_user_id(), $1, $2, $3, $4, $5, $6, $7, $8)
         RETURNING {COLUMNS}"
    );
    let row = sqlx::query(&sql)
        .bind(&input.name)
        .bind(&input.description)
        .bind(&input.ingredients_list)
        .bind(&input.instructions)
        .bind(input.cooking_time)
        .bind(&input.difficulty)
        .bind(&input.category)
        .bind(&input.nutrition_info)
        .fetch_one(conn)
        .await?;
    Ok(row_to_recipe(&row))
}

pub async fn delete(conn: &mut PgConnection, id: Uuid) -> Result<(), StoreError> {
    let result = sqlx::query("DELETE FROM recipes WHERE id = $1")
        .bind(id)
        .execute(conn)
        .await?;
    expect_affected(result.rows_affected())
}

#[cfg(test)]
#[path = "recipe_test.rs"]
mod tests;
