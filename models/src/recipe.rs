//! Saved recipes and meal-plan entries.

use serde::{Deserialize, Serialize};
use time::Date;
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Free-text, comma-separated ingredient list as written by the cook.
    #[serde(default)]
    pub ingredients_list: String,
    #[serde(default)]
    pub instructions: String,
    pub cooking_time: Option<i32>,
    #[serde(default)]
    pub difficulty: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub nutrition_info: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct NewRecipe {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub ingredients_list: String,
    #[serde(default)]
    pub instructions: String,
    #[serde(default)]
    pub cooking_time: Option<i32>,
    #[serde(default)]
    pub difficulty: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub nutrition_info: String,
}

/// A planned meal, joined with the recipe name when one is linked.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MealPlan {
    pub id: Uuid,
    pub recipe_id: Option<Uuid>,
    pub recipe_name: Option<String>,
    #[serde(with = "crate::date")]
    pub plan_date: Date,
    /// `breakfast`, `lunch`, `dinner` or `snack`.
    pub meal_type: String,
    #[serde(default)]
    pub notes: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NewMealPlan {
    #[serde(default)]
    pub recipe_id: Option<Uuid>,
    #[serde(with = "crate::date")]
    pub plan_date: Date,
    pub meal_type: String,
    #[serde(default)]
    pub notes: String,
}

/// Meal slots accepted by the API.
pub const MEAL_TYPES: [&str; 4] = ["breakfast", "lunch", "dinner", "snack"];
