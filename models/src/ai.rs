//! AI endpoint payloads.
//!
//! Every AI endpoint answers with an [`AiReply`]: the model's text for
//! display plus, when the text contained a parsable JSON block, that block
//! as `structured`.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use time::{Date, Duration};

use crate::ingredient::NewIngredient;
use crate::recipe::NewRecipe;

/// Body of `POST /api/ai/recipes`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendRequest {
    #[serde(default)]
    pub preferences: Vec<String>,
    #[serde(default)]
    pub allergies: Vec<String>,
}

/// Body of `POST /api/ai/meal-plan`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MealPlanRequest {
    #[serde(default = "default_days")]
    pub days: u8,
    #[serde(default)]
    pub goals: String,
    #[serde(default)]
    pub preferences: Vec<String>,
    #[serde(default)]
    pub allergies: Vec<String>,
}

fn default_days() -> u8 {
    3
}

impl Default for MealPlanRequest {
    fn default() -> Self {
        Self { days: default_days(), goals: String::new(), preferences: Vec::new(), allergies: Vec::new() }
    }
}

/// Body of `POST /api/ai/nutrition`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NutritionRequest {
    /// Meals to analyse, e.g. `"점심: 김치찌개"`.
    #[serde(default)]
    pub meals: Vec<String>,
    #[serde(default)]
    pub notes: String,
}

/// Body of `POST /api/ai/price`. An empty list prices the caller's ingredients.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceRequest {
    #[serde(default)]
    pub items: Vec<String>,
}

/// Body of `POST /api/ai/substitutes`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubstituteRequest {
    pub ingredient: String,
    #[serde(default)]
    pub recipe: String,
}

/// Body of `POST /api/ai/cooking-tip`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CookingTipRequest {
    pub recipe: String,
    #[serde(default = "default_step")]
    pub step: u32,
}

fn default_step() -> u32 {
    1
}

/// Response of every AI endpoint.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AiReply {
    /// Display text as produced by the model.
    pub text: String,
    /// JSON block extracted from `text`, when one parsed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub structured: Option<Value>,
    /// Ingredient names the prompt was built from.
    #[serde(default)]
    pub ingredients: Vec<String>,
    /// Model that answered; empty when no model was called.
    #[serde(default)]
    pub model: String,
}

impl AiReply {
    /// Recipes carried in `structured`, if it is an array of recipe objects.
    #[must_use]
    pub fn suggested_recipes(&self) -> Vec<SuggestedRecipe> {
        let Some(Value::Array(items)) = &self.structured else {
            return Vec::new();
        };
        items
            .iter()
            .filter_map(|item| serde_json::from_value::<SuggestedRecipe>(item.clone()).ok())
            .filter(|recipe| !recipe.name.trim().is_empty())
            .collect()
    }
}

/// One recipe suggested by the model. Decoding is lenient because model
/// output drifts: numbers may arrive as strings and lists as arrays.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SuggestedRecipe {
    pub name: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub description: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub ingredients: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub instructions: String,
    #[serde(default, deserialize_with = "lenient_minutes")]
    pub cooking_time: Option<i32>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub difficulty: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub category: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub nutrition_info: String,
}

impl From<SuggestedRecipe> for NewRecipe {
    fn from(recipe: SuggestedRecipe) -> Self {
        Self {
            name: recipe.name,
            description: recipe.description,
            ingredients_list: recipe.ingredients,
            instructions: recipe.instructions,
            cooking_time: recipe.cooking_time,
            difficulty: recipe.difficulty,
            category: recipe.category,
            nutrition_info: recipe.nutrition_info,
        }
    }
}

/// Body of `POST /api/ai/recognize`: one photo, base64-encoded.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecognizeRequest {
    pub image_base64: String,
    /// `image/jpeg`, `image/png`, ...
    #[serde(default = "default_mime_type")]
    pub mime_type: String,
}

fn default_mime_type() -> String {
    "image/jpeg".to_owned()
}

/// Ingredient the model saw in a photo.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RecognizedIngredient {
    pub name: String,
    #[serde(default, deserialize_with = "lenient_number")]
    pub quantity: Option<f64>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub unit: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub category: String,
    #[serde(default, deserialize_with = "lenient_days")]
    pub estimated_expiry_days: Option<i64>,
}

impl RecognizedIngredient {
    /// Pantry row bought `today`, expiring after the estimated shelf life.
    #[must_use]
    pub fn to_new_ingredient(&self, today: Date) -> NewIngredient {
        NewIngredient {
            name: self.name.trim().to_owned(),
            quantity: self.quantity.filter(|q| q.is_finite() && *q >= 0.0).unwrap_or(1.0),
            unit: self.unit.trim().to_owned(),
            purchase_date: Some(today),
            expiry_date: self
                .estimated_expiry_days
                .filter(|days| *days >= 0)
                .and_then(|days| today.checked_add(Duration::days(days))),
            location: String::new(),
            category: self.category.trim().to_owned(),
        }
    }
}

/// Response of `POST /api/ai/recognize`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RecognizedIngredients {
    #[serde(default)]
    pub ingredients: Vec<RecognizedIngredient>,
    /// Model's own confidence on a 0 to 10 scale.
    #[serde(default, deserialize_with = "lenient_confidence")]
    pub confidence: f64,
    /// Model that answered.
    #[serde(default)]
    pub model: String,
}

impl RecognizedIngredients {
    /// Decode the model's JSON block. Entries without a name are dropped and
    /// anything undecodable yields an empty result with zero confidence.
    #[must_use]
    pub fn from_value(value: &Value) -> Self {
        let Ok(mut parsed) = serde_json::from_value::<Self>(value.clone()) else {
            return Self::default();
        };
        parsed.ingredients.retain(|item| !item.name.trim().is_empty());
        parsed
    }
}

fn lenient_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(value_to_text(&Value::deserialize(deserializer)?))
}

fn value_to_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(text) => text.clone(),
        Value::Array(items) => items
            .iter()
            .map(value_to_text)
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(", "),
        other => other.to_string(),
    }
}

fn lenient_minutes<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<i32>, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Number(n) => n.as_i64().and_then(|n| i32::try_from(n).ok()),
        Value::String(text) => {
            let digits: String = text.chars().filter(char::is_ascii_digit).collect();
            digits.parse().ok()
        }
        _ => None,
    })
}

fn lenient_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_f64(),
        Value::String(text) => {
            let numeric: String = text.chars().filter(|c| c.is_ascii_digit() || *c == '.').collect();
            numeric.parse().ok()
        }
        _ => None,
    })
}

#[allow(clippy::cast_possible_truncation)]
fn lenient_days<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<i64>, D::Error> {
    Ok(lenient_number(deserializer)?.map(|days| days.round() as i64))
}

fn lenient_confidence<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    Ok(lenient_number(deserializer)?.map_or(0.0, |c| c.clamp(0.0, 10.0)))
}
