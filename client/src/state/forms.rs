//! Form buffers as typed by the user, and their conversion into requests.
//!
//! Every field is kept as raw text until submit so a half-typed date or
//! quantity never has to be representable. `to_request` is the only place
//! the text is validated.

#[cfg(test)]
#[path = "forms_test.rs"]
mod forms_test;

use models::{
    Ingredient, IngredientPatch, LoginRequest, MealPlanRequest, NewIngredient, NewShoppingItem, NutritionRequest,
    PriceRequest, RecommendRequest, RegisterRequest,
};
use time::Date;

use crate::i18n::MessageKey;
use crate::util::text::split_list;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct IngredientForm {
    pub name: String,
    pub quantity: String,
    pub unit: String,
    pub purchase_date: String,
    pub expiry_date: String,
    pub location: String,
    pub category: String,
}

impl IngredientForm {
    /// Prefill from an existing row for editing.
    pub fn from_ingredient(ingredient: &Ingredient) -> Self {
        let date = |d: Option<Date>| d.map(models::date::format_date).unwrap_or_default();
        Self {
            name: ingredient.name.clone(),
            quantity: models::ingredient::format_quantity(ingredient.quantity),
            unit: ingredient.unit.clone(),
            purchase_date: date(ingredient.purchase_date),
            expiry_date: date(ingredient.expiry_date),
            location: ingredient.location.clone(),
            category: ingredient.category.clone(),
        }
    }

    /// Validate and convert. A blank quantity means one; blank dates mean none.
    ///
    /// # Errors
    ///
    /// The message key of the first invalid field.
    pub fn to_request(&self) -> Result<NewIngredient, MessageKey> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(MessageKey::FormNameRequired);
        }
        Ok(NewIngredient {
            name: name.to_owned(),
            quantity: parse_quantity(&self.quantity)?,
            unit: self.unit.trim().to_owned(),
            purchase_date: parse_optional_date(&self.purchase_date)?,
            expiry_date: parse_optional_date(&self.expiry_date)?,
            location: self.location.trim().to_owned(),
            category: self.category.trim().to_owned(),
        })
    }

    /// Every field as a patch for an existing row. Blank dates leave the
    /// stored dates unchanged.
    ///
    /// # Errors
    ///
    /// Same as [`Self::to_request`].
    pub fn to_patch(&self) -> Result<IngredientPatch, MessageKey> {
        let full = self.to_request()?;
        Ok(IngredientPatch {
            name: Some(full.name),
            quantity: Some(full.quantity),
            unit: Some(full.unit),
            purchase_date: full.purchase_date,
            expiry_date: full.expiry_date,
            location: Some(full.location),
            category: Some(full.category),
        })
    }
}

/// Blank means one; anything else must be a finite, non-negative number.
pub fn parse_quantity(raw: &str) -> Result<f64, MessageKey> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(1.0);
    }
    match raw.parse::<f64>() {
        Ok(q) if q.is_finite() && q >= 0.0 => Ok(q),
        _ => Err(MessageKey::FormQuantityInvalid),
    }
}

/// Blank means no date; anything else must be `YYYY-MM-DD`.
pub fn parse_optional_date(raw: &str) -> Result<Option<Date>, MessageKey> {
    if raw.trim().is_empty() {
        return Ok(None);
    }
    models::date::parse_date(raw).map(Some).map_err(|_| MessageKey::FormDateInvalid)
}

/// Free-text preference and allergy fields of the recommendation panel.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PreferenceForm {
    pub preferences_text: String,
    pub allergies_text: String,
}

impl PreferenceForm {
    pub fn to_request(&self) -> RecommendRequest {
        RecommendRequest {
            preferences: split_list(&self.preferences_text),
            allergies: split_list(&self.allergies_text),
        }
    }
}

/// Inputs of the AI panels. Each panel reads only the fields it shows.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AskForm {
    pub preferences: PreferenceForm,
    pub days: String,
    pub goals: String,
    pub meals_text: String,
    pub notes: String,
    pub items_text: String,
}

const MAX_PLAN_DAYS: u8 = 7;

impl AskForm {
    pub fn recommend_request(&self) -> RecommendRequest {
        self.preferences.to_request()
    }

    /// Blank days keep the server default.
    ///
    /// # Errors
    ///
    /// [`MessageKey::FormDaysInvalid`] unless days is blank or `1..=7`.
    pub fn meal_plan_request(&self) -> Result<MealPlanRequest, MessageKey> {
        let prefs = self.preferences.to_request();
        let days = match self.days.trim() {
            "" => MealPlanRequest::default().days,
            raw => match raw.parse::<u8>() {
                Ok(days) if (1..=MAX_PLAN_DAYS).contains(&days) => days,
                _ => return Err(MessageKey::FormDaysInvalid),
            },
        };
        Ok(MealPlanRequest {
            days,
            goals: self.goals.trim().to_owned(),
            preferences: prefs.preferences,
            allergies: prefs.allergies,
        })
    }

    pub fn nutrition_request(&self) -> NutritionRequest {
        NutritionRequest { meals: split_list(&self.meals_text), notes: self.notes.trim().to_owned() }
    }

    /// An empty list prices the pantry.
    pub fn price_request(&self) -> PriceRequest {
        PriceRequest { items: split_list(&self.items_text) }
    }
}

/// Add-item row of the shopping list.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ShoppingForm {
    pub item_name: String,
    pub quantity: String,
    pub unit: String,
}

impl ShoppingForm {
    /// A blank quantity is left unspecified.
    ///
    /// # Errors
    ///
    /// [`MessageKey::FormNameRequired`] or [`MessageKey::FormQuantityInvalid`].
    pub fn to_request(&self) -> Result<NewShoppingItem, MessageKey> {
        let item_name = self.item_name.trim();
        if item_name.is_empty() {
            return Err(MessageKey::FormNameRequired);
        }
        let quantity = if self.quantity.trim().is_empty() { None } else { Some(parse_quantity(&self.quantity)?) };
        Ok(NewShoppingItem { item_name: item_name.to_owned(), quantity, unit: self.unit.trim().to_owned() })
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    /// # Errors
    ///
    /// [`MessageKey::FormEmailRequired`] or [`MessageKey::FormPasswordRequired`].
    pub fn to_request(&self) -> Result<LoginRequest, MessageKey> {
        let (email, password) = credentials(&self.email, &self.password)?;
        Ok(LoginRequest { email, password })
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RegisterForm {
    pub email: String,
    pub name: String,
    pub password: String,
}

impl RegisterForm {
    /// # Errors
    ///
    /// [`MessageKey::FormEmailRequired`] or [`MessageKey::FormPasswordRequired`].
    pub fn to_request(&self) -> Result<RegisterRequest, MessageKey> {
        let (email, password) = credentials(&self.email, &self.password)?;
        Ok(RegisterRequest { email, name: self.name.trim().to_owned(), password })
    }
}

fn credentials(email: &str, password: &str) -> Result<(String, String), MessageKey> {
    let email = email.trim();
    if email.is_empty() {
        return Err(MessageKey::FormEmailRequired);
    }
    if password.is_empty() {
        return Err(MessageKey::FormPasswordRequired);
    }
    Ok((email.to_owned(), password.to_owned()))
}
