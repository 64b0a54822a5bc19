//! Ingredient records and the dashboard aggregate.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use time::Date;
use uuid::Uuid;

use crate::expiry::ExpiryStatus;

/// One row of the caller's ingredient list.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    pub id: Uuid,
    pub name: String,
    pub quantity: f64,
    pub unit: String,
    #[serde(with = "crate::date::option", default)]
    pub purchase_date: Option<Date>,
    #[serde(with = "crate::date::option", default)]
    pub expiry_date: Option<Date>,
    pub location: String,
    pub category: String,
}

impl Ingredient {
    /// Freshness of this ingredient relative to `today`.
    #[must_use]
    pub fn status(&self, today: Date, soon_days: i64) -> ExpiryStatus {
        ExpiryStatus::classify(self.expiry_date, today, soon_days)
    }

    /// `"양파 (2 개)"`-style label used in prompts and listings.
    #[must_use]
    pub fn label(&self) -> String {
        format!("{} ({} {})", self.name, format_quantity(self.quantity), self.unit)
    }
}

/// Render a quantity without a trailing `.0` for whole numbers.
#[must_use]
pub fn format_quantity(quantity: f64) -> String {
    if quantity.fract() == 0.0 && quantity.abs() < 1e15 {
        format!("{quantity:.0}")
    } else {
        format!("{quantity}")
    }
}

/// Body of `POST /api/ingredients`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NewIngredient {
    pub name: String,
    #[serde(default = "default_quantity")]
    pub quantity: f64,
    #[serde(default)]
    pub unit: String,
    #[serde(with = "crate::date::option", default)]
    pub purchase_date: Option<Date>,
    #[serde(with = "crate::date::option", default)]
    pub expiry_date: Option<Date>,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub category: String,
}

fn default_quantity() -> f64 {
    1.0
}

/// Body of `PATCH /api/ingredients/{id}`. Absent fields are left unchanged.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct IngredientPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(with = "crate::date::option", default, skip_serializing_if = "Option::is_none")]
    pub purchase_date: Option<Date>,
    #[serde(with = "crate::date::option", default, skip_serializing_if = "Option::is_none")]
    pub expiry_date: Option<Date>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl IngredientPatch {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Aggregate counts behind the dashboard charts.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardStats {
    pub total: i64,
    pub expired: i64,
    pub expiring_soon: i64,
    pub fresh: i64,
    pub no_expiry: i64,
    /// Ingredient count per category; blank categories are grouped under `"기타"`.
    pub categories: BTreeMap<String, i64>,
    /// Ingredient count per storage location.
    pub locations: BTreeMap<String, i64>,
    /// Window used for `expiring_soon`, in days.
    pub soon_days: i64,
}

/// Fallback bucket for blank category or location values.
pub const UNSORTED_BUCKET: &str = "기타";

impl DashboardStats {
    /// Aggregate a full ingredient list.
    #[must_use]
    pub fn from_ingredients(ingredients: &[Ingredient], today: Date, soon_days: i64) -> Self {
        let mut stats = Self { soon_days, ..Self::default() };
        for ingredient in ingredients {
            stats.total += 1;
            match ingredient.status(today, soon_days) {
                ExpiryStatus::Expired => stats.expired += 1,
                ExpiryStatus::ExpiringSoon => stats.expiring_soon += 1,
                ExpiryStatus::Fresh => stats.fresh += 1,
                ExpiryStatus::Unknown => stats.no_expiry += 1,
            }
            *stats
                .categories
                .entry(bucket_name(&ingredient.category))
                .or_insert(0) += 1;
            *stats
                .locations
                .entry(bucket_name(&ingredient.location))
                .or_insert(0) += 1;
        }
        stats
    }
}

fn bucket_name(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() { UNSORTED_BUCKET.to_owned() } else { trimmed.to_owned() }
}
