//! Shopping list entries.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ShoppingItem {
    pub id: Uuid,
    pub item_name: String,
    pub quantity: Option<f64>,
    #[serde(default)]
    pub unit: String,
    pub is_purchased: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct NewShoppingItem {
    pub item_name: String,
    #[serde(default)]
    pub quantity: Option<f64>,
    #[serde(default)]
    pub unit: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ShoppingItemPatch {
    pub is_purchased: bool,
}
