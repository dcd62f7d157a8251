//! Produce records as stored by the inventory backend.
//!
//! JSON uses camelCase keys and accepts the backend's `_id` for `id`, so
//! exported documents load unchanged.

use serde::{Deserialize, Serialize};

/// Where an item sits in the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub aisle: String,
    pub section: String,
    pub shelf: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<Coordinates>,
}

/// Position on the store floor plan.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub x: f64,
    pub y: f64,
}

/// Per-serving nutrition facts. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NutritionalInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calories: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protein: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub carbs: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fat: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fiber: Option<f64>,
}

/// One sellable produce item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Produce {
    #[serde(alias = "_id")]
    pub id: String,
    pub name: String,
    /// One of `fruits`, `vegetables`, `herbs`, `organic`, `berries`,
    /// `citrus`, `tropical`, `root_vegetables`, `leafy_greens`.
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subcategory: Option<String>,
    pub price: f64,
    pub location: Location,
    #[serde(default)]
    pub stock: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub barcode: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    /// Selling unit: `lb`, `kg`, `each`, `bunch`, `bag`, `container`, `oz`, `gram`.
    pub unit: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nutritional_info: Option<NutritionalInfo>,
    #[serde(default)]
    pub is_organic: bool,
    #[serde(default)]
    pub is_local: bool,
    #[serde(default)]
    pub seasonality: Vec<String>,
}

impl Produce {
    /// The text fields free-text queries look at, skipping absent ones.
    pub fn searchable_fields(&self) -> impl Iterator<Item = &str> {
        [Some(self.name.as_str()), Some(self.category.as_str()), self.subcategory.as_deref(), self.brand.as_deref()]
            .into_iter()
            .flatten()
    }

    #[must_use]
    pub fn in_stock(&self) -> bool {
        self.stock > 0
    }
}
