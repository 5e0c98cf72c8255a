//! Product Model

use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

use super::serde_helpers;

/// Catalog product
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<RecordId>,
    pub name: String,
    pub category: String,
    pub price: f64,
    /// Display weight, e.g. "500 g" or "1 kg"
    pub weight: String,
    pub image: String,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub reviews: i32,
    pub description: String,
    #[serde(default)]
    pub stock: i32,
    #[serde(default = "default_true", deserialize_with = "serde_helpers::bool_true")]
    pub in_stock: bool,
    pub created_at: i64,
}

fn default_true() -> bool {
    true
}

/// Create product payload (seeding/admin)
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductCreate {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub category: String,
    pub price: Option<f64>,
    #[serde(default)]
    pub weight: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub description: String,
    pub rating: Option<f64>,
    pub reviews: Option<i32>,
    pub stock: Option<i32>,
    pub in_stock: Option<bool>,
}
