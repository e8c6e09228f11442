use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use super::{impl_resource, InsertAt};
use crate::filter::Filterable;

/// Stock of feed, medicine, equipment or supplies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItem {
    #[serde(alias = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,
    pub category: String,
    #[serde(default = "default_status")]
    pub status: String,
    pub quantity: f64,
    #[serde(default)]
    pub unit: String,
    /// Quantity at or below which the item raises a low-stock alert.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reorder_level: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

fn default_status() -> String {
    "in_stock".to_string()
}

impl InventoryItem {
    /// Low or out of stock, either by server status or by threshold.
    pub fn has_alert(&self) -> bool {
        let flagged = matches!(self.status.as_str(), "low_stock" | "out_of_stock");
        let below = self.reorder_level.is_some_and(|level| self.quantity <= level);
        flagged || below
    }
}

impl_resource!(InventoryItem, "inventory", "inventory", InsertAt::Back);

impl Filterable for InventoryItem {
    fn dimension(&self, name: &str) -> Option<&str> {
        match name {
            "category" => Some(self.category.as_str()),
            "status" => Some(self.status.as_str()),
            _ => None,
        }
    }

    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.name.as_str()];
        fields.extend(self.sku.as_deref());
        fields.extend(self.description.as_deref());
        fields
    }

    /// Items with active alerts first.
    fn natural_order(a: &Self, b: &Self) -> Ordering {
        b.has_alert().cmp(&a.has_alert())
    }
}
