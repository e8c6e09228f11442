use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{impl_resource, InsertAt};
use crate::filter::Filterable;

/// A marketplace listing (livestock, produce, equipment for sale).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Listing {
    #[serde(alias = "_id")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seller_id: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub images: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl_resource!(Listing, "marketplace", "marketplace", InsertAt::Front);

impl Filterable for Listing {
    fn dimension(&self, name: &str) -> Option<&str> {
        match name {
            "category" => Some(self.category.as_str()),
            "condition" => self.condition.as_deref(),
            "location" => self.location.as_deref(),
            _ => None,
        }
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![self.title.as_str(), self.id.as_str(), self.description.as_str()]
    }

    /// Newest first.
    fn natural_order(a: &Self, b: &Self) -> Ordering {
        b.created_at.cmp(&a.created_at)
    }
}
