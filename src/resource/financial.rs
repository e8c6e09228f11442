//! Ledger entries. Both collections list newest first.

use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{impl_resource, InsertAt};
use crate::filter::Filterable;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    #[serde(alias = "_id")]
    pub id: String,
    pub description: String,
    pub category: String,
    pub amount: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vendor: Option<String>,
    /// URL of an uploaded receipt, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub receipt_url: Option<String>,
    pub date: DateTime<Utc>,
}

impl_resource!(Expense, "financial/expenses", "expenses", InsertAt::Front);

impl Filterable for Expense {
    fn dimension(&self, name: &str) -> Option<&str> {
        match name {
            "category" => Some(self.category.as_str()),
            _ => None,
        }
    }

    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.description.as_str()];
        fields.extend(self.vendor.as_deref());
        fields
    }

    fn natural_order(a: &Self, b: &Self) -> Ordering {
        b.date.cmp(&a.date)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RevenueEntry {
    #[serde(alias = "_id")]
    pub id: String,
    pub description: String,
    pub source: String,
    pub amount: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub buyer: Option<String>,
    pub date: DateTime<Utc>,
}

impl_resource!(RevenueEntry, "financial/revenue", "revenue", InsertAt::Front);

impl Filterable for RevenueEntry {
    fn dimension(&self, name: &str) -> Option<&str> {
        match name {
            "source" => Some(self.source.as_str()),
            _ => None,
        }
    }

    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.description.as_str()];
        fields.extend(self.buyer.as_deref());
        fields
    }

    fn natural_order(a: &Self, b: &Self) -> Ordering {
        b.date.cmp(&a.date)
    }
}
