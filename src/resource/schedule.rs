use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{impl_resource, InsertAt};
use crate::filter::Filterable;

/// Status value written by [`crate::store::Store::complete_schedule`].
pub const COMPLETED: &str = "completed";

/// A planned farm task (feeding, vaccination, maintenance...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Schedule {
    #[serde(alias = "_id")]
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub category: String,
    #[serde(default = "default_status")]
    pub status: String,
    #[serde(default = "default_priority")]
    pub priority: String,
    pub date: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub animal_id: Option<String>,
}

fn default_status() -> String {
    "pending".to_string()
}

fn default_priority() -> String {
    "medium".to_string()
}

impl Schedule {
    pub fn is_completed(&self) -> bool {
        self.status.eq_ignore_ascii_case(COMPLETED)
    }
}

impl_resource!(Schedule, "schedules", "schedules", InsertAt::Back);

impl Filterable for Schedule {
    fn dimension(&self, name: &str) -> Option<&str> {
        match name {
            "category" => Some(self.category.as_str()),
            "status" => Some(self.status.as_str()),
            "priority" => Some(self.priority.as_str()),
            _ => None,
        }
    }

    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.title.as_str(), self.id.as_str()];
        fields.extend(self.description.as_deref());
        fields
    }

    fn natural_order(a: &Self, b: &Self) -> Ordering {
        a.date.cmp(&b.date)
    }
}
