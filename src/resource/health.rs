use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{impl_resource, InsertAt};
use crate::filter::Filterable;

/// A veterinary or AI-assisted health check of one animal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthAssessment {
    #[serde(alias = "_id")]
    pub id: String,
    pub animal_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub animal_name: Option<String>,
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diagnosis: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub symptoms: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub date: DateTime<Utc>,
}

impl_resource!(HealthAssessment, "health", "health", InsertAt::Front);

impl Filterable for HealthAssessment {
    fn dimension(&self, name: &str) -> Option<&str> {
        match name {
            "animal" => Some(self.animal_id.as_str()),
            "status" => Some(self.status.as_str()),
            _ => None,
        }
    }

    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.animal_id.as_str()];
        fields.extend(self.animal_name.as_deref());
        fields.extend(self.diagnosis.as_deref());
        fields.extend(self.notes.as_deref());
        fields
    }

    fn natural_order(a: &Self, b: &Self) -> Ordering {
        b.date.cmp(&a.date)
    }
}
