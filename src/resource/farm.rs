use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{impl_resource, Detail, InsertAt};
use crate::filter::Filterable;

/// The signed-in user's farm.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FarmProfile {
    #[serde(alias = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub location: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size_acres: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub farm_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_name: Option<String>,
}

impl Detail for FarmProfile {
    const PATH: &'static str = "farm/profile";
    const NAME: &'static str = "farm profile";
}

/// A certificate, permit or record uploaded for the farm.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FarmDocument {
    #[serde(alias = "_id")]
    pub id: String,
    pub title: String,
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uploaded_at: Option<DateTime<Utc>>,
}

impl_resource!(FarmDocument, "farm/documents", "documents", InsertAt::Front);

impl Filterable for FarmDocument {
    fn dimension(&self, name: &str) -> Option<&str> {
        match name {
            "category" => Some(self.category.as_str()),
            _ => None,
        }
    }

    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.title.as_str()];
        fields.extend(self.description.as_deref());
        fields
    }
}
