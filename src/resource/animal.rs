use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{impl_resource, InsertAt};
use crate::filter::Filterable;

/// A head of livestock.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Animal {
    #[serde(alias = "_id")]
    pub id: String,
    /// Ear tag or registration number.
    #[serde(default)]
    pub tag_number: String,
    pub name: String,
    pub species: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub breed: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(default = "default_status")]
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
}

fn default_status() -> String {
    "healthy".to_string()
}

impl_resource!(Animal, "animals", "animals", InsertAt::Back);

impl Filterable for Animal {
    fn dimension(&self, name: &str) -> Option<&str> {
        match name {
            "species" => Some(self.species.as_str()),
            "status" => Some(self.status.as_str()),
            "gender" => self.gender.as_deref(),
            _ => None,
        }
    }

    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.name.as_str(), self.tag_number.as_str()];
        fields.extend(self.breed.as_deref());
        fields.extend(self.notes.as_deref());
        fields
    }
}
