use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{impl_resource, InsertAt};
use crate::filter::Filterable;

/// A field or barn IoT sensor and its last reading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sensor {
    #[serde(alias = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub serial_number: Option<String>,
    /// Temperature, humidity, soil moisture...
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default = "default_status")]
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_reading: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_seen: Option<DateTime<Utc>>,
}

fn default_status() -> String {
    "active".to_string()
}

impl_resource!(Sensor, "sensors", "sensors", InsertAt::Back);

impl Filterable for Sensor {
    fn dimension(&self, name: &str) -> Option<&str> {
        match name {
            "kind" | "type" => Some(self.kind.as_str()),
            "status" => Some(self.status.as_str()),
            _ => None,
        }
    }

    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.name.as_str()];
        fields.extend(self.serial_number.as_deref());
        fields.extend(self.location.as_deref());
        fields
    }
}
