use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{impl_resource, InsertAt};
use crate::filter::Filterable;

/// A community forum thread.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForumPost {
    #[serde(alias = "_id")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub content: String,
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author_name: Option<String>,
    #[serde(default)]
    pub reply_count: u32,
    pub created_at: DateTime<Utc>,
}

impl_resource!(ForumPost, "community/posts", "posts", InsertAt::Front);

impl Filterable for ForumPost {
    fn dimension(&self, name: &str) -> Option<&str> {
        match name {
            "category" => Some(self.category.as_str()),
            _ => None,
        }
    }

    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.title.as_str(), self.content.as_str()];
        fields.extend(self.author_name.as_deref());
        fields
    }

    fn natural_order(a: &Self, b: &Self) -> Ordering {
        b.created_at.cmp(&a.created_at)
    }
}
