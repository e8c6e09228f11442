//! Domain records backed by the farm API.
//!
//! Each collection type names its REST path and the end of the list where
//! confirmed creates land. Detail types name the path of their single
//! object.

use std::fmt::Debug;

use serde::de::DeserializeOwned;

mod animal;
mod community;
mod farm;
mod financial;
mod health;
mod inventory;
mod marketplace;
mod schedule;
mod sensor;
mod weather;

pub use animal::Animal;
pub use community::ForumPost;
pub use farm::{FarmDocument, FarmProfile};
pub use financial::{Expense, RevenueEntry};
pub use health::HealthAssessment;
pub use inventory::InventoryItem;
pub use marketplace::Listing;
pub use schedule::{Schedule, COMPLETED};
pub use sensor::Sensor;
pub use weather::{CurrentConditions, DailyForecast, WeatherForecast};

/// Where a newly created record is inserted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertAt {
    /// Newest first (listings, posts, ledger entries).
    Front,
    Back,
}

/// A record in a server-backed collection.
pub trait Resource: Clone + PartialEq + Debug + DeserializeOwned + Send + Sync + 'static {
    /// Path under `/api/`, e.g. `financial/expenses`.
    const PATH: &'static str;

    /// Short name used in logs and the CLI.
    const NAME: &'static str;

    const INSERT_AT: InsertAt;

    /// Server-assigned id.
    fn id(&self) -> &str;

    fn item_path(id: &str) -> String {
        format!("{}/{}", Self::PATH, id)
    }
}

/// A single dashboard object fetched wholesale.
pub trait Detail: Clone + PartialEq + Debug + DeserializeOwned + Send + Sync + 'static {
    const PATH: &'static str;
    const NAME: &'static str;
}

/// Implements [`Resource`] for a struct with an `id: String` field.
macro_rules! impl_resource {
    ($ty:ty, $path:literal, $name:literal, $at:expr) => {
        impl $crate::resource::Resource for $ty {
            const PATH: &'static str = $path;
            const NAME: &'static str = $name;
            const INSERT_AT: $crate::resource::InsertAt = $at;

            fn id(&self) -> &str {
                &self.id
            }
        }
    };
}
pub(crate) use impl_resource;

