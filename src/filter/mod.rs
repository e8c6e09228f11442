//! Client-side list filtering and search.
//!
//! Screens hold [`FilterCriteria`] plus a free-text query and derive the
//! visible list with [`filter_view`]. Nothing here is persisted or touches
//! the network.

mod criteria;
mod view;

pub use criteria::{FilterCriteria, Selection, ALL};
pub use view::{filter_view, Filterable};
