//! Pure derivation of the visible list.

use std::cmp::Ordering;

use super::criteria::FilterCriteria;

/// Exposes a record's filterable dimensions and searchable text.
pub trait Filterable {
    /// Value of a filter dimension, `None` if the record has no such field.
    fn dimension(&self, name: &str) -> Option<&str>;

    /// Name, identifier and description style fields. Absent optional
    /// fields are simply left out.
    fn search_fields(&self) -> Vec<&str>;

    /// Ordering applied after filtering. Defaults to the input order.
    fn natural_order(_a: &Self, _b: &Self) -> Ordering {
        Ordering::Equal
    }
}

/// Filter, search and order `items` without mutating them.
///
/// A record is kept when it matches every active dimension and, for a
/// non-blank query, at least one search field contains the query
/// case-insensitively. The sort is stable, so equal records keep their
/// server order.
pub fn filter_view<R>(items: &[R], criteria: &FilterCriteria, query: &str) -> Vec<R>
where
    R: Filterable + Clone,
{
    let needle = query.trim().to_lowercase();

    let mut view: Vec<R> = items
        .iter()
        .filter(|item| {
            criteria
                .active()
                .all(|(dimension, selection)| selection.matches(item.dimension(dimension)))
        })
        .filter(|item| {
            needle.is_empty()
                || item
                    .search_fields()
                    .iter()
                    .any(|field| field.to_lowercase().contains(&needle))
        })
        .cloned()
        .collect();

    view.sort_by(R::natural_order);
    view
}
