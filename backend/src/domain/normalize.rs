//! Ordering and deduplication helpers for opaque string sequences.
//!
//! Nothing here knows about clients; the same helpers back the public `Sort`
//! operation and the batch lookup of client identifiers.

use std::collections::HashSet;
use std::hash::Hash;

/// Remove duplicates, keeping the first occurrence of each item in place.
///
/// # Examples
/// ```
/// use backend::domain::normalize::dedup_preserving_order;
///
/// let items = vec!["b", "a", "b", "c", "a"];
/// assert_eq!(dedup_preserving_order(items), vec!["b", "a", "c"]);
/// ```
pub fn dedup_preserving_order<T>(items: impl IntoIterator<Item = T>) -> Vec<T>
where
    T: Eq + Hash + Clone,
{
    let mut seen = HashSet::new();
    items
        .into_iter()
        .filter(|item| seen.insert(item.clone()))
        .collect()
}

/// Sort strings in ascending byte order, optionally dropping duplicates.
///
/// Ordering compares the UTF-8 bytes; there is no locale handling or case
/// folding, so `"B"` sorts before `"a"`.
///
/// # Examples
/// ```
/// use backend::domain::normalize::sort_items;
///
/// let items = vec!["b".to_owned(), "a".to_owned(), "a".to_owned()];
/// assert_eq!(sort_items(items.clone(), true), vec!["a", "b"]);
/// assert_eq!(sort_items(items, false), vec!["a", "a", "b"]);
/// ```
pub fn sort_items(mut items: Vec<String>, remove_duplicates: bool) -> Vec<String> {
    items.sort_unstable();
    if remove_duplicates {
        items.dedup();
    }
    items
}
