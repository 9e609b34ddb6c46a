//! Insertion-ordered maps for the `relationships` and `links` sections.
//!
//! Re-inserting an existing key replaces its value in place and keeps its
//! original position.

use indexmap::IndexMap;

/// String-keyed map that keeps insertion order.
pub type OrderedMap<V> = IndexMap<String, V>;

/// Absent-not-empty helper for optional sections.
pub trait NonEmpty: Sized {
    /// `None` when empty, so callers can elide the section entirely.
    fn non_empty(self) -> Option<Self>;
}

impl<V> NonEmpty for OrderedMap<V> {
    fn non_empty(self) -> Option<Self> {
        if self.is_empty() { None } else { Some(self) }
    }
}
