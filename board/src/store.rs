use common::{FilterSet, query};
use tracing::info;

use crate::history::{History, Location};

/// Filter state kept in the current location.
///
/// The location's query string is the only copy: [`FilterStore::filters`]
/// decodes it on every call, and every mutation writes a new location.
#[derive(Debug, Clone)]
pub struct FilterStore {
    history: History,
}

impl FilterStore {
    pub fn new(initial: Location) -> Self {
        Self {
            history: History::new(initial),
        }
    }

    pub fn location(&self) -> &Location {
        self.history.current()
    }

    pub fn filters(&self) -> FilterSet {
        query::decode(self.location().query())
    }

    /// Sets `key` to `value`, or removes it when `value` is `None` or empty,
    /// then pushes the resulting location.
    pub fn set_filter(&mut self, key: &str, value: Option<&str>) -> FilterSet {
        let next = self.filters().with(key, value);
        self.write(&next);
        next
    }

    pub fn clear_all(&mut self) -> FilterSet {
        let next = FilterSet::new();
        self.write(&next);
        next
    }

    pub fn navigate(&mut self, location: Location) {
        info!(location = %location, "Navigating");
        self.history.push(location);
    }

    pub fn back(&mut self) -> bool {
        self.history.back()
    }

    pub fn forward(&mut self) -> bool {
        self.history.forward()
    }

    fn write(&mut self, filters: &FilterSet) {
        let location = self.location().with_query(query::encode(filters));
        if &location != self.location() {
            self.navigate(location);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_at(input: &str) -> FilterStore {
        FilterStore::new(Location::parse(input))
    }

    fn assert_in_sync(store: &FilterStore) {
        assert_eq!(store.filters(), query::decode(store.location().query()));
    }

    #[test]
    fn test_filters_come_from_location() {
        let store = store_at("/jobs?department=IT&page=3");
        let filters = store.filters();
        assert_eq!(filters.get("department"), Some("IT"));
        assert_eq!(filters.get("page"), Some("3"));
    }

    #[test]
    fn test_set_filter_updates_location() {
        let mut store = store_at("/jobs");
        let filters = store.set_filter("department", Some("IT"));
        assert_eq!(filters.get("department"), Some("IT"));
        assert_eq!(store.location().to_string(), "/jobs?department=IT");
        assert_in_sync(&store);
    }

    #[test]
    fn test_set_filter_empty_removes_key() {
        let mut store = store_at("/jobs?department=IT&search=rust");
        store.set_filter("search", Some(""));
        assert_eq!(store.location().to_string(), "/jobs?department=IT");
        store.set_filter("department", None);
        assert_eq!(store.location().to_string(), "/jobs");
        assert!(store.filters().is_empty());
    }

    #[test]
    fn test_clear_all() {
        let mut store = store_at("/jobs?department=IT&location=Verna&custom=1");
        let filters = store.clear_all();
        assert!(filters.is_empty());
        assert_eq!(store.location().to_string(), "/jobs");
        assert_in_sync(&store);
    }

    #[test]
    fn test_unchanged_filters_do_not_push_history() {
        let mut store = store_at("/jobs?department=IT");
        store.set_filter("department", Some("IT"));
        store.set_filter("search", None);
        assert!(!store.back());
    }

    #[test]
    fn test_back_restores_previous_filters() {
        let mut store = store_at("/jobs");
        store.set_filter("search", Some("r"));
        store.set_filter("search", Some("ru"));
        assert!(store.back());
        assert_eq!(store.filters().get("search"), Some("r"));
        assert!(store.forward());
        assert_eq!(store.filters().get("search"), Some("ru"));
    }

    #[test]
    fn test_stays_in_sync_over_many_operations() {
        let mut store = store_at("/jobs?x=1");
        let steps: &[(&str, Option<&str>)] = &[
            ("search", Some("data engineer")),
            ("department", Some("IT")),
            ("search", Some("")),
            ("location", Some("Canca")),
            ("x", None),
            ("function", Some("R&D / ops")),
        ];
        for (key, value) in steps {
            store.set_filter(key, *value);
            assert_in_sync(&store);
        }
        assert_eq!(store.filters().len(), 3);
        store.clear_all();
        assert_in_sync(&store);
        assert!(store.back());
        assert_in_sync(&store);
        assert_eq!(store.filters().get("function"), Some("R&D / ops"));
    }
}
