use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

pub const DEPARTMENTS: &[&str] = &["IT", "Management", "HR", "CX", "Development"];
pub const LOCATIONS: &[&str] = &[
    "Panjim", "Verna", "Madgaon", "Colvale", "Canca", "Parra", "Mapusa",
];
pub const FUNCTIONS: &[&str] = &["Development", "Consulting", "Meetings", "Conference"];

/// The filter keys the board knows how to present.
///
/// Any other key found in a query string is still carried in a [`FilterSet`]
/// and forwarded to the API untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterKey {
    Search,
    Department,
    Location,
    Function,
}

impl FilterKey {
    pub const ALL: [FilterKey; 4] = [
        FilterKey::Search,
        FilterKey::Department,
        FilterKey::Location,
        FilterKey::Function,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            FilterKey::Search => "search",
            FilterKey::Department => "department",
            FilterKey::Location => "location",
            FilterKey::Function => "function",
        }
    }

    /// Placeholder label shown when no value is selected.
    pub fn label(self) -> &'static str {
        match self {
            FilterKey::Search => "Search for Job",
            FilterKey::Department => "Department",
            FilterKey::Location => "Location",
            FilterKey::Function => "Function",
        }
    }

    /// Enumerated choices for the key. Empty for free-text keys.
    pub fn options(self) -> &'static [&'static str] {
        match self {
            FilterKey::Search => &[],
            FilterKey::Department => DEPARTMENTS,
            FilterKey::Location => LOCATIONS,
            FilterKey::Function => FUNCTIONS,
        }
    }

    /// True when `value` is acceptable for this key.
    pub fn accepts(self, value: &str) -> bool {
        let options = self.options();
        options.is_empty() || options.contains(&value)
    }
}

impl fmt::Display for FilterKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown filter key: {0}")]
pub struct UnknownFilterKey(pub String);

impl FromStr for FilterKey {
    type Err = UnknownFilterKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FilterKey::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| UnknownFilterKey(s.to_string()))
    }
}

/// Active job-search filters: a flat key/value map.
///
/// Keys holding an empty value are never stored. Every way of building or
/// mutating a `FilterSet` drops them, so "cleared" and "absent" are the same
/// thing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "BTreeMap<String, String>")]
pub struct FilterSet(BTreeMap<String, String>);

impl FilterSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Sets `key` to `value`, or removes `key` when `value` is empty.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        if value.is_empty() {
            self.0.remove(&key);
        } else {
            self.0.insert(key, value);
        }
    }

    /// Returns a copy with `key` set, or removed when `value` is `None` or empty.
    pub fn with(&self, key: &str, value: Option<&str>) -> FilterSet {
        let mut next = self.clone();
        next.set(key, value.unwrap_or_default());
        next
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl From<BTreeMap<String, String>> for FilterSet {
    fn from(map: BTreeMap<String, String>) -> Self {
        map.into_iter().collect()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FilterSet {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut set = FilterSet::new();
        for (key, value) in iter {
            set.set(key, value);
        }
        set
    }
}

impl<'a> IntoIterator for &'a FilterSet {
    type Item = (&'a String, &'a String);
    type IntoIter = std::collections::btree_map::Iter<'a, String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
