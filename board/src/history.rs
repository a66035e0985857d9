//! Navigable locations and the back/forward stack that holds them.

use std::fmt;
use url::Url;

/// A path plus query string, the part of an address the board routes on.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Location {
    path: String,
    query: String,
}

impl Location {
    /// Builds a location. `path` gets a leading `/` if it lacks one; `query`
    /// may carry a leading `?`.
    pub fn new(path: impl Into<String>, query: impl Into<String>) -> Self {
        let mut path = path.into();
        if !path.starts_with('/') {
            path.insert(0, '/');
        }
        let query = query.into();
        let query = query.strip_prefix('?').map(str::to_string).unwrap_or(query);
        Self { path, query }
    }

    /// Parses `/jobs?department=IT`, `jobs/42` or a full `https://` address.
    /// Fragments are dropped.
    pub fn parse(input: &str) -> Self {
        let input = input.trim();
        if let Ok(url) = Url::parse(input) {
            if matches!(url.scheme(), "http" | "https") {
                return Self::new(url.path(), url.query().unwrap_or_default());
            }
        }

        let without_fragment = input.split('#').next().unwrap_or_default();
        match without_fragment.split_once('?') {
            Some((path, query)) => Self::new(path, query),
            None => Self::new(without_fragment, ""),
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Query string without the leading `?`.
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Same path, different query.
    pub fn with_query(&self, query: impl Into<String>) -> Self {
        Self::new(self.path.clone(), query)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.query.is_empty() {
            f.write_str(&self.path)
        } else {
            write!(f, "{}?{}", self.path, self.query)
        }
    }
}

/// Session history with browser semantics: pushing discards anything ahead
/// of the current entry.
#[derive(Debug, Clone)]
pub struct History {
    entries: Vec<Location>,
    index: usize,
}

impl History {
    pub fn new(initial: Location) -> Self {
        Self {
            entries: vec![initial],
            index: 0,
        }
    }

    pub fn current(&self) -> &Location {
        &self.entries[self.index]
    }

    pub fn push(&mut self, location: Location) {
        self.entries.truncate(self.index + 1);
        self.entries.push(location);
        self.index = self.entries.len() - 1;
    }

    /// Returns false when already at the oldest entry.
    pub fn back(&mut self) -> bool {
        if self.index == 0 {
            return false;
        }
        self.index -= 1;
        true
    }

    /// Returns false when already at the newest entry.
    pub fn forward(&mut self) -> bool {
        if self.index + 1 >= self.entries.len() {
            return false;
        }
        self.index += 1;
        true
    }
}
