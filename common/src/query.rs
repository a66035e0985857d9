//! Query-string codec for [`FilterSet`].
//!
//! Uses `application/x-www-form-urlencoded` rules, the same encoding a
//! browser's `URLSearchParams` produces, so a query string copied from an
//! address bar decodes to the filters it was built from.

use url::form_urlencoded;

use crate::filters::FilterSet;

/// Parses a query string into a [`FilterSet`].
///
/// A leading `?` is ignored. When a key repeats, the last value wins. Pairs
/// with an empty value are dropped. Never fails: undecodable escapes are kept
/// as literal text.
pub fn decode(query: &str) -> FilterSet {
    let query = query.strip_prefix('?').unwrap_or(query);
    form_urlencoded::parse(query.as_bytes())
        .filter(|(key, _)| !key.is_empty())
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect()
}

/// Serializes a [`FilterSet`] into a query string without the leading `?`.
///
/// Keys come out sorted; callers must not rely on any particular order.
pub fn encode(filters: &FilterSet) -> String {
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    for (key, value) in filters.iter().filter(|(_, value)| !value.is_empty()) {
        serializer.append_pair(key, value);
    }
    serializer.finish()
}
