use common::{FilterSet, query};
use regex::Regex;
use std::sync::LazyLock;

use crate::history::Location;

static DETAIL_ROUTE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^/jobs/([^/]+)/?$").expect("detail route pattern"));

/// Which view a location shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// `/jobs`, and every path that matches nothing else.
    List,
    /// `/jobs/{id}`. The id is percent-decoded.
    Detail(String),
}

impl Route {
    pub fn resolve(location: &Location) -> Route {
        DETAIL_ROUTE
            .captures(location.path())
            .and_then(|caps| caps.get(1))
            .map(|id| {
                let raw = id.as_str();
                let id = urlencoding::decode(raw)
                    .map(|decoded| decoded.into_owned())
                    .unwrap_or_else(|_| raw.to_string());
                Route::Detail(id)
            })
            .unwrap_or(Route::List)
    }
}

/// `/jobs?{filters}`
pub fn list_location(filters: &FilterSet) -> Location {
    Location::new("/jobs", query::encode(filters))
}

/// `/jobs/{id}?{filters}`, carrying the filters so "back to list" can restore them.
pub fn detail_location(id: &str, filters: &FilterSet) -> Location {
    Location::new(
        format!("/jobs/{}", urlencoding::encode(id)),
        query::encode(filters),
    )
}
