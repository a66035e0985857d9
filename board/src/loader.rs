//! Last-request-wins bookkeeping for data that follows a key.
//!
//! A [`Loader`] issues a [`Ticket`] every time its key changes. Results come
//! back with the ticket that produced them, and only the newest ticket may
//! change state. Stale results are dropped, never cancelled.

use std::fmt;
use tracing::debug;

#[derive(Debug, Clone, PartialEq)]
pub enum LoadState<T> {
    /// Nothing requested yet.
    Idle,
    Loading,
    Loaded(T),
    Failed(String),
}

impl<T> LoadState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }

    pub fn loaded(&self) -> Option<&T> {
        match self {
            LoadState::Loaded(value) => Some(value),
            _ => None,
        }
    }
}

/// Tag carried by an in-flight request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticket<K> {
    seq: u64,
    key: K,
}

impl<K> Ticket<K> {
    pub fn key(&self) -> &K {
        &self.key
    }
}

#[derive(Debug)]
pub struct Loader<K, T> {
    seq: u64,
    key: Option<K>,
    state: LoadState<T>,
}

impl<K, T> Default for Loader<K, T> {
    fn default() -> Self {
        Self {
            seq: 0,
            key: None,
            state: LoadState::Idle,
        }
    }
}

impl<K: Clone + PartialEq + fmt::Debug, T> Loader<K, T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &LoadState<T> {
        &self.state
    }

    /// Starts a request for `key` unless `key` is already the current one.
    /// A failed key may be requested again.
    pub fn request(&mut self, key: K) -> Option<Ticket<K>> {
        let failed = matches!(self.state, LoadState::Failed(_));
        if !failed && self.key.as_ref() == Some(&key) {
            return None;
        }
        Some(self.reload(key))
    }

    /// Starts a request for `key` even if it is unchanged.
    pub fn reload(&mut self, key: K) -> Ticket<K> {
        self.seq += 1;
        self.key = Some(key.clone());
        self.state = LoadState::Loading;
        Ticket { seq: self.seq, key }
    }

    /// Applies a result if `ticket` is still the newest. Returns whether it was applied.
    pub fn resolve<E: fmt::Display>(&mut self, ticket: Ticket<K>, result: Result<T, E>) -> bool {
        if ticket.seq != self.seq {
            debug!(
                key = ?ticket.key,
                seq = ticket.seq,
                latest = self.seq,
                "Discarding stale result"
            );
            return false;
        }
        self.state = match result {
            Ok(value) => LoadState::Loaded(value),
            Err(e) => LoadState::Failed(e.to_string()),
        };
        true
    }

    /// Forgets the current key; any in-flight result becomes stale.
    pub fn reset(&mut self) {
        self.seq += 1;
        self.key = None;
        self.state = LoadState::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type Jobs = Loader<&'static str, Vec<&'static str>>;

    #[test]
    fn test_request_moves_to_loading() {
        let mut loader = Jobs::new();
        assert_eq!(loader.state(), &LoadState::Idle);
        let ticket = loader.request("a").unwrap();
        assert_eq!(ticket.key(), &"a");
        assert!(loader.state().is_loading());
    }

    #[test]
    fn test_same_key_is_not_refetched() {
        let mut loader = Jobs::new();
        let ticket = loader.request("a").unwrap();
        assert!(loader.request("a").is_none());
        assert!(loader.resolve(ticket, Ok::<_, String>(vec!["job"])));
        assert!(loader.request("a").is_none());
        assert!(loader.request("b").is_some());
    }

    #[test]
    fn test_last_request_wins() {
        let mut loader = Jobs::new();
        let first = loader.request("a").unwrap();
        let second = loader.request("b").unwrap();

        // b answers first, a straggles in afterwards
        assert!(loader.resolve(second, Ok::<_, String>(vec!["b-job"])));
        assert!(!loader.resolve(first, Ok::<_, String>(vec!["a-job"])));

        assert_eq!(loader.state(), &LoadState::Loaded(vec!["b-job"]));
    }

    #[test]
    fn test_stale_failure_does_not_clobber() {
        let mut loader = Jobs::new();
        let first = loader.request("a").unwrap();
        let second = loader.request("b").unwrap();
        assert!(!loader.resolve(first, Err::<Vec<&str>, _>("connection reset")));
        assert!(loader.state().is_loading());
        assert!(loader.resolve(second, Ok::<_, String>(vec![])));
        assert_eq!(loader.state(), &LoadState::Loaded(vec![]));
    }

    #[test]
    fn test_failure_is_distinct_from_empty() {
        let mut loader = Jobs::new();
        let ticket = loader.request("a").unwrap();
        loader.resolve(ticket, Err::<Vec<&str>, _>("timed out"));
        assert_eq!(loader.state(), &LoadState::Failed("timed out".to_string()));
        assert!(loader.state().loaded().is_none());
    }

    #[test]
    fn test_returning_to_earlier_key_still_discards_old_ticket() {
        let mut loader = Jobs::new();
        let first_a = loader.request("a").unwrap();
        let _b = loader.request("b").unwrap();
        let second_a = loader.request("a").unwrap();
        assert!(!loader.resolve(first_a, Ok::<_, String>(vec!["old"])));
        assert!(loader.resolve(second_a, Ok::<_, String>(vec!["new"])));
        assert_eq!(loader.state().loaded(), Some(&vec!["new"]));
    }

    #[test]
    fn test_failed_key_can_be_requested_again() {
        let mut loader = Jobs::new();
        let ticket = loader.request("a").unwrap();
        loader.resolve(ticket, Err::<Vec<&str>, _>("connection refused"));

        let retry = loader.request("a").expect("failed key refetches");
        assert!(loader.state().is_loading());
        // while the second attempt is in flight the key is deduplicated again
        assert!(loader.request("a").is_none());
        assert!(loader.resolve(retry, Ok::<_, String>(vec!["job"])));
        assert!(loader.request("a").is_none());
    }

    #[test]
    fn test_reset_makes_in_flight_stale() {
        let mut loader = Jobs::new();
        let ticket = loader.request("a").unwrap();
        loader.reset();
        assert!(!loader.resolve(ticket, Ok::<_, String>(vec!["late"])));
        assert_eq!(loader.state(), &LoadState::Idle);
        assert!(loader.request("a").is_some());
    }
}
