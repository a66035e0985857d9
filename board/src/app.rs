//! The board controller: routes the current location to a view, keeps that
//! view's data in step with it, and renders.

use client::{FetchError, JobsClient};
use common::{FilterSet, JobDetail, JobSummary};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{error, info};

use crate::history::Location;
use crate::loader::{LoadState, Loader, Ticket};
use crate::router::{self, Route};
use crate::store::FilterStore;
use crate::view;

/// A finished fetch, tagged with the ticket it was issued under.
#[derive(Debug)]
pub enum Outcome {
    Jobs(Ticket<FilterSet>, Result<Vec<JobSummary>, FetchError>),
    Detail(Ticket<String>, Result<JobDetail, FetchError>),
}

pub struct JobBoard {
    client: Arc<JobsClient>,
    store: FilterStore,
    jobs: Loader<FilterSet, Vec<JobSummary>>,
    detail: Loader<String, JobDetail>,
    outcomes_tx: mpsc::UnboundedSender<Outcome>,
    outcomes_rx: mpsc::UnboundedReceiver<Outcome>,
}

impl JobBoard {
    /// Opens the board at `location` and starts loading whatever it shows.
    ///
    /// Must be called inside a tokio runtime: fetches are spawned as tasks.
    pub fn new(client: JobsClient, location: Location) -> Self {
        let (outcomes_tx, outcomes_rx) = mpsc::unbounded_channel();
        let mut board = Self {
            client: Arc::new(client),
            store: FilterStore::new(location),
            jobs: Loader::new(),
            detail: Loader::new(),
            outcomes_tx,
            outcomes_rx,
        };
        board.sync();
        board
    }

    pub fn location(&self) -> &Location {
        self.store.location()
    }

    pub fn route(&self) -> Route {
        Route::resolve(self.location())
    }

    pub fn filters(&self) -> FilterSet {
        self.store.filters()
    }

    pub fn jobs(&self) -> &LoadState<Vec<JobSummary>> {
        self.jobs.state()
    }

    pub fn detail(&self) -> &LoadState<JobDetail> {
        self.detail.state()
    }

    pub fn set_filter(&mut self, key: &str, value: Option<&str>) -> FilterSet {
        let filters = self.store.set_filter(key, value);
        self.sync();
        filters
    }

    pub fn clear_all(&mut self) -> FilterSet {
        let filters = self.store.clear_all();
        self.sync();
        filters
    }

    pub fn navigate(&mut self, location: Location) {
        self.store.navigate(location);
        self.sync();
    }

    /// Opens the detail view for `id`, carrying the current filters along.
    pub fn select(&mut self, id: &str) {
        let location = router::detail_location(id, &self.filters());
        self.navigate(location);
    }

    /// Opens the `n`-th (1-based) job of the loaded list. Returns false if
    /// there is no such job or it carries no id.
    pub fn select_nth(&mut self, n: usize) -> bool {
        let id = match self.jobs.state().loaded() {
            Some(jobs) if n >= 1 => jobs
                .get(n - 1)
                .and_then(|job| job.id.as_ref())
                .map(|id| id.to_string()),
            _ => None,
        };
        match id {
            Some(id) => {
                self.select(&id);
                true
            }
            None => false,
        }
    }

    pub fn back_to_list(&mut self) {
        let location = router::list_location(&self.filters());
        self.navigate(location);
    }

    pub fn back(&mut self) -> bool {
        let moved = self.store.back();
        if moved {
            self.sync();
        }
        moved
    }

    pub fn forward(&mut self) -> bool {
        let moved = self.store.forward();
        if moved {
            self.sync();
        }
        moved
    }

    /// Issues at most one fetch for the current route's key. The loader of
    /// the view not on screen is reset so it loads afresh when revisited.
    fn sync(&mut self) {
        match self.route() {
            Route::List => {
                self.detail.reset();
                if let Some(ticket) = self.jobs.request(self.store.filters()) {
                    self.spawn_jobs(ticket);
                }
            }
            Route::Detail(id) => {
                self.jobs.reset();
                if let Some(ticket) = self.detail.request(id) {
                    self.spawn_detail(ticket);
                }
            }
        }
    }

    fn spawn_jobs(&self, ticket: Ticket<FilterSet>) {
        info!(filters = ?ticket.key(), "Loading jobs");
        let client = Arc::clone(&self.client);
        let tx = self.outcomes_tx.clone();
        tokio::spawn(async move {
            let result = client.fetch_jobs(ticket.key()).await;
            // receiver gone means the board was dropped
            let _ = tx.send(Outcome::Jobs(ticket, result));
        });
    }

    fn spawn_detail(&self, ticket: Ticket<String>) {
        info!(id = %ticket.key(), "Loading job");
        let client = Arc::clone(&self.client);
        let tx = self.outcomes_tx.clone();
        tokio::spawn(async move {
            let result = client.fetch_job_detail(ticket.key()).await;
            let _ = tx.send(Outcome::Detail(ticket, result));
        });
    }

    /// Applies a finished fetch. Returns false if it was stale.
    pub fn apply(&mut self, outcome: Outcome) -> bool {
        match outcome {
            Outcome::Jobs(ticket, result) => {
                if let Err(e) = &result {
                    error!(filters = ?ticket.key(), error = %e, "Failed to load jobs");
                }
                self.jobs.resolve(ticket, result)
            }
            Outcome::Detail(ticket, result) => {
                if let Err(e) = &result {
                    error!(id = %ticket.key(), error = %e, "Failed to load job");
                }
                self.detail.resolve(ticket, result)
            }
        }
    }

    /// Waits for the next finished fetch, stale or not.
    pub async fn next_outcome(&mut self) -> Option<Outcome> {
        self.outcomes_rx.recv().await
    }

    /// True while the view on screen is waiting for data.
    pub fn is_loading(&self) -> bool {
        match self.route() {
            Route::List => self.jobs.state().is_loading(),
            Route::Detail(_) => self.detail.state().is_loading(),
        }
    }

    /// Applies outcomes until the view on screen has its data (or its error).
    pub async fn settle(&mut self) {
        while self.is_loading() {
            match self.next_outcome().await {
                Some(outcome) => {
                    self.apply(outcome);
                }
                None => break,
            }
        }
    }

    pub fn render(&self) -> String {
        match self.route() {
            Route::List => view::render_list(&self.filters(), self.jobs.state()),
            Route::Detail(_) => {
                let back = router::list_location(&self.filters());
                view::render_detail(&back, self.detail.state())
            }
        }
    }
}
