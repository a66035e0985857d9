//! Recruiting API client
//!
//! Fetches the jobs collection (optionally filtered) and single job records
//! from the upstream REST API. No authentication is attached.

use common::{FilterSet, JobDetail, JobSummary, query};
use reqwest::StatusCode;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};
use url::Url;

/// Public endpoint the board talks to unless configured otherwise.
pub const DEFAULT_API_BASE: &str = "https://teknorix.jobsoid.com/api";

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Invalid API base URL '{0}'")]
    InvalidBase(String),

    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("{url} returned {status}")]
    Status { status: StatusCode, url: String },

    #[error("Malformed response body: {0}")]
    Decode(#[from] serde_json::Error),
}

#[derive(Debug)]
pub struct JobsClient {
    http: reqwest::Client,
    base: Url,
}

impl JobsClient {
    /// Builds a client for `api_base` (for example `https://host/api`).
    pub fn new(api_base: &str, timeout: Duration) -> Result<Self, FetchError> {
        let base = parse_base(api_base)?;
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { http, base })
    }

    /// `{base}/jobs?{query}`, with no `?` when there are no filters.
    pub fn jobs_url(&self, filters: &FilterSet) -> Url {
        let mut url = self.endpoint(&["jobs"]);
        let query = query::encode(filters);
        url.set_query((!query.is_empty()).then_some(query.as_str()));
        url
    }

    /// `{base}/jobs/{id}`, with `id` escaped as a single path segment.
    pub fn job_url(&self, id: &str) -> Url {
        self.endpoint(&["jobs", id])
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    /// Fetches the jobs matching `filters`.
    ///
    /// A JSON array is returned element for element, odd records included. A
    /// body that parses but is not an array (an error object, `null`, a
    /// paginated wrapper) yields an empty list. Transport errors and bodies
    /// that are not JSON at all are returned as errors.
    pub async fn fetch_jobs(&self, filters: &FilterSet) -> Result<Vec<JobSummary>, FetchError> {
        let url = self.jobs_url(filters);
        debug!(url = %url, "Fetching jobs");

        let response = self.http.get(url.clone()).send().await?;
        let status = response.status();
        let body = response.bytes().await?;
        let value: Value = serde_json::from_slice(&body)?;

        match value {
            Value::Array(items) => {
                let jobs: Vec<JobSummary> = items.into_iter().map(summary_from_value).collect();
                debug!(url = %url, count = jobs.len(), "Fetched jobs");
                Ok(jobs)
            }
            other => {
                warn!(
                    url = %url,
                    status = %status,
                    kind = value_kind(&other),
                    "Jobs response is not a list, treating as no results"
                );
                Ok(Vec::new())
            }
        }
    }

    /// Fetches one job. A non-success status (unknown id, for instance) is an error.
    pub async fn fetch_job_detail(&self, id: &str) -> Result<JobDetail, FetchError> {
        let url = self.job_url(id);
        debug!(url = %url, "Fetching job detail");

        let response = self.http.get(url.clone()).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status,
                url: url.to_string(),
            });
        }

        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

fn parse_base(api_base: &str) -> Result<Url, FetchError> {
    let base = Url::parse(api_base).map_err(|_| FetchError::InvalidBase(api_base.to_string()))?;
    if !matches!(base.scheme(), "http" | "https") || base.cannot_be_a_base() {
        return Err(FetchError::InvalidBase(api_base.to_string()));
    }
    Ok(base)
}

/// Only non-object entries fail to decode; they are kept as blank rows.
fn summary_from_value(value: Value) -> JobSummary {
    let kind = value_kind(&value);
    serde_json::from_value(value).unwrap_or_else(|e| {
        warn!(kind, error = %e, "Job entry is not an object, keeping it blank");
        JobSummary::default()
    })
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
