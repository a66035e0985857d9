//! Shared data model for the job board: filters, the query-string codec and
//! the job records returned by the recruiting API.

pub mod filters;
pub mod job;
pub mod query;

pub use filters::{FilterKey, FilterSet, UnknownFilterKey};
pub use job::{Field, JobDetail, JobId, JobSummary, display_name, facet_line};
